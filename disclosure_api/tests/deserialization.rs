use disclosure_api::types::{DisclosurePage, Exchange, RawRecord};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_page_full() {
    let json = load_fixture("disclosures_page.json");
    let page: DisclosurePage = serde_json::from_str(&json).unwrap();
    assert_eq!(page.disclosures.len(), 2);
    assert!(page.has_more);
    assert_eq!(page.total, 12);
    assert!(page.error.is_none());

    let first = &page.disclosures[0];
    assert_eq!(first.id, "hk-20240112-0001");
    assert_eq!(first.exchange, Exchange::Hongkong);
    assert_eq!(first.sec_code, "00700");
    assert_eq!(first.topics, vec!["자사주매입", "주식변동"]);
    assert_eq!(first.category, "발행주식수변동");
    assert!(first.original_url.is_some());

    let second = &page.disclosures[1];
    assert_eq!(second.exchange, Exchange::Shenzhen);
    assert!(second.original_url.is_none());
}

#[test]
fn deserialize_page_empty() {
    let json = load_fixture("disclosures_empty.json");
    let page: DisclosurePage = serde_json::from_str(&json).unwrap();
    assert!(page.disclosures.is_empty());
    assert!(!page.has_more);
    assert_eq!(page.total, 0);
}

#[test]
fn deserialize_page_without_total() {
    let json = r#"{"disclosures": [], "hasMore": false}"#;
    let page: DisclosurePage = serde_json::from_str(json).unwrap();
    assert_eq!(page.total, 0);
}

#[test]
fn serialize_failure_page() {
    let page = DisclosurePage::failure("Internal server error");
    let value = serde_json::to_value(&page).unwrap();
    assert_eq!(value["disclosures"], serde_json::json!([]));
    assert_eq!(value["hasMore"], false);
    assert_eq!(value["total"], 0);
    assert_eq!(value["error"], "Internal server error");
}

#[test]
fn serialize_omits_absent_original_url() {
    let json = load_fixture("disclosures_page.json");
    let page: DisclosurePage = serde_json::from_str(&json).unwrap();
    let value = serde_json::to_value(&page.disclosures[1]).unwrap();
    assert!(value.get("originalUrl").is_none());
    assert_eq!(value["secName"], "평안은행 (平安银行)");
}

#[test]
fn deserialize_raw_record() {
    let json = r#"{
        "id": "s1",
        "dataDate": "2024-01-10T09:00:00Z",
        "korName": "ABC",
        "details": {"secName": ["ABC Co"], "secCode": ["000001"], "categoryId": ["0102"]},
        "analysisDetails": {"topicKor": "상장,공시", "summarizeTinyKor": "T", "summarizeLongKor": "C"}
    }"#;
    let record: RawRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.id, "s1");
    assert_eq!(record.details.primary_sec_name(), "ABC Co");
    assert_eq!(record.details.category_id.primary(), "0102");
    assert!(record.analysis_details.category_kor.is_none());
}

#[test]
fn deserialize_raw_record_missing_analysis_returns_error() {
    let json = r#"{"id": "s1", "dataDate": "2024-01-10", "korName": "ABC", "details": {}}"#;
    let result = serde_json::from_str::<RawRecord>(json);
    assert!(result.is_err());
}

#[test]
fn deserialize_malformed_json_returns_error() {
    let bad_json = r#"{"disclosures": not valid json}"#;
    let result = serde_json::from_str::<DisclosurePage>(bad_json);
    assert!(result.is_err());
}
