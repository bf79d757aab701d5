use chrono::NaiveDate;
use disclosure_lib::disclosure_api::Client;
use disclosure_lib::types::{Exchange, ExchangeFilter};
use disclosure_lib::{ApplyOutcome, DateRange, DisclosureFeed, FeedFilter, FeedState};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page_body(ids: &[&str], has_more: bool, total: usize) -> serde_json::Value {
    let disclosures: Vec<_> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "date": "2024-01-10T09:00:00Z",
                "secName": "ABC (ABC Co)",
                "secCode": "000001",
                "exchange": "SHENZHEN",
                "topics": ["상장"],
                "category": "기업공개/상장",
                "title": "T",
                "content": "C"
            })
        })
        .collect();
    json!({ "disclosures": disclosures, "hasMore": has_more, "total": total })
}

async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

#[tokio::test]
async fn test_feed_pages_through_server() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/disclosures"))
        .and(query_param("exchange", "SHENZHEN"))
        .and(query_param("startDate", "2024-01-01"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["a", "b"], true, 3)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/disclosures"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["c"], false, 3)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let mut feed = DisclosureFeed::new(client);

    let filter = FeedFilter::new(
        ExchangeFilter::Only(Exchange::Shenzhen),
        DateRange::new(NaiveDate::from_ymd_opt(2024, 1, 1), None),
    );
    assert_eq!(feed.change_filter(filter).await, ApplyOutcome::Applied);
    assert_eq!(feed.items().len(), 2);
    assert!(feed.has_more());

    assert_eq!(feed.load_more().await, Some(ApplyOutcome::Applied));
    assert_eq!(
        feed.items().iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
        vec!["a", "b", "c"]
    );
    assert!(!feed.has_more());
    assert_eq!(feed.load_more().await, None);
}

#[tokio::test]
async fn test_feed_keeps_items_when_server_fails() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/disclosures"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "disclosures": [],
            "hasMore": false,
            "total": 0,
            "error": "Failed to load disclosures"
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let initial = serde_json::from_value(page_body(&["a"], true, 12)).unwrap();
    let mut feed = DisclosureFeed::with_initial(client, initial);

    assert_eq!(feed.load_more().await, Some(ApplyOutcome::Failed));
    assert_eq!(feed.items().len(), 1);
    assert!(feed.has_more());
    assert_eq!(feed.page(), 1);
    match feed.state() {
        FeedState::Error { message } => assert!(message.contains("500")),
        other => panic!("expected error state, got {:?}", other),
    }
}
