use anyhow::Result;
use disclosure_lib::dates::{local_time, utc_time};
use disclosure_lib::types::{Disclosure, Exchange};
use disclosure_lib::CategoryEntry;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Content longer than this many characters is cut for display.
const PREVIEW_CHARS: usize = 200;
const MAX_TOPICS: usize = 3;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct DisclosureRow {
    #[tabled(rename = "Date (UTC)")]
    #[serde(rename = "Date (UTC)")]
    date: String,
    #[tabled(rename = "Local Time")]
    #[serde(rename = "Local Time")]
    local_time: String,
    #[tabled(rename = "Exchange")]
    #[serde(rename = "Exchange")]
    exchange: String,
    #[tabled(rename = "Company")]
    #[serde(rename = "Company")]
    sec_name: String,
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    sec_code: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Topics")]
    #[serde(rename = "Topics")]
    topics: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Summary")]
    #[serde(rename = "Summary")]
    summary: String,
}

#[derive(Tabled, Serialize)]
struct CategoryRow {
    #[tabled(rename = "Exchange")]
    #[serde(rename = "Exchange")]
    exchange: String,
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    code: String,
    #[tabled(rename = "Label")]
    #[serde(rename = "Label")]
    label: String,
}

// -- Row builders --

fn build_disclosure_rows(disclosures: &[Disclosure]) -> Vec<DisclosureRow> {
    disclosures
        .iter()
        .map(|d| DisclosureRow {
            date: utc_time(d.date.as_str()),
            local_time: local_time(d.date.as_str(), d.exchange),
            exchange: d.exchange.korean_label().to_string(),
            sec_name: d.sec_name.clone(),
            sec_code: d.sec_code.clone(),
            category: d.category.clone(),
            topics: display_topics(&d.topics),
            title: d.title.clone(),
            summary: preview(&d.content),
        })
        .collect()
}

fn build_category_rows(tables: &[(Exchange, &[CategoryEntry])]) -> Vec<CategoryRow> {
    tables
        .iter()
        .flat_map(|(exchange, entries)| {
            entries.iter().map(move |entry| CategoryRow {
                exchange: exchange.korean_label().to_string(),
                code: entry.code.clone(),
                label: entry.label.clone(),
            })
        })
        .collect()
}

fn display_topics(topics: &[String]) -> String {
    topics
        .iter()
        .take(MAX_TOPICS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

// -- Printers --

pub fn print_disclosures(disclosures: &[Disclosure], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&disclosures),
        other => print_rows(build_disclosure_rows(disclosures), other)?,
    }
    Ok(())
}

pub fn print_categories(tables: &[(Exchange, &[CategoryEntry])], format: &OutputFormat) -> Result<()> {
    print_rows(build_category_rows(tables), format)
}

fn print_rows<R: Tabled + Serialize>(rows: Vec<R>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
