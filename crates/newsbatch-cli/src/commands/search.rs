use std::path::Path;

use anyhow::Result;

use newsbatch_core::{export, search::NewsClient, AppConfig};

pub async fn run(
    config: &AppConfig,
    keyword: &str,
    limit: Option<usize>,
    json: bool,
    output: Option<&Path>,
) -> Result<()> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        println!("Keyword is empty, nothing to search.");
        return Ok(());
    }

    let limit = limit.unwrap_or(config.search.max_results);
    let client = NewsClient::new(config)?;
    let records = client.query_records(keyword, limit).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No results for '{}'.", keyword);
    } else {
        println!("Results for '{}' ({}):\n", keyword, records.len());
        for record in &records {
            println!("  {}  {}", record.date, record.title);
            println!("    {} | {}", record.source, record.link);
            println!();
        }
    }

    if let Some(path) = output {
        let bytes = export::export_xlsx(&records)?;
        std::fs::write(path, bytes)?;
        println!("Wrote {} rows to {}", records.len(), path.display());
    }

    Ok(())
}
