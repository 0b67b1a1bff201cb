use std::path::{Path, PathBuf};

use anyhow::Result;

use newsbatch_core::{
    batch::{run_batch, Pacing},
    export,
    keywords::{keywords_from_file, ColumnSelector},
    search::{NewsClient, RecordStatus},
    AppConfig,
};

pub async fn run(
    config: &AppConfig,
    input: &Path,
    column: Option<&str>,
    limit: Option<usize>,
    delay_ms: Option<u64>,
    output: Option<&Path>,
) -> Result<()> {
    let column = column.map(ColumnSelector::parse);
    let keywords = keywords_from_file(input, column.as_ref())?;

    if keywords.is_empty() {
        println!("No keywords found in {}", input.display());
        return Ok(());
    }

    println!("Found {} keywords\n", keywords.len());

    let cap = limit.unwrap_or(config.batch.per_keyword_cap);
    let pacing = Pacing::from_millis(delay_ms.unwrap_or(config.batch.pacing_ms));
    let client = NewsClient::new(config)?;

    let mut sink = |completed: usize, total: usize, keyword: &str| {
        println!("[{}/{}] {}", completed, total, keyword);
    };

    let records = run_batch(&client, &keywords, cap, pacing, &mut sink).await;

    let failed = records
        .iter()
        .filter(|r| r.status == RecordStatus::FetchFailed)
        .count();

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(export::suggested_filename()));

    let bytes = export::export_xlsx(&records)?;
    std::fs::write(&path, bytes)?;

    println!("\nBatch complete:");
    println!("  Records: {}", records.len() - failed);
    println!("  Failed keywords: {}", failed);
    println!("  Output: {}", path.display());

    Ok(())
}
