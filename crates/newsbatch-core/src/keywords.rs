use std::io::Read;
use std::path::Path;

use crate::{Error, Result};

/// Which CSV column holds the keywords
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    Name(String),
    Index(usize),
}

impl ColumnSelector {
    /// A numeric value selects by zero-based index, anything else by header name
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<usize>() {
            Ok(index) => ColumnSelector::Index(index),
            Err(_) => ColumnSelector::Name(raw.to_string()),
        }
    }
}

/// Split freeform newline-delimited text into keywords, trimming each line
/// and discarding empty ones.
pub fn keywords_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read keywords from one column of a CSV file. The first row is always
/// treated as a header row and never becomes a keyword, even when the
/// column is selected by index; headerless files lose their first row.
pub fn keywords_from_csv_path(path: &Path, column: &ColumnSelector) -> Result<Vec<String>> {
    let file = std::fs::File::open(path)?;
    keywords_from_csv_reader(file, column)
}

pub fn keywords_from_csv_reader<R: Read>(reader: R, column: &ColumnSelector) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader.headers()?.clone();
    let index = match column {
        ColumnSelector::Index(i) if *i < headers.len() => *i,
        ColumnSelector::Index(i) => return Err(Error::ColumnNotFound(i.to_string())),
        ColumnSelector::Name(name) => headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| Error::ColumnNotFound(name.clone()))?,
    };

    let mut keywords = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(cell) = record.get(index) {
            let cell = cell.trim();
            if !cell.is_empty() {
                keywords.push(cell.to_string());
            }
        }
    }

    Ok(keywords)
}

/// Load keywords from a file: CSV files go through the column selector
/// (first column when none is given), anything else is read as
/// newline-delimited text.
pub fn keywords_from_file(path: &Path, column: Option<&ColumnSelector>) -> Result<Vec<String>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        let default_column = ColumnSelector::Index(0);
        keywords_from_csv_path(path, column.unwrap_or(&default_column))
    } else {
        let text = std::fs::read_to_string(path)?;
        Ok(keywords_from_text(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_from_text_trims_and_drops_empties() {
        let text = "  台積電  \n\nnvidia\n   \n聯發科\n";
        assert_eq!(keywords_from_text(text), vec!["台積電", "nvidia", "聯發科"]);
    }

    #[test]
    fn test_keywords_from_csv_by_name() {
        let csv = "id,keyword,note\n1, 台積電 ,x\n2,nvidia,\n3,,skip me\n";
        let column = ColumnSelector::Name("keyword".to_string());

        let keywords = keywords_from_csv_reader(csv.as_bytes(), &column).unwrap();
        assert_eq!(keywords, vec!["台積電", "nvidia"]);
    }

    #[test]
    fn test_keywords_from_csv_by_index_skips_header() {
        let csv = "keyword\nfirst\nsecond\n";
        let column = ColumnSelector::Index(0);

        let keywords = keywords_from_csv_reader(csv.as_bytes(), &column).unwrap();
        assert_eq!(keywords, vec!["first", "second"]);
    }

    #[test]
    fn test_keywords_from_csv_missing_column() {
        let csv = "a,b\n1,2\n";

        let by_name = keywords_from_csv_reader(csv.as_bytes(), &ColumnSelector::Name("c".into()));
        assert!(matches!(by_name, Err(Error::ColumnNotFound(_))));

        let by_index = keywords_from_csv_reader(csv.as_bytes(), &ColumnSelector::Index(5));
        assert!(matches!(by_index, Err(Error::ColumnNotFound(_))));
    }

    #[test]
    fn test_column_selector_parse() {
        assert_eq!(ColumnSelector::parse("2"), ColumnSelector::Index(2));
        assert_eq!(
            ColumnSelector::parse(" 關鍵字 "),
            ColumnSelector::Name("關鍵字".to_string())
        );
    }
}
