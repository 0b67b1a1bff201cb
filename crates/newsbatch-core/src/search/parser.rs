use chrono::DateTime;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::models::{NewsRecord, RecordStatus, DEFAULT_SOURCE, SUMMARY_PLACEHOLDER, UNKNOWN_DATE};

/// Which child element of the current `<item>` is being read
#[derive(Clone, Copy)]
enum Field {
    None,
    Title,
    Link,
    PubDate,
    Source,
}

#[derive(Default)]
struct RawItem {
    title: String,
    link: String,
    pub_date: Option<String>,
    source: Option<String>,
}

impl RawItem {
    fn append(&mut self, field: Field, text: &str) {
        match field {
            Field::Title => self.title.push_str(text),
            Field::Link => self.link.push_str(text),
            Field::PubDate => self.pub_date.get_or_insert_with(String::new).push_str(text),
            Field::Source => self.source.get_or_insert_with(String::new).push_str(text),
            Field::None => {}
        }
    }
}

/// Normalize a feed publication date for display.
///
/// Parseable dates (RFC 2822 as Google News emits, RFC 3339 as a fallback)
/// become `YYYY-MM-DD HH:MM`; unparseable strings pass through unchanged;
/// a missing date becomes [`UNKNOWN_DATE`].
pub fn normalize_pub_date(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return UNKNOWN_DATE.to_string();
    };

    let trimmed = raw.trim();
    DateTime::parse_from_rfc2822(trimmed)
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed))
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Parse the items of an RSS search response into normalized records,
/// truncated to `max_results`, in feed order.
///
/// Parsing is lenient: a malformed document tail yields the items collected
/// so far instead of an error. Only a document that breaks before any item
/// was read is reported as a parse failure.
pub(crate) fn parse_news(
    xml: &str,
    keyword: &str,
    max_results: usize,
) -> Result<Vec<NewsRecord>, quick_xml::Error> {
    let items = parse_items(xml)?;

    Ok(items
        .into_iter()
        .take(max_results)
        .map(|item| NewsRecord {
            date: normalize_pub_date(item.pub_date.as_deref()),
            query_target: keyword.to_string(),
            title: item.title,
            link: item.link,
            source: item
                .source
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            summary: SUMMARY_PLACEHOLDER.to_string(),
            status: RecordStatus::Ok,
        })
        .collect())
}

fn parse_items(xml: &str) -> Result<Vec<RawItem>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<RawItem> = None;
    let mut field = Field::None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"item" => current = Some(RawItem::default()),
                b"title" => field = Field::Title,
                b"link" => field = Field::Link,
                b"pubDate" => field = Field::PubDate,
                b"source" => field = Field::Source,
                _ => field = Field::None,
            },
            Ok(Event::Text(t)) => {
                if let Some(item) = current.as_mut() {
                    let text = t.unescape().map(|c| c.into_owned()).unwrap_or_default();
                    item.append(field, &text);
                }
            }
            Ok(Event::CData(t)) => {
                if let Some(item) = current.as_mut() {
                    let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                    item.append(field, &text);
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                field = Field::None;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                if items.is_empty() && current.is_none() {
                    return Err(e);
                }
                tracing::warn!("Stopping feed parse early: {}", e);
                break;
            }
            _ => {}
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"台積電" - Google 新聞</title>
    <link>https://news.google.com/search</link>
    <item>
      <title>台積電法說會重點整理</title>
      <link>https://news.google.com/rss/articles/abc123</link>
      <pubDate>Tue, 03 Jun 2025 04:00:00 GMT</pubDate>
      <source url="https://www.cna.com.tw">中央社</source>
    </item>
    <item>
      <title><![CDATA[Chipmaker posts record quarter]]></title>
      <link>https://news.google.com/rss/articles/def456</link>
      <source url="https://www.reuters.com">Reuters</source>
    </item>
    <item>
      <title>No publisher item</title>
      <link>https://news.google.com/rss/articles/ghi789</link>
      <pubDate>not a real date</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_news_maps_fields() {
        let records = parse_news(SAMPLE_FEED, "台積電", 10).unwrap();
        assert_eq!(records.len(), 3);

        let first = &records[0];
        assert_eq!(first.date, "2025-06-03 04:00");
        assert_eq!(first.query_target, "台積電");
        assert_eq!(first.title, "台積電法說會重點整理");
        assert_eq!(first.link, "https://news.google.com/rss/articles/abc123");
        assert_eq!(first.source, "中央社");
        assert_eq!(first.summary, SUMMARY_PLACEHOLDER);
        assert_eq!(first.status, RecordStatus::Ok);
    }

    #[test]
    fn test_parse_news_cdata_title_and_missing_date() {
        let records = parse_news(SAMPLE_FEED, "kw", 10).unwrap();

        assert_eq!(records[1].title, "Chipmaker posts record quarter");
        assert_eq!(records[1].date, UNKNOWN_DATE);
        assert_eq!(records[1].source, "Reuters");
    }

    #[test]
    fn test_parse_news_unparseable_date_and_default_source() {
        let records = parse_news(SAMPLE_FEED, "kw", 10).unwrap();

        assert_eq!(records[2].date, "not a real date");
        assert_eq!(records[2].source, DEFAULT_SOURCE);
    }

    #[test]
    fn test_parse_news_truncates_to_cap() {
        let records = parse_news(SAMPLE_FEED, "kw", 2).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "台積電法說會重點整理");
        assert_eq!(records[1].title, "Chipmaker posts record quarter");
    }

    #[test]
    fn test_parse_news_empty_channel() {
        let xml = r#"<rss version="2.0"><channel><title>empty</title></channel></rss>"#;
        let records = parse_news(xml, "kw", 10).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_news_keeps_items_before_malformed_tail() {
        // Cut the sample off in the middle of the second item
        let truncated = &SAMPLE_FEED[..SAMPLE_FEED.find("def456").unwrap()];
        let malformed = format!("{}</broken", truncated);

        let records = parse_news(&malformed, "kw", 10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "台積電法說會重點整理");
    }

    #[test]
    fn test_parse_news_rejects_non_feed_body() {
        let result = parse_news("<html><body><p>blocked</html>", "kw", 10);
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_pub_date() {
        assert_eq!(
            normalize_pub_date(Some("Tue, 03 Jun 2025 04:00:00 GMT")),
            "2025-06-03 04:00"
        );
        assert_eq!(
            normalize_pub_date(Some("2025-06-03T12:30:00+08:00")),
            "2025-06-03 12:30"
        );
        assert_eq!(normalize_pub_date(Some("last tuesday")), "last tuesday");
        assert_eq!(normalize_pub_date(None), UNKNOWN_DATE);
    }
}
