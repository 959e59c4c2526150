//! CSV export of record collections.
//!
//! Output is the minimal RFC 4180 subset Excel accepts: quote-doubling only,
//! `\n` row separators, no BOM, no trailing newline.

use std::fmt;
use std::str::FromStr;

use crate::classify::content_type_of;
use crate::error::CoreError;
use crate::extract::Extractor;
use crate::format::{caption_of, duration_of, post_url_of, title_of, username_of, video_url_of};
use crate::metric::MetricKind;
use crate::record::MetricRecord;
use crate::timeline::{date_of, format_date};

/// One CSV cell. Numbers are written as-is, text is escaped.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(u64),
    Text(String),
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        Cell::Number(n)
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

type Accessor<'a> = Box<dyn Fn(&MetricRecord) -> Cell + 'a>;

/// A named column and the function producing its cell for each record.
pub struct Column<'a> {
    pub header: String,
    accessor: Accessor<'a>,
}

impl<'a> Column<'a> {
    #[must_use]
    pub fn new(header: impl Into<String>, accessor: impl Fn(&MetricRecord) -> Cell + 'a) -> Self {
        Self {
            header: header.into(),
            accessor: Box::new(accessor),
        }
    }

    #[must_use]
    pub fn cell(&self, record: &MetricRecord) -> Cell {
        (self.accessor)(record)
    }
}

impl fmt::Debug for Column<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

/// Which dashboard export layout to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    YouTube,
    Instagram,
}

impl FromStr for Preset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "youtube" | "yt" => Ok(Preset::YouTube),
            "instagram" | "ig" => Ok(Preset::Instagram),
            _ => Err(CoreError::UnknownPreset(s.to_string())),
        }
    }
}

/// Escapes one text field: doubles quotes and wraps the field in quotes when
/// it contains a comma, quote, or line break.
#[must_use]
pub fn escape_field(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) => n.to_string(),
        Cell::Text(s) => escape_field(s),
    }
}

/// Joins rendered fields into one row. A lone empty field is written as `""`
/// so the row is not read back as a blank line.
fn join_row(fields: &[String]) -> String {
    if let [only] = fields {
        if only.is_empty() {
            return "\"\"".to_string();
        }
    }
    fields.join(",")
}

/// Renders `records` as CSV with a header row.
#[must_use]
pub fn to_csv(records: &[MetricRecord], columns: &[Column<'_>]) -> String {
    let header: Vec<String> = columns.iter().map(|c| escape_field(&c.header)).collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(join_row(&header));
    for record in records {
        let row: Vec<String> = columns.iter().map(|c| render_cell(&c.cell(record))).collect();
        lines.push(join_row(&row));
    }
    lines.join("\n")
}

/// Columns of the YouTube export: Title, Views, Likes, Duration, Published
/// Date, URL.
#[must_use]
pub fn youtube_columns(extractor: &Extractor) -> Vec<Column<'_>> {
    vec![
        Column::new("Title", |r| title_of(r).into()),
        Column::new("Views", move |r| {
            extractor.extract(r, MetricKind::Views).value.into()
        }),
        Column::new("Likes", move |r| {
            extractor.extract(r, MetricKind::Likes).value.into()
        }),
        Column::new("Duration", |r| duration_of(r).into()),
        Column::new("Published Date", |r| {
            date_of(r).and_then(format_date).unwrap_or_default().into()
        }),
        Column::new("URL", |r| video_url_of(r).into()),
    ]
}

/// Columns of the Instagram export: Type, Caption, Likes, Comments, Date,
/// Username, URL. `account` fills in posts without an owner field.
#[must_use]
pub fn instagram_columns<'a>(extractor: &'a Extractor, account: &'a str) -> Vec<Column<'a>> {
    vec![
        Column::new("Type", |r| content_type_of(r).to_string().into()),
        Column::new("Caption", |r| caption_of(r).into()),
        Column::new("Likes", move |r| {
            extractor.extract(r, MetricKind::Likes).value.into()
        }),
        Column::new("Comments", move |r| {
            extractor.extract(r, MetricKind::Comments).value.into()
        }),
        Column::new("Date", |r| {
            date_of(r).and_then(format_date).unwrap_or_default().into()
        }),
        Column::new("Username", move |r| username_of(r, account).into()),
        Column::new("URL", |r| post_url_of(r).into()),
    ]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn records(values: Vec<serde_json::Value>) -> Vec<MetricRecord> {
        values.into_iter().map(MetricRecord::new).collect()
    }

    fn parse_back(text: &str) -> Vec<Vec<String>> {
        ::csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(text.as_bytes())
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn escape_plain_text_untouched() {
        assert_eq!(escape_field("hello"), "hello");
    }

    #[test]
    fn escape_comma_and_quotes() {
        assert_eq!(escape_field(r#"Hello, "World""#), r#""Hello, ""World""""#);
    }

    #[test]
    fn escape_quote_without_comma() {
        assert_eq!(escape_field(r#"say "hi""#), r#""say ""hi""""#);
    }

    #[test]
    fn escape_newlines() {
        assert_eq!(escape_field("line1\nline2"), "\"line1\nline2\"");
        assert_eq!(escape_field("cr\rhere"), "\"cr\rhere\"");
    }

    #[test]
    fn header_only_for_empty_collection() {
        let columns = vec![Column::new("A", |_| Cell::Number(1)), Column::new("B", |_| "x".into())];
        assert_eq!(to_csv(&[], &columns), "A,B");
    }

    #[test]
    fn rows_joined_without_trailing_newline() {
        let data = records(vec![json!({ "n": 1 }), json!({ "n": 2 })]);
        let columns = vec![Column::new("N", |r: &MetricRecord| {
            Cell::Number(r.resolve("n").and_then(serde_json::Value::as_u64).unwrap_or(0))
        })];
        assert_eq!(to_csv(&data, &columns), "N\n1\n2");
    }

    #[test]
    fn lone_empty_cell_is_quoted() {
        let data = records(vec![json!({ "caption": "first" }), json!({})]);
        let columns = vec![Column::new("Caption", |r: &MetricRecord| {
            r.text(&["caption"]).unwrap_or_default().into()
        })];

        let text = to_csv(&data, &columns);
        assert_eq!(text, "Caption\nfirst\n\"\"");

        let rows = parse_back(&text);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec![String::new()]);
    }

    #[test]
    fn empty_cells_among_several_stay_bare() {
        let data = records(vec![json!({})]);
        let columns = vec![
            Column::new("A", |_| "".into()),
            Column::new("B", |_| "".into()),
        ];
        assert_eq!(to_csv(&data, &columns), "A,B\n,");
    }

    #[test]
    fn round_trip_through_standard_parser() {
        let tricky = r#"Hello, "World""#;
        let data = records(vec![json!({ "title": tricky, "views": 12 })]);
        let columns = vec![
            Column::new("Title", |r: &MetricRecord| title_of(r).into()),
            Column::new("Views", |r: &MetricRecord| {
                crate::extract(r, MetricKind::Views).value.into()
            }),
        ];

        let text = to_csv(&data, &columns);
        assert_eq!(text, "Title,Views\n\"Hello, \"\"World\"\"\",12");

        let rows = parse_back(&text);
        assert_eq!(rows[0], vec!["Title", "Views"]);
        assert_eq!(rows[1][0], tricky);
        assert_eq!(rows[1][1], "12");
    }

    #[test]
    fn multiline_caption_round_trips() {
        let caption = "first line\nsecond, with comma";
        let data = records(vec![json!({ "caption": caption, "likesCount": 4 })]);
        let extractor = Extractor::default();
        let text = to_csv(&data, &instagram_columns(&extractor, "acct"));
        let rows = parse_back(&text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], caption);
    }

    #[test]
    fn youtube_preset_layout() {
        let data = records(vec![json!({
            "title": "Launch day",
            "viewCount": "10,000",
            "duration": "PT3M5S",
            "publishedAt": "2024-06-15T10:00:00Z",
            "id": "vid1"
        })]);
        let extractor = Extractor::default();
        let text = to_csv(&data, &youtube_columns(&extractor));
        assert_eq!(
            text,
            "Title,Views,Likes,Duration,Published Date,URL\n\
             Launch day,10000,500,00:03:05,2024-06-15,https://www.youtube.com/watch?v=vid1"
        );
    }

    #[test]
    fn instagram_preset_layout() {
        let data = records(vec![json!({
            "type": "Sidecar",
            "caption": "hi",
            "likesCount": 20,
            "comments": [{ "text": "nice" }],
            "timestamp": 1_718_443_200,
            "shortCode": "abc"
        })]);
        let extractor = Extractor::default();
        let text = to_csv(&data, &instagram_columns(&extractor, "@brand"));
        assert_eq!(
            text,
            "Type,Caption,Likes,Comments,Date,Username,URL\n\
             Other,hi,20,1,2024-06-15,brand,https://www.instagram.com/p/abc"
        );
    }

    #[test]
    fn preset_names_parse() {
        assert_eq!("YouTube".parse::<Preset>().unwrap(), Preset::YouTube);
        assert_eq!("ig".parse::<Preset>().unwrap(), Preset::Instagram);
        assert!(matches!(
            "tiktok".parse::<Preset>(),
            Err(CoreError::UnknownPreset(_))
        ));
    }
}
