//! Delimited table parser for the song and word datasets.
//!
//! # Format
//! ```text
//! artist,title,lyrics
//! Bad Bunny,Titi Me Pregunto,"[Coro]
//! Line one, with a comma
//! He said ""hola"""
//! ```
//!
//! Double quotes delimit fields that contain commas, quotes or line breaks;
//! a doubled quote inside a quoted section is a literal quote. Lines end with
//! LF or CRLF. The first row is the header; data rows whose field count
//! differs from the header are dropped.

use std::sync::Arc;

use crate::types::Record;

const DELIMITER: char = ',';
const QUOTE: char = '"';
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse delimited text into records keyed by the header row.
///
/// A leading byte order mark is skipped.
pub fn parse(text: &str) -> Vec<Record> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let mut scanner = Scanner::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match scanner.state {
            State::Quoted => {
                if ch == QUOTE {
                    if chars.peek() == Some(&QUOTE) {
                        chars.next();
                        scanner.field.push(QUOTE);
                    } else {
                        scanner.state = State::Unquoted;
                    }
                } else {
                    scanner.field.push(ch);
                }
            }
            State::Unquoted | State::RowBoundary => match ch {
                QUOTE => scanner.state = State::Quoted,
                DELIMITER => scanner.end_field(),
                '\n' => scanner.end_row(),
                '\r' => {}
                _ => {
                    scanner.field.push(ch);
                    scanner.state = State::Unquoted;
                }
            },
        }
    }

    scanner.finish()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// Nothing consumed since the last line feed (or start of input).
    RowBoundary,
    /// Inside a field, outside quotes.
    Unquoted,
    /// Inside a quoted section.
    Quoted,
}

struct Scanner {
    state: State,
    field: String,
    row: Vec<String>,
    header: Option<Arc<[String]>>,
    records: Vec<Record>,
}

impl Scanner {
    fn new() -> Self {
        Self {
            state: State::RowBoundary,
            field: String::new(),
            row: Vec::new(),
            header: None,
            records: Vec::new(),
        }
    }

    fn end_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
        self.state = State::Unquoted;
    }

    fn end_row(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
        let row = std::mem::take(&mut self.row);
        self.state = State::RowBoundary;

        match &self.header {
            None => {
                let columns: Vec<String> = row.iter().map(|h| h.trim().to_string()).collect();
                self.header = Some(columns.into());
            }
            Some(header) if header.len() == row.len() => {
                self.records.push(Record::new(Arc::clone(header), row));
            }
            Some(_) => {}
        }
    }

    fn finish(mut self) -> Vec<Record> {
        if self.state != State::RowBoundary {
            self.end_row();
        }
        self.records
    }
}

/// Quote a single value for the table format when it needs quoting.
pub fn quote_field(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| matches!(c, DELIMITER | QUOTE | '\n' | '\r'));

    if needs_quotes {
        format!("\"{}\"", value.replace(QUOTE, "\"\""))
    } else {
        value.to_string()
    }
}

/// Write a header and rows in the format understood by [`parse`].
pub fn to_delimited<H, R>(header: &[H], rows: &[R]) -> String
where
    H: AsRef<str>,
    R: AsRef<[String]>,
{
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(join_row(header.iter().map(|h| h.as_ref())));
    for row in rows {
        lines.push(join_row(row.as_ref().iter().map(|f| f.as_str())));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn join_row<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields.map(quote_field).collect::<Vec<_>>().join(",")
}
