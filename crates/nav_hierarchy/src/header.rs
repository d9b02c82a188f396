//! Front matter header model shared by extraction and correction.
//!
//! A header is the region between the first and second line whose trimmed content is exactly
//! [`HEADER_DELIMITER`]. There is no nesting awareness and no requirement that the first
//! delimiter is the first line of the file. Later delimiter lines are ordinary body text.

use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Marker line that opens and closes the header.
pub const HEADER_DELIMITER: &str = "---";

/// Header key naming the document.
pub const TITLE_KEY: &str = "title";
/// Header key naming the parent document's title.
pub const PARENT_KEY: &str = "parent";
/// Header key naming the grand-parent document's title.
pub const GRAND_PARENT_KEY: &str = "grand_parent";
/// Header key holding the sibling sort value.
pub const NAV_ORDER_KEY: &str = "nav_order";

/// Declared sibling order.
///
/// Parsing is lossy-tolerant: text that is not a finite number is kept as [`NavOrder::Raw`] and
/// reported by validation instead of being rejected here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NavOrder {
    /// Finite integer or decimal value.
    Number(f64),
    /// Present but non-numeric value, kept verbatim.
    Raw(String),
}

impl NavOrder {
    /// Parse an unquoted header value.
    pub fn parse(value: &str) -> Self {
        match value.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => Self::Number(number),
            _ => Self::Raw(value.to_string()),
        }
    }

    /// Numeric value, if the order parsed as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Raw(_) => None,
        }
    }
}

impl Display for NavOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) if number.fract() == 0.0 && number.abs() < 1e15 => {
                write!(f, "{}", *number as i64)
            }
            Self::Number(number) => write!(f, "{number}"),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Hierarchy fields declared by one header. Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeaderFields {
    /// Title other documents use as their `parent`.
    pub title: Option<String>,
    /// Title of the parent document.
    pub parent: Option<String>,
    /// Title of the grand-parent document.
    pub grand_parent: Option<String>,
    /// Sibling sort value.
    pub nav_order: Option<NavOrder>,
}

impl HeaderFields {
    fn assign(&mut self, key: &str, value: &str) {
        let value = strip_quotes(value);
        let text = (!value.is_empty()).then(|| value.to_string());
        match key {
            TITLE_KEY => self.title = text,
            PARENT_KEY => self.parent = text,
            GRAND_PARENT_KEY => self.grand_parent = text,
            NAV_ORDER_KEY => self.nav_order = text.as_deref().map(NavOrder::parse),
            _ => {}
        }
    }
}

/// How much of a header the boundary scan found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderState {
    /// Opening and closing delimiters were both found.
    Closed,
    /// Only the opening delimiter was found; the header runs to end of file.
    Unterminated,
    /// No delimiter line at all.
    Absent,
}

impl HeaderState {
    /// True when fields were read from a properly closed header.
    pub fn is_complete(self) -> bool {
        self == Self::Closed
    }
}

/// Result of reading a header: the fields that could be parsed and whether the header was
/// well formed. Never an error; unreadable files are reported by the caller that did the I/O.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Parsed hierarchy fields.
    pub fields: HeaderFields,
    /// Header boundary state.
    pub state: HeaderState,
}

/// Read the hierarchy fields of a document.
pub fn extract(text: &str) -> Extraction {
    let document = HeaderDocument::parse(text);
    Extraction {
        fields: document.fields(),
        state: document.state(),
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LineRole {
    Delimiter,
    Header,
    Body,
}

#[derive(Clone, Debug)]
struct Line {
    content: String,
    terminator: String,
    role: LineRole,
}

/// Line-classified document text supporting in-place header field updates.
///
/// [`HeaderDocument::render`] reproduces the input byte for byte, including line terminators,
/// until a field is rewritten.
#[derive(Clone, Debug)]
pub struct HeaderDocument {
    lines: Vec<Line>,
    state: HeaderState,
}

impl HeaderDocument {
    /// Classify every line of `text` with one delimiter-counting pass.
    pub fn parse(text: &str) -> Self {
        let mut delimiters = 0usize;
        let lines = text
            .split_inclusive('\n')
            .map(|raw| {
                let (content, terminator) = split_terminator(raw);
                let role = if delimiters < 2 && content.trim() == HEADER_DELIMITER {
                    delimiters += 1;
                    LineRole::Delimiter
                } else if delimiters == 1 {
                    LineRole::Header
                } else {
                    LineRole::Body
                };
                Line {
                    content: content.to_string(),
                    terminator: terminator.to_string(),
                    role,
                }
            })
            .collect();

        let state = match delimiters {
            0 => HeaderState::Absent,
            1 => HeaderState::Unterminated,
            _ => HeaderState::Closed,
        };
        Self { lines, state }
    }

    /// Header boundary state.
    pub fn state(&self) -> HeaderState {
        self.state
    }

    /// Hierarchy fields declared in the header. The last occurrence of a repeated key wins.
    pub fn fields(&self) -> HeaderFields {
        let mut fields = HeaderFields::default();
        for (key, value) in self.header_entries() {
            fields.assign(key, value);
        }
        fields
    }

    /// Rewrite every header line declaring `key` as `key: value`.
    ///
    /// Returns the number of lines rewritten. Nothing is inserted when the key is not declared.
    pub fn set_field(&mut self, key: &str, value: &str) -> usize {
        let mut rewritten = 0usize;
        for line in &mut self.lines {
            if line.role != LineRole::Header {
                continue;
            }
            if header_entry(&line.content).is_some_and(|(candidate, _)| candidate == key) {
                line.content = format!("{key}: {value}");
                rewritten += 1;
            }
        }
        rewritten
    }

    /// Reassemble the document text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.content);
            out.push_str(&line.terminator);
        }
        out
    }

    fn header_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines
            .iter()
            .filter(|line| line.role == LineRole::Header)
            .filter_map(|line| header_entry(&line.content))
    }
}

fn split_terminator(raw: &str) -> (&str, &str) {
    if let Some(content) = raw.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = raw.strip_suffix('\n') {
        (content, "\n")
    } else {
        (raw, "")
    }
}

/// Split a header line on its first colon. Lines without a colon are not entries.
fn header_entry(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

/// Strip exactly one layer of matching single or double quotes.
pub(crate) fn strip_quotes(value: &str) -> &str {
    let value = value.trim();
    if value.len() >= 2 {
        let bytes = value.as_bytes();
        if (bytes[0] == b'"' && bytes[value.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[value.len() - 1] == b'\'')
        {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn extracts_recognized_fields_and_ignores_unknown_keys() {
        let text = "---\n\
                    layout: default\n\
                    title: \"Dependency Injection\"\n\
                    parent: 'Android Prep'\n\
                    grand_parent: Home\n\
                    nav_order: 3\n\
                    ---\n\
                    # Body\n";

        let extraction = extract(text);
        assert_eq!(extraction.state, HeaderState::Closed);
        assert_eq!(
            extraction.fields,
            HeaderFields {
                title: Some("Dependency Injection".into()),
                parent: Some("Android Prep".into()),
                grand_parent: Some("Home".into()),
                nav_order: Some(NavOrder::Number(3.0)),
            }
        );
    }

    #[test]
    fn missing_delimiters_yield_absent_fields() {
        let extraction = extract("title: Not a header\nparent: Nope\n");
        assert_eq!(extraction.state, HeaderState::Absent);
        assert_eq!(extraction.fields, HeaderFields::default());
    }

    #[test]
    fn empty_input_is_absent() {
        let extraction = extract("");
        assert_eq!(extraction.state, HeaderState::Absent);
        assert_eq!(extraction.fields, HeaderFields::default());
    }

    #[test]
    fn unterminated_header_keeps_fields_read_before_eof() {
        let extraction = extract("---\ntitle: Open Ended\nnav_order: 2");
        assert_eq!(extraction.state, HeaderState::Unterminated);
        assert_eq!(extraction.fields.title.as_deref(), Some("Open Ended"));
        assert_eq!(extraction.fields.nav_order, Some(NavOrder::Number(2.0)));
    }

    #[test]
    fn keys_after_the_closing_delimiter_are_body_text() {
        let text = "---\ntitle: Real\n---\ntitle: Fake\n---\nparent: Also Fake\n";
        let fields = extract(text).fields;
        assert_eq!(fields.title.as_deref(), Some("Real"));
        assert_eq!(fields.parent, None);
    }

    #[test]
    fn lines_without_colon_are_ignored() {
        let fields = extract("---\njust words\ntitle: Kept\n---\n").fields;
        assert_eq!(fields.title.as_deref(), Some("Kept"));
    }

    #[test]
    fn value_splits_on_first_colon_only() {
        let fields = extract("---\ntitle: Kotlin: Advanced\n---\n").fields;
        assert_eq!(fields.title.as_deref(), Some("Kotlin: Advanced"));
    }

    #[test]
    fn nav_order_keeps_non_numeric_text() {
        let fields = extract("---\nnav_order: \"abc\"\n---\n").fields;
        assert_eq!(fields.nav_order, Some(NavOrder::Raw("abc".into())));

        let fields = extract("---\nnav_order: 3.5\n---\n").fields;
        assert_eq!(fields.nav_order, Some(NavOrder::Number(3.5)));

        let fields = extract("---\nnav_order: inf\n---\n").fields;
        assert_eq!(fields.nav_order, Some(NavOrder::Raw("inf".into())));
    }

    #[test]
    fn empty_values_count_as_absent() {
        let fields = extract("---\ntitle: \"\"\nparent:\nnav_order: ''\n---\n").fields;
        assert_eq!(fields, HeaderFields::default());
    }

    #[test]
    fn only_one_quote_layer_is_stripped() {
        assert_eq!(strip_quotes("\"'nested'\""), "'nested'");
        assert_eq!(strip_quotes("\"mismatched'"), "\"mismatched'");
        assert_eq!(strip_quotes("\""), "\"");
    }

    #[test]
    fn render_without_updates_is_byte_identical() {
        let text = "intro\r\n---\r\ntitle:   Spaced  \r\nextra: [a, b]\r\n---\r\nbody\nno newline";
        assert_eq!(HeaderDocument::parse(text).render(), text);
    }

    #[test]
    fn set_field_rewrites_only_header_lines() {
        let text = "---\ntitle: Old\nparent:  Wrong  \n---\nparent: body mention\n";
        let mut document = HeaderDocument::parse(text);
        assert_eq!(document.set_field("parent", "Right"), 1);
        assert_eq!(
            document.render(),
            "---\ntitle: Old\nparent: Right\n---\nparent: body mention\n"
        );
    }

    #[test]
    fn set_field_preserves_crlf_terminators() {
        let mut document = HeaderDocument::parse("---\r\nnav_order: 9\r\n---\r\n");
        document.set_field("nav_order", "14");
        assert_eq!(document.render(), "---\r\nnav_order: 14\r\n---\r\n");
    }

    #[test]
    fn set_field_reports_undeclared_keys() {
        let mut document = HeaderDocument::parse("---\ntitle: Only\n---\n");
        assert_eq!(document.set_field("parent", "Nowhere"), 0);
        assert_eq!(document.render(), "---\ntitle: Only\n---\n");
    }

    #[test]
    fn nav_order_display_drops_integral_fraction() {
        assert_eq!(NavOrder::Number(3.0).to_string(), "3");
        assert_eq!(NavOrder::Number(3.5).to_string(), "3.5");
        assert_eq!(NavOrder::Raw("abc".into()).to_string(), "abc");
    }
}
