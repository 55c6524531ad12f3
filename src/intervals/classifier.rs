use regex::Regex;
use std::sync::LazyLock;

use crate::error::ParseError;

static HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>").expect("header pattern compiles"));

// ASCII digits only; `\d` would also accept other scripts' digits
static RANGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\s*-\s*([0-9]+)$").expect("range pattern compiles"));

/// How header fields are split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDelimiter {
    /// Runs of ASCII or Unicode whitespace
    Whitespace,
    Char(char),
}

/// Position of the intron length inside a `>` header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    /// Zero-based field index; field 0 is the `>`-prefixed identifier
    pub length_field: usize,
    pub delimiter: FieldDelimiter,
}

impl HeaderLayout {
    /// Header layout written by the intron extraction step feeding WindowMasker.
    pub const WINDOWMASKER: HeaderLayout = HeaderLayout {
        length_field: 5,
        delimiter: FieldDelimiter::Whitespace,
    };

    pub fn with_length_field(mut self, length_field: usize) -> Self {
        self.length_field = length_field;
        self
    }

    /// Extract the intron length from a header line. `line_no` is only used
    /// for error reporting.
    pub fn intron_length(&self, header: &str, line_no: usize) -> Result<i64, ParseError> {
        let field = match self.delimiter {
            FieldDelimiter::Whitespace => header.split_whitespace().nth(self.length_field),
            FieldDelimiter::Char(c) => header.split(c).nth(self.length_field),
        };

        let field = field.ok_or_else(|| ParseError::MissingLengthField {
            line: line_no,
            field: self.length_field,
            text: header.to_string(),
        })?;

        field.trim().parse::<i64>().map_err(|_| ParseError::InvalidLength {
            line: line_no,
            value: field.to_string(),
        })
    }
}

impl Default for HeaderLayout {
    fn default() -> Self {
        Self::WINDOWMASKER
    }
}

/// One line of interval output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Header(&'a str),
    RepeatRange { start: &'a str, end: &'a str },
    Other,
}

pub fn classify_line(line: &str) -> LineKind<'_> {
    if HEADER_PATTERN.is_match(line) {
        return LineKind::Header(line);
    }
    match RANGE_PATTERN.captures(line) {
        Some(caps) => match (caps.get(1), caps.get(2)) {
            (Some(start), Some(end)) => LineKind::RepeatRange {
                start: start.as_str(),
                end: end.as_str(),
            },
            _ => LineKind::Other,
        },
        None => LineKind::Other,
    }
}

/// Inclusive length of a masked range, `end - start + 1`.
///
/// Returns `None` when either coordinate does not fit in an `i64`.
pub fn masked_length(start: &str, end: &str) -> Option<i64> {
    let start: i64 = start.parse().ok()?;
    let end: i64 = end.parse().ok()?;
    end.checked_sub(start)?.checked_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(">ENSG0001 intron 3 chr1 + 1520", LineKind::Header(">ENSG0001 intron 3 chr1 + 1520"))]
    #[case(">", LineKind::Header(">"))]
    #[case("10 - 19", LineKind::RepeatRange { start: "10", end: "19" })]
    #[case("10-19", LineKind::RepeatRange { start: "10", end: "19" })]
    #[case("10 -   19", LineKind::RepeatRange { start: "10", end: "19" })]
    #[case(" 10 - 19", LineKind::Other)]
    #[case("10 - 19 ", LineKind::Other)]
    #[case("-10 - 19", LineKind::Other)]
    #[case("\u{661}\u{660} - \u{661}\u{669}", LineKind::Other)]
    #[case("\u{ff11}\u{ff10}-\u{ff11}\u{ff19}", LineKind::Other)]
    #[case("", LineKind::Other)]
    #[case("seq > 1", LineKind::Other)]
    fn classifies_lines(#[case] line: &str, #[case] expected: LineKind<'_>) {
        assert_eq!(classify_line(line), expected);
    }

    #[test]
    fn reads_length_from_sixth_field() {
        let layout = HeaderLayout::WINDOWMASKER;
        assert_eq!(layout.intron_length(">seq1 a b c d 100", 1).unwrap(), 100);
        assert_eq!(layout.intron_length(">seq1\ta  b c d\t42 extra", 1).unwrap(), 42);
    }

    #[test]
    fn custom_layout() {
        let layout = HeaderLayout {
            length_field: 1,
            delimiter: FieldDelimiter::Char('|'),
        };
        assert_eq!(layout.intron_length(">seq|77|x", 3).unwrap(), 77);
        assert_eq!(HeaderLayout::default().with_length_field(2).length_field, 2);
    }

    #[test]
    fn short_header_is_an_error() {
        let err = HeaderLayout::WINDOWMASKER
            .intron_length(">seq1 a b", 7)
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingLengthField { line: 7, field: 5, .. }));
    }

    #[test]
    fn non_numeric_length_is_an_error() {
        let err = HeaderLayout::WINDOWMASKER
            .intron_length(">seq1 a b c d abc", 2)
            .unwrap_err();
        match err {
            ParseError::InvalidLength { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn masked_length_is_inclusive() {
        assert_eq!(masked_length("10", "19"), Some(10));
        assert_eq!(masked_length("5", "5"), Some(1));
        assert_eq!(masked_length("99999999999999999999", "1"), None);
    }
}
