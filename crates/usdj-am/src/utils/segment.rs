//! Item path segments.
//!
//! Item paths use the JSON Pointer spelling: `/`-delimited segments where
//! `~1` stands for `/` and `~0` for `~`. A segment made of decimal digits in
//! canonical form addresses a list position; any other segment is a map key.

use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};

/// One step from an object to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Pos(usize),
}

impl Segment {
    /// Classifies an already unescaped segment.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<usize>() {
            Ok(pos) if is_canonical_pos(raw) => Segment::Pos(pos),
            _ => Segment::Key(raw.to_string()),
        }
    }

    /// The map key spelled by this segment.
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            Segment::Key(key) => Cow::Borrowed(key),
            Segment::Pos(pos) => Cow::Owned(pos.to_string()),
        }
    }
}

fn is_canonical_pos(raw: &str) -> bool {
    raw.bytes().all(|b| b.is_ascii_digit()) && (raw == "0" || !raw.starts_with('0'))
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(&escape_segment(key)),
            Segment::Pos(pos) => write!(f, "{pos}"),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(pos: usize) -> Self {
        Segment::Pos(pos)
    }
}

/// Replaces `~1` with `/` and `~0` with `~`.
pub fn unescape_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains('~') {
        return Cow::Borrowed(segment);
    }
    // ~1 first so that "~01" becomes "~1" rather than "/"
    Cow::Owned(segment.replace("~1", "/").replace("~0", "~"))
}

pub fn escape_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains(['/', '~']) {
        return Cow::Borrowed(segment);
    }
    Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
}

/// Splits an absolute item path into segments.
///
/// `"/"` yields no segments and so addresses the root object.
pub fn parse_item_path(path: &str) -> Result<Vec<Segment>> {
    if path.is_empty() {
        return Err(Error::EmptyItemPath);
    }
    let rest = path
        .strip_prefix('/')
        .ok_or_else(|| Error::RelativeItemPath(path.to_string()))?;
    if rest.is_empty() {
        return Ok(Vec::new());
    }
    rest.split('/')
        .map(|raw| {
            if raw.is_empty() {
                Err(Error::EmptySegment(path.to_string()))
            } else {
                Ok(Segment::parse(&unescape_segment(raw)))
            }
        })
        .collect()
}

/// Joins segments back into an absolute item path.
pub fn format_item_path(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }
    segments.iter().map(|segment| format!("/{segment}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_positions() {
        assert_eq!(
            parse_item_path("/data/scene/statements/0").unwrap(),
            vec![
                Segment::from("data"),
                Segment::from("scene"),
                Segment::from("statements"),
                Segment::Pos(0),
            ]
        );
        assert_eq!(parse_item_path("/").unwrap(), Vec::<Segment>::new());
    }

    #[test]
    fn non_canonical_digits_are_keys() {
        assert_eq!(Segment::parse("007"), Segment::from("007"));
        assert_eq!(Segment::parse("-1"), Segment::from("-1"));
        assert_eq!(Segment::parse("12"), Segment::Pos(12));
        assert_eq!(Segment::Pos(12).key(), "12");
    }

    #[test]
    fn unescapes_segments() {
        assert_eq!(unescape_segment("a~1b"), "a/b");
        assert_eq!(unescape_segment("a~0b"), "a~b");
        assert_eq!(unescape_segment("~01"), "~1");
        assert_eq!(
            parse_item_path("/a~1b/c~0d").unwrap(),
            vec![Segment::from("a/b"), Segment::from("c~d")]
        );
    }

    #[test]
    fn rejects_malformed_paths() {
        assert_eq!(parse_item_path(""), Err(Error::EmptyItemPath));
        assert_eq!(
            parse_item_path("data/scene"),
            Err(Error::RelativeItemPath("data/scene".to_string()))
        );
        assert_eq!(
            parse_item_path("/data//scene"),
            Err(Error::EmptySegment("/data//scene".to_string()))
        );
        assert!(parse_item_path("/data/").is_err());
    }

    #[test]
    fn formats_paths() {
        let segments = parse_item_path("/a~1b/0/c~0d").unwrap();
        assert_eq!(format_item_path(&segments), "/a~1b/0/c~0d");
        assert_eq!(format_item_path(&[]), "/");
    }
}
