//! Keywords that may prefix a declaration or an assignment.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::node::FromItem;
use crate::utils::{Document, Item};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKeyword {
    Varying,
    Uniform,
    Custom,
    Prepend,
    Append,
    Delete,
    Add,
}

const TAGS: [(&str, DeclarationKeyword); 7] = [
    ("varying", DeclarationKeyword::Varying),
    ("uniform", DeclarationKeyword::Uniform),
    ("custom", DeclarationKeyword::Custom),
    ("prepend", DeclarationKeyword::Prepend),
    ("append", DeclarationKeyword::Append),
    ("delete", DeclarationKeyword::Delete),
    ("add", DeclarationKeyword::Add),
];

impl DeclarationKeyword {
    pub fn as_str(self) -> &'static str {
        TAGS.iter()
            .find(|(_, keyword)| *keyword == self)
            .map_or("???", |(tag, _)| tag)
    }

    /// `true` for the list-editing keywords.
    pub fn is_list_op(self) -> bool {
        matches!(
            self,
            DeclarationKeyword::Prepend
                | DeclarationKeyword::Append
                | DeclarationKeyword::Delete
                | DeclarationKeyword::Add
        )
    }
}

impl FromStr for DeclarationKeyword {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        TAGS.iter()
            .find(|(tag, _)| *tag == token)
            .map(|(_, keyword)| *keyword)
            .ok_or_else(|| Error::UnknownKeyword(s.to_string()))
    }
}

impl fmt::Display for DeclarationKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'d> FromItem<'d> for DeclarationKeyword {
    fn from_item(document: &'d Document, item: Item<'d>) -> Result<Self> {
        <&str>::from_item(document, item)?.parse()
    }
}
