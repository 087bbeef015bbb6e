//! Base of every syntax tree node.
//!
//! A node is a map object whose property count and `"type"` discriminant
//! match its grammar production. Nodes keep no copies of their properties:
//! every accessor re-reads the backing document and re-validates what it
//! finds there.

use std::fmt;
use std::ptr;

use usdj_am_crdt::{NodeKind, Ts};

use crate::array::Array;
use crate::error::{Error, Result};
use crate::utils::{Document, Item};
use crate::value_type::ValueType;

/// Anything that can be rebuilt from an item of a document.
pub trait FromItem<'d>: Sized {
    fn from_item(document: &'d Document, item: Item<'d>) -> Result<Self>;
}

impl<'d> FromItem<'d> for Item<'d> {
    fn from_item(document: &'d Document, item: Item<'d>) -> Result<Self> {
        check_document(document, item)?;
        Ok(item)
    }
}

impl<'d> FromItem<'d> for &'d str {
    fn from_item(document: &'d Document, item: Item<'d>) -> Result<Self> {
        check_document(document, item)?;
        item.as_str()
    }
}

impl<'d> FromItem<'d> for bool {
    fn from_item(document: &'d Document, item: Item<'d>) -> Result<Self> {
        check_document(document, item)?;
        item.as_bool()
    }
}

/// A concrete grammar production.
pub trait AstNode<'d>: FromItem<'d> {
    const TYPE: ValueType;
    /// Property count of the backing map object, `"type"` included.
    const SIZE: usize;

    fn node(&self) -> &Node<'d>;

    fn get_type(&self) -> ValueType {
        Self::TYPE
    }

    fn get_document(&self) -> &'d Document {
        self.node().document()
    }

    fn get_object_id(&self) -> Ts {
        self.node().object_id()
    }
}

pub(crate) fn check_document(document: &Document, item: Item<'_>) -> Result<()> {
    if ptr::eq(document, item.document()) {
        Ok(())
    } else {
        Err(Error::ForeignItem)
    }
}

/// A validated map object.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Node<'d> {
    item: Item<'d>,
}

impl<'d> Node<'d> {
    /// Wraps a map object of `document` that has exactly `size` properties.
    pub fn new(document: &'d Document, item: Item<'d>, size: usize) -> Result<Self> {
        check_document(document, item)?;
        if item.kind() != NodeKind::Obj {
            return Err(Error::WrongKind {
                expected: NodeKind::Obj,
                found: item.kind(),
            });
        }
        if item.size() != size {
            return Err(Error::WrongSize {
                expected: size,
                found: item.size(),
            });
        }
        Ok(Self { item })
    }

    /// [`Node::new`] followed by a check of the `"type"` discriminant.
    pub fn typed(
        document: &'d Document,
        item: Item<'d>,
        size: usize,
        value_type: ValueType,
    ) -> Result<Self> {
        let node = Self::new(document, item, size)?;
        node.check_enum_property("type", value_type)?;
        Ok(node)
    }

    pub fn document(&self) -> &'d Document {
        self.item.document()
    }

    pub fn item(&self) -> Item<'d> {
        self.item
    }

    pub fn object_id(&self) -> Ts {
        self.item.object_id()
    }

    /// The property `name`, or `None` if the map object lacks it.
    pub fn get_property(&self, name: &str) -> Option<Item<'d>> {
        self.item.get(name).ok()
    }

    pub fn check_enum_property(&self, name: &str, expected: ValueType) -> Result<()> {
        let property = self
            .get_property(name)
            .ok_or_else(|| Error::MissingProperty(name.to_string()))?;
        let discriminant = |found: String| Error::Discriminant {
            name: name.to_string(),
            expected,
            found,
        };
        let tag = property
            .as_str()
            .map_err(|_| discriminant(property.view().to_string()))?;
        match tag.parse::<ValueType>() {
            Ok(found) if found == expected => Ok(()),
            _ => Err(discriminant(tag.to_string())),
        }
    }

    /// A required property; absent and `null` properties both fail.
    pub fn get_object_property<T: FromItem<'d>>(&self, name: &str) -> Result<T> {
        match self.get_property(name) {
            Some(property) if !property.is_null() => T::from_item(self.document(), property),
            _ => Err(Error::MissingProperty(name.to_string())),
        }
    }

    pub fn get_nullable_object_property<T: FromItem<'d>>(&self, name: &str) -> Result<Option<T>> {
        match self.get_property(name) {
            Some(property) if !property.is_null() => {
                T::from_item(self.document(), property).map(Some)
            }
            _ => Ok(None),
        }
    }

    pub fn get_array_property<T: FromItem<'d>>(&self, name: &str) -> Result<Array<'d, T>> {
        self.get_object_property(name)
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.item.get("type").and_then(|item| item.as_str());
        f.debug_struct("Node")
            .field("id", &self.object_id())
            .field("type", &tag.unwrap_or("?"))
            .finish()
    }
}

/// Declares the struct of a grammar production together with its
/// [`FromItem`] and [`AstNode`] implementations.
macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $size:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name<'d> {
            node: $crate::node::Node<'d>,
        }

        impl<'d> $name<'d> {
            pub fn new(
                document: &'d $crate::utils::Document,
                item: $crate::utils::Item<'d>,
            ) -> $crate::error::Result<Self> {
                let node = $crate::node::Node::typed(
                    document,
                    item,
                    $size,
                    $crate::value_type::ValueType::$name,
                )?;
                Ok(Self { node })
            }
        }

        impl<'d> $crate::node::FromItem<'d> for $name<'d> {
            fn from_item(
                document: &'d $crate::utils::Document,
                item: $crate::utils::Item<'d>,
            ) -> $crate::error::Result<Self> {
                Self::new(document, item)
            }
        }

        impl<'d> $crate::node::AstNode<'d> for $name<'d> {
            const TYPE: $crate::value_type::ValueType = $crate::value_type::ValueType::$name;
            const SIZE: usize = $size;

            fn node(&self) -> &$crate::node::Node<'d> {
                &self.node
            }
        }
    };
}

pub(crate) use ast_node;
