//! Lazy views of list objects.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use usdj_am_crdt::{NodeKind, Ts};

use crate::error::{Error, Result};
use crate::node::{check_document, FromItem};
use crate::utils::{Document, Item};

/// A list object whose elements are rebuilt as `T` on access.
///
/// Nothing is validated up front beyond the list shape; a malformed element
/// only fails when it's reached.
pub struct Array<'d, T> {
    item: Item<'d>,
    _element: PhantomData<fn() -> T>,
}

impl<'d, T: FromItem<'d>> Array<'d, T> {
    pub fn new(document: &'d Document, item: Item<'d>) -> Result<Self> {
        check_document(document, item)?;
        if item.kind() != NodeKind::Arr {
            return Err(Error::WrongKind {
                expected: NodeKind::Arr,
                found: item.kind(),
            });
        }
        Ok(Self {
            item,
            _element: PhantomData,
        })
    }

    pub fn len(&self) -> usize {
        self.item.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, pos: usize) -> Result<T> {
        T::from_item(self.get_document(), self.item.at(pos)?)
    }

    /// Iterates over the elements present when the iterator is created.
    pub fn iter(&self) -> ArrayIter<'d, T> {
        ArrayIter {
            item: self.item,
            pos: 0,
            len: self.len(),
            _element: PhantomData,
        }
    }

    pub fn get_document(&self) -> &'d Document {
        self.item.document()
    }

    pub fn get_object_id(&self) -> Ts {
        self.item.object_id()
    }

    /// Rebuilds every element, stopping at the first malformed one.
    pub fn to_vec(&self) -> Result<Vec<T>> {
        self.iter().collect()
    }
}

impl<T> Clone for Array<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Array<'_, T> {}

impl<T> PartialEq for Array<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item
    }
}

impl<T> fmt::Debug for Array<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("id", &self.item.object_id())
            .field("len", &self.item.size())
            .finish()
    }
}

impl<'d, T: FromItem<'d>> FromItem<'d> for Array<'d, T> {
    fn from_item(document: &'d Document, item: Item<'d>) -> Result<Self> {
        Self::new(document, item)
    }
}

impl<'d, T: FromItem<'d>> IntoIterator for &Array<'d, T> {
    type Item = Result<T>;
    type IntoIter = ArrayIter<'d, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'d, T: FromItem<'d>> IntoIterator for Array<'d, T> {
    type Item = Result<T>;
    type IntoIter = ArrayIter<'d, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct ArrayIter<'d, T> {
    item: Item<'d>,
    pos: usize,
    len: usize,
    _element: PhantomData<fn() -> T>,
}

impl<T> Clone for ArrayIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            item: self.item,
            pos: self.pos,
            len: self.len,
            _element: PhantomData,
        }
    }
}

impl<'d, T: FromItem<'d>> Iterator for ArrayIter<'d, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.len {
            return None;
        }
        let pos = self.pos;
        self.pos += 1;
        Some(
            self.item
                .at(pos)
                .and_then(|element| T::from_item(self.item.document(), element)),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.pos;
        (remaining, Some(remaining))
    }
}

impl<'d, T: FromItem<'d>> ExactSizeIterator for ArrayIter<'d, T> {}

impl<'d, T: FromItem<'d>> FusedIterator for ArrayIter<'d, T> {}
