use usdj_am_crdt::Ts;

use crate::error::{Error, Result};
use crate::node::{AstNode, FromItem};
use crate::prim::{ClassDeclaration, Definition, OverDeclaration};
use crate::utils::{Document, Item};
use crate::value_type::ValueType;
use crate::variant_set::VariantSet;

/// A statement that can nest other statements.
///
/// Alternatives are tried in declaration order and the first one whose
/// shape and discriminant match is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement<'d> {
    Definition(Definition<'d>),
    ClassDeclaration(ClassDeclaration<'d>),
    OverDeclaration(OverDeclaration<'d>),
    VariantSet(VariantSet<'d>),
}

impl<'d> Statement<'d> {
    pub fn get_type(&self) -> ValueType {
        match self {
            Statement::Definition(node) => node.get_type(),
            Statement::ClassDeclaration(node) => node.get_type(),
            Statement::OverDeclaration(node) => node.get_type(),
            Statement::VariantSet(node) => node.get_type(),
        }
    }

    pub fn get_document(&self) -> &'d Document {
        match self {
            Statement::Definition(node) => node.get_document(),
            Statement::ClassDeclaration(node) => node.get_document(),
            Statement::OverDeclaration(node) => node.get_document(),
            Statement::VariantSet(node) => node.get_document(),
        }
    }

    pub fn get_object_id(&self) -> Ts {
        match self {
            Statement::Definition(node) => node.get_object_id(),
            Statement::ClassDeclaration(node) => node.get_object_id(),
            Statement::OverDeclaration(node) => node.get_object_id(),
            Statement::VariantSet(node) => node.get_object_id(),
        }
    }
}

impl<'d> FromItem<'d> for Statement<'d> {
    fn from_item(document: &'d Document, item: Item<'d>) -> Result<Self> {
        Definition::new(document, item)
            .map(Statement::Definition)
            .or_else(|_| ClassDeclaration::new(document, item).map(Statement::ClassDeclaration))
            .or_else(|_| OverDeclaration::new(document, item).map(Statement::OverDeclaration))
            .or_else(|_| VariantSet::new(document, item).map(Statement::VariantSet))
            .map_err(|_| Error::NoAlternative("Statement"))
    }
}
