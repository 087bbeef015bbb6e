use usdj_am_crdt::Ts;

use crate::declaration::Declaration;
use crate::error::{Error, Result};
use crate::node::{AstNode, FromItem};
use crate::statement::Statement;
use crate::utils::{Document, Item};
use crate::value_type::ValueType;

/// An element of a statement list: a nested statement or a property
/// declaration, tried in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionStatement<'d> {
    Statement(Statement<'d>),
    Declaration(Declaration<'d>),
}

impl<'d> DefinitionStatement<'d> {
    pub fn get_type(&self) -> ValueType {
        match self {
            DefinitionStatement::Statement(statement) => statement.get_type(),
            DefinitionStatement::Declaration(declaration) => declaration.get_type(),
        }
    }

    pub fn get_document(&self) -> &'d Document {
        match self {
            DefinitionStatement::Statement(statement) => statement.get_document(),
            DefinitionStatement::Declaration(declaration) => declaration.get_document(),
        }
    }

    pub fn get_object_id(&self) -> Ts {
        match self {
            DefinitionStatement::Statement(statement) => statement.get_object_id(),
            DefinitionStatement::Declaration(declaration) => declaration.get_object_id(),
        }
    }
}

impl<'d> FromItem<'d> for DefinitionStatement<'d> {
    fn from_item(document: &'d Document, item: Item<'d>) -> Result<Self> {
        Statement::from_item(document, item)
            .map(DefinitionStatement::Statement)
            .or_else(|_| Declaration::new(document, item).map(DefinitionStatement::Declaration))
            .map_err(|_| Error::NoAlternative("DefinitionStatement"))
    }
}
