use crate::declaration_keyword::DeclarationKeyword;
use crate::error::Result;
use crate::node::{ast_node, AstNode};
use crate::value::Value;

ast_node!(
    /// A `field = value` metadata entry inside a descriptor.
    Assignment,
    4
);

impl<'d> Assignment<'d> {
    pub fn get_keyword(&self) -> Result<Option<DeclarationKeyword>> {
        self.node().get_nullable_object_property("keyword")
    }

    pub fn get_field(&self) -> Result<&'d str> {
        self.node().get_object_property("field")
    }

    pub fn get_value(&self) -> Result<Value<'d>> {
        self.node().get_object_property("value")
    }
}
