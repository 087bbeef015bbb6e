use crate::declaration_keyword::DeclarationKeyword;
use crate::descriptor::Descriptor;
use crate::error::Result;
use crate::node::{ast_node, AstNode};
use crate::value::Value;

ast_node!(
    /// A property declaration such as `uniform token[] xformOpOrder = [...]`.
    Declaration,
    6
);

impl<'d> Declaration<'d> {
    pub fn get_keyword(&self) -> Result<Option<DeclarationKeyword>> {
        self.node().get_nullable_object_property("keyword")
    }

    /// The USD value type name, e.g. `double3` or `token[]`.
    pub fn get_value_type(&self) -> Result<Option<&'d str>> {
        self.node().get_nullable_object_property("valueType")
    }

    pub fn get_field(&self) -> Result<&'d str> {
        self.node().get_object_property("field")
    }

    /// `None` for a declaration without a default value.
    pub fn get_value(&self) -> Result<Option<Value<'d>>> {
        self.node().get_nullable_object_property("value")
    }

    pub fn get_descriptor(&self) -> Result<Option<Descriptor<'d>>> {
        self.node().get_nullable_object_property("descriptor")
    }
}
