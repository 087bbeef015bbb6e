use crate::array::Array;
use crate::declaration::Declaration;
use crate::error::Result;
use crate::node::{ast_node, AstNode};

pub type ObjectDeclarations<'d> = Array<'d, Declaration<'d>>;

ast_node!(
    /// A dictionary value: a braced list of declarations.
    ObjectValue,
    2
);

impl<'d> ObjectValue<'d> {
    pub fn get_declarations(&self) -> Result<ObjectDeclarations<'d>> {
        self.node().get_array_property("declarations")
    }
}
