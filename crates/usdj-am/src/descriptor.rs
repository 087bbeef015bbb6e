use crate::array::Array;
use crate::assignment::Assignment;
use crate::error::Result;
use crate::node::{ast_node, AstNode};

pub type Assignments<'d> = Array<'d, Assignment<'d>>;

ast_node!(
    /// The parenthesized metadata block of a layer, prim or variant.
    Descriptor,
    3
);

impl<'d> Descriptor<'d> {
    /// The leading doc string, if any.
    pub fn get_description(&self) -> Result<Option<&'d str>> {
        self.node().get_nullable_object_property("description")
    }

    pub fn get_assignments(&self) -> Result<Assignments<'d>> {
        self.node().get_array_property("assignments")
    }
}
