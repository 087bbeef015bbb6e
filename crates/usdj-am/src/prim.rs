//! Prim statements: `def`, `class` and `over`.
//!
//! The three productions share one shape and differ only in their
//! specifier, so their accessors live on the [`PrimStatement`] trait.

use std::fmt;

use crate::array::Array;
use crate::definition_statement::DefinitionStatement;
use crate::descriptor::Descriptor;
use crate::error::Result;
use crate::node::{ast_node, AstNode};

/// The keyword that introduces a prim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Specifier {
    Def,
    Class,
    Over,
}

impl Specifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Specifier::Def => "def",
            Specifier::Class => "class",
            Specifier::Over => "over",
        }
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait PrimStatement<'d>: AstNode<'d> {
    const SPECIFIER: Specifier;

    fn specifier(&self) -> Specifier {
        Self::SPECIFIER
    }

    /// The schema name such as `Xform`; `None` for typeless prims.
    fn get_prim_type(&self) -> Result<Option<&'d str>> {
        self.node().get_nullable_object_property("primType")
    }

    fn get_name(&self) -> Result<&'d str> {
        self.node().get_object_property("name")
    }

    fn get_descriptor(&self) -> Result<Option<Descriptor<'d>>> {
        self.node().get_nullable_object_property("descriptor")
    }

    fn get_statements(&self) -> Result<Array<'d, DefinitionStatement<'d>>> {
        self.node().get_array_property("statements")
    }
}

macro_rules! prim_statement {
    ($(#[$meta:meta])* $name:ident, $specifier:ident) => {
        ast_node!($(#[$meta])* $name, 5);

        impl<'d> PrimStatement<'d> for $name<'d> {
            const SPECIFIER: Specifier = Specifier::$specifier;
        }
    };
}

prim_statement!(
    /// `def`: defines a prim.
    Definition,
    Def
);
prim_statement!(
    /// `class`: an abstract prim other prims inherit from.
    ClassDeclaration,
    Class
);
prim_statement!(
    /// `over`: overrides opinions of a prim defined elsewhere.
    OverDeclaration,
    Over
);
