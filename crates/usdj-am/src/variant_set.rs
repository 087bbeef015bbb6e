use crate::array::Array;
use crate::declaration_keyword::DeclarationKeyword;
use crate::definition_statement::DefinitionStatement;
use crate::descriptor::Descriptor;
use crate::error::Result;
use crate::node::{ast_node, AstNode};

pub type Variants<'d> = Array<'d, Variant<'d>>;

ast_node!(
    /// `variantSet "name" = { ... }`
    VariantSet,
    4
);

impl<'d> VariantSet<'d> {
    pub fn get_keyword(&self) -> Result<Option<DeclarationKeyword>> {
        self.node().get_nullable_object_property("keyword")
    }

    pub fn get_name(&self) -> Result<&'d str> {
        self.node().get_object_property("name")
    }

    pub fn get_variants(&self) -> Result<Variants<'d>> {
        self.node().get_array_property("variants")
    }
}

ast_node!(
    /// One named alternative of a variant set.
    Variant,
    4
);

impl<'d> Variant<'d> {
    pub fn get_name(&self) -> Result<&'d str> {
        self.node().get_object_property("name")
    }

    pub fn get_descriptor(&self) -> Result<Option<Descriptor<'d>>> {
        self.node().get_nullable_object_property("descriptor")
    }

    pub fn get_statements(&self) -> Result<Array<'d, DefinitionStatement<'d>>> {
        self.node().get_array_property("statements")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Document;
    use serde_json::json;

    #[test]
    fn reads_variants() {
        let document = Document::from_json(
            &json!({
                "type": "VariantSet",
                "keyword": null,
                "name": "shadingVariant",
                "variants": [
                    {"type": "Variant", "name": "red", "descriptor": null, "statements": []},
                    {"type": "Variant", "name": "blue", "descriptor": null, "statements": []},
                ],
            }),
            100_014,
        );
        let set = VariantSet::new(&document, document.get_item().unwrap()).unwrap();
        assert_eq!(set.get_keyword(), Ok(None));
        assert_eq!(set.get_name(), Ok("shadingVariant"));
        let names = set
            .get_variants()
            .unwrap()
            .iter()
            .map(|variant| variant?.get_name())
            .collect::<Result<Vec<_>>>();
        assert_eq!(names, Ok(vec!["red", "blue"]));
    }
}
