//! Double-dispatch traversal of the syntax tree.
//!
//! `node.accept(visitor)` calls the `visit_*` method for the node's
//! production and `node.accept_owned(visitor)` calls its `visit_*_owned`
//! counterpart, handing the node over. Unions and [`Value`] dispatch to
//! their payload.
//!
//! The default `visit_*` methods walk the children with the `walk_*`
//! functions, handing each freshly rebuilt child over through
//! `accept_owned`. The default `visit_*_owned` methods forward to the
//! borrowing ones, so a visitor only overrides the flavor it needs.

use crate::array::Array;
use crate::assignment::Assignment;
use crate::declaration::Declaration;
use crate::definition_statement::DefinitionStatement;
use crate::descriptor::Descriptor;
use crate::error::Result;
use crate::external_reference_import::ExternalReferenceImport;
use crate::file::File;
use crate::node::FromItem;
use crate::object_value::ObjectValue;
use crate::path::Path;
use crate::prim::{ClassDeclaration, Definition, OverDeclaration, PrimStatement};
use crate::statement::Statement;
use crate::value::{ConstValues, Number, Value};
use crate::variant_set::{Variant, VariantSet};

/// Double dispatch into a [`Visitor`].
pub trait Accept<'d> {
    fn accept<V: Visitor<'d> + ?Sized>(&self, visitor: &mut V) -> Result<()>;

    fn accept_owned<V: Visitor<'d> + ?Sized>(self, visitor: &mut V) -> Result<()>
    where
        Self: Sized;
}

pub trait Visitor<'d> {
    fn visit_file(&mut self, node: &File<'d>) -> Result<()> {
        walk_file(self, node)
    }

    fn visit_file_owned(&mut self, node: File<'d>) -> Result<()> {
        self.visit_file(&node)
    }

    fn visit_descriptor(&mut self, node: &Descriptor<'d>) -> Result<()> {
        walk_descriptor(self, node)
    }

    fn visit_descriptor_owned(&mut self, node: Descriptor<'d>) -> Result<()> {
        self.visit_descriptor(&node)
    }

    fn visit_assignment(&mut self, node: &Assignment<'d>) -> Result<()> {
        walk_assignment(self, node)
    }

    fn visit_assignment_owned(&mut self, node: Assignment<'d>) -> Result<()> {
        self.visit_assignment(&node)
    }

    fn visit_definition(&mut self, node: &Definition<'d>) -> Result<()> {
        walk_prim(self, node)
    }

    fn visit_definition_owned(&mut self, node: Definition<'d>) -> Result<()> {
        self.visit_definition(&node)
    }

    fn visit_class_declaration(&mut self, node: &ClassDeclaration<'d>) -> Result<()> {
        walk_prim(self, node)
    }

    fn visit_class_declaration_owned(&mut self, node: ClassDeclaration<'d>) -> Result<()> {
        self.visit_class_declaration(&node)
    }

    fn visit_over_declaration(&mut self, node: &OverDeclaration<'d>) -> Result<()> {
        walk_prim(self, node)
    }

    fn visit_over_declaration_owned(&mut self, node: OverDeclaration<'d>) -> Result<()> {
        self.visit_over_declaration(&node)
    }

    fn visit_variant_set(&mut self, node: &VariantSet<'d>) -> Result<()> {
        walk_variant_set(self, node)
    }

    fn visit_variant_set_owned(&mut self, node: VariantSet<'d>) -> Result<()> {
        self.visit_variant_set(&node)
    }

    fn visit_variant(&mut self, node: &Variant<'d>) -> Result<()> {
        walk_variant(self, node)
    }

    fn visit_variant_owned(&mut self, node: Variant<'d>) -> Result<()> {
        self.visit_variant(&node)
    }

    fn visit_declaration(&mut self, node: &Declaration<'d>) -> Result<()> {
        walk_declaration(self, node)
    }

    fn visit_declaration_owned(&mut self, node: Declaration<'d>) -> Result<()> {
        self.visit_declaration(&node)
    }

    fn visit_object_value(&mut self, node: &ObjectValue<'d>) -> Result<()> {
        walk_object_value(self, node)
    }

    fn visit_object_value_owned(&mut self, node: ObjectValue<'d>) -> Result<()> {
        self.visit_object_value(&node)
    }

    fn visit_external_reference_import(
        &mut self,
        node: &ExternalReferenceImport<'d>,
    ) -> Result<()> {
        node.get_field()?;
        node.get_import_path()?;
        Ok(())
    }

    fn visit_external_reference_import_owned(
        &mut self,
        node: ExternalReferenceImport<'d>,
    ) -> Result<()> {
        self.visit_external_reference_import(&node)
    }

    fn visit_path(&mut self, node: &Path<'d>) -> Result<()> {
        node.get_path()?;
        Ok(())
    }

    fn visit_path_owned(&mut self, node: Path<'d>) -> Result<()> {
        self.visit_path(&node)
    }

    fn visit_const_values(&mut self, values: &ConstValues<'d>) -> Result<()> {
        walk_const_values(self, values)
    }

    fn visit_const_values_owned(&mut self, values: ConstValues<'d>) -> Result<()> {
        self.visit_const_values(&values)
    }

    fn visit_bool(&mut self, _value: bool) -> Result<()> {
        Ok(())
    }

    fn visit_number(&mut self, _value: Number) -> Result<()> {
        Ok(())
    }

    fn visit_string(&mut self, _value: &'d str) -> Result<()> {
        Ok(())
    }
}

pub fn walk_file<'d, V: Visitor<'d> + ?Sized>(visitor: &mut V, node: &File<'d>) -> Result<()> {
    if let Some(descriptor) = node.get_descriptor()? {
        descriptor.accept_owned(visitor)?;
    }
    walk_array(visitor, node.get_statements()?)
}

pub fn walk_descriptor<'d, V: Visitor<'d> + ?Sized>(
    visitor: &mut V,
    node: &Descriptor<'d>,
) -> Result<()> {
    node.get_description()?;
    walk_array(visitor, node.get_assignments()?)
}

pub fn walk_assignment<'d, V: Visitor<'d> + ?Sized>(
    visitor: &mut V,
    node: &Assignment<'d>,
) -> Result<()> {
    node.get_keyword()?;
    node.get_field()?;
    node.get_value()?.accept_owned(visitor)
}

/// Shared walk of `def`, `class` and `over` statements.
pub fn walk_prim<'d, V, P>(visitor: &mut V, node: &P) -> Result<()>
where
    V: Visitor<'d> + ?Sized,
    P: PrimStatement<'d>,
{
    node.get_prim_type()?;
    node.get_name()?;
    if let Some(descriptor) = node.get_descriptor()? {
        descriptor.accept_owned(visitor)?;
    }
    walk_array(visitor, node.get_statements()?)
}

pub fn walk_variant_set<'d, V: Visitor<'d> + ?Sized>(
    visitor: &mut V,
    node: &VariantSet<'d>,
) -> Result<()> {
    node.get_keyword()?;
    node.get_name()?;
    walk_array(visitor, node.get_variants()?)
}

pub fn walk_variant<'d, V: Visitor<'d> + ?Sized>(
    visitor: &mut V,
    node: &Variant<'d>,
) -> Result<()> {
    node.get_name()?;
    if let Some(descriptor) = node.get_descriptor()? {
        descriptor.accept_owned(visitor)?;
    }
    walk_array(visitor, node.get_statements()?)
}

pub fn walk_declaration<'d, V: Visitor<'d> + ?Sized>(
    visitor: &mut V,
    node: &Declaration<'d>,
) -> Result<()> {
    node.get_keyword()?;
    node.get_value_type()?;
    node.get_field()?;
    if let Some(value) = node.get_value()? {
        value.accept_owned(visitor)?;
    }
    if let Some(descriptor) = node.get_descriptor()? {
        descriptor.accept_owned(visitor)?;
    }
    Ok(())
}

pub fn walk_object_value<'d, V: Visitor<'d> + ?Sized>(
    visitor: &mut V,
    node: &ObjectValue<'d>,
) -> Result<()> {
    walk_array(visitor, node.get_declarations()?)
}

pub fn walk_const_values<'d, V: Visitor<'d> + ?Sized>(
    visitor: &mut V,
    values: &ConstValues<'d>,
) -> Result<()> {
    values
        .iter()
        .try_for_each(|value| value.clone().accept_owned(visitor))
}

/// Rebuilds every element in order and hands it to the visitor.
pub fn walk_array<'d, V, T>(visitor: &mut V, array: Array<'d, T>) -> Result<()>
where
    V: Visitor<'d> + ?Sized,
    T: FromItem<'d> + Accept<'d>,
{
    array
        .iter()
        .try_for_each(|element| element?.accept_owned(visitor))
}

macro_rules! accept {
    ($name:ident, $visit:ident, $visit_owned:ident) => {
        impl<'d> Accept<'d> for $name<'d> {
            fn accept<V: Visitor<'d> + ?Sized>(&self, visitor: &mut V) -> Result<()> {
                visitor.$visit(self)
            }

            fn accept_owned<V: Visitor<'d> + ?Sized>(self, visitor: &mut V) -> Result<()> {
                visitor.$visit_owned(self)
            }
        }
    };
}

accept!(File, visit_file, visit_file_owned);
accept!(Descriptor, visit_descriptor, visit_descriptor_owned);
accept!(Assignment, visit_assignment, visit_assignment_owned);
accept!(Definition, visit_definition, visit_definition_owned);
accept!(ClassDeclaration, visit_class_declaration, visit_class_declaration_owned);
accept!(OverDeclaration, visit_over_declaration, visit_over_declaration_owned);
accept!(VariantSet, visit_variant_set, visit_variant_set_owned);
accept!(Variant, visit_variant, visit_variant_owned);
accept!(Declaration, visit_declaration, visit_declaration_owned);
accept!(ObjectValue, visit_object_value, visit_object_value_owned);
accept!(
    ExternalReferenceImport,
    visit_external_reference_import,
    visit_external_reference_import_owned
);
accept!(Path, visit_path, visit_path_owned);

impl<'d> Accept<'d> for Statement<'d> {
    fn accept<V: Visitor<'d> + ?Sized>(&self, visitor: &mut V) -> Result<()> {
        match self {
            Statement::Definition(node) => node.accept(visitor),
            Statement::ClassDeclaration(node) => node.accept(visitor),
            Statement::OverDeclaration(node) => node.accept(visitor),
            Statement::VariantSet(node) => node.accept(visitor),
        }
    }

    fn accept_owned<V: Visitor<'d> + ?Sized>(self, visitor: &mut V) -> Result<()> {
        match self {
            Statement::Definition(node) => node.accept_owned(visitor),
            Statement::ClassDeclaration(node) => node.accept_owned(visitor),
            Statement::OverDeclaration(node) => node.accept_owned(visitor),
            Statement::VariantSet(node) => node.accept_owned(visitor),
        }
    }
}

impl<'d> Accept<'d> for DefinitionStatement<'d> {
    fn accept<V: Visitor<'d> + ?Sized>(&self, visitor: &mut V) -> Result<()> {
        match self {
            DefinitionStatement::Statement(statement) => statement.accept(visitor),
            DefinitionStatement::Declaration(declaration) => declaration.accept(visitor),
        }
    }

    fn accept_owned<V: Visitor<'d> + ?Sized>(self, visitor: &mut V) -> Result<()> {
        match self {
            DefinitionStatement::Statement(statement) => statement.accept_owned(visitor),
            DefinitionStatement::Declaration(declaration) => declaration.accept_owned(visitor),
        }
    }
}

impl<'d> Accept<'d> for Value<'d> {
    fn accept<V: Visitor<'d> + ?Sized>(&self, visitor: &mut V) -> Result<()> {
        match self {
            Value::Bool(value) => visitor.visit_bool(*value),
            Value::Number(value) => visitor.visit_number(*value),
            Value::String(value) => visitor.visit_string(*value),
            Value::Path(node) => node.accept(visitor),
            Value::ConstValues(values) => visitor.visit_const_values(values),
            Value::ObjectValue(node) => node.accept(visitor),
            Value::ExternalReferenceImport(node) => node.accept(visitor),
        }
    }

    fn accept_owned<V: Visitor<'d> + ?Sized>(self, visitor: &mut V) -> Result<()> {
        match self {
            Value::Bool(value) => visitor.visit_bool(value),
            Value::Number(value) => visitor.visit_number(value),
            Value::String(value) => visitor.visit_string(value),
            Value::Path(node) => node.accept_owned(visitor),
            Value::ConstValues(values) => visitor.visit_const_values_owned(values),
            Value::ObjectValue(node) => node.accept_owned(visitor),
            Value::ExternalReferenceImport(node) => node.accept_owned(visitor),
        }
    }
}

/// Counts of what a [`Validator`] walked through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    pub prims: usize,
    pub variant_sets: usize,
    pub declarations: usize,
    pub assignments: usize,
    pub values: usize,
}

/// Visits every node of a subtree, which rebuilds and so validates each
/// of them.
#[derive(Debug, Default)]
pub struct Validator {
    report: Report,
}

impl Validator {
    pub fn report(&self) -> Report {
        self.report
    }
}

impl<'d> Visitor<'d> for Validator {
    fn visit_assignment(&mut self, node: &Assignment<'d>) -> Result<()> {
        self.report.assignments += 1;
        walk_assignment(self, node)
    }

    fn visit_definition(&mut self, node: &Definition<'d>) -> Result<()> {
        self.report.prims += 1;
        walk_prim(self, node)
    }

    fn visit_class_declaration(&mut self, node: &ClassDeclaration<'d>) -> Result<()> {
        self.report.prims += 1;
        walk_prim(self, node)
    }

    fn visit_over_declaration(&mut self, node: &OverDeclaration<'d>) -> Result<()> {
        self.report.prims += 1;
        walk_prim(self, node)
    }

    fn visit_variant_set(&mut self, node: &VariantSet<'d>) -> Result<()> {
        self.report.variant_sets += 1;
        walk_variant_set(self, node)
    }

    fn visit_declaration(&mut self, node: &Declaration<'d>) -> Result<()> {
        self.report.declarations += 1;
        walk_declaration(self, node)
    }

    fn visit_path(&mut self, node: &Path<'d>) -> Result<()> {
        self.report.values += 1;
        node.get_path()?;
        Ok(())
    }

    fn visit_external_reference_import(
        &mut self,
        node: &ExternalReferenceImport<'d>,
    ) -> Result<()> {
        self.report.values += 1;
        node.get_field()?;
        node.get_import_path()?;
        Ok(())
    }

    fn visit_object_value(&mut self, node: &ObjectValue<'d>) -> Result<()> {
        self.report.values += 1;
        walk_object_value(self, node)
    }

    fn visit_const_values(&mut self, values: &ConstValues<'d>) -> Result<()> {
        self.report.values += 1;
        walk_const_values(self, values)
    }

    fn visit_bool(&mut self, _value: bool) -> Result<()> {
        self.report.values += 1;
        Ok(())
    }

    fn visit_number(&mut self, _value: Number) -> Result<()> {
        self.report.values += 1;
        Ok(())
    }

    fn visit_string(&mut self, _value: &'d str) -> Result<()> {
        self.report.values += 1;
        Ok(())
    }
}

/// Rebuilds every node below `file`, failing on the first malformed one.
pub fn validate(file: &File<'_>) -> Result<Report> {
    let mut validator = Validator::default();
    file.accept(&mut validator)?;
    Ok(validator.report())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::utils::Document;
    use serde_json::json;

    fn scene(radius: serde_json::Value) -> Document {
        Document::from_json(
            &json!({
                "type": "File",
                "descriptor": {
                    "type": "Descriptor",
                    "description": null,
                    "assignments": [
                        {"type": "Assignment", "keyword": null, "field": "upAxis", "value": "Y"},
                    ],
                },
                "statements": [{
                    "type": "Definition",
                    "primType": "Sphere",
                    "name": "ball",
                    "descriptor": null,
                    "statements": [{
                        "type": "Declaration",
                        "keyword": null,
                        "valueType": "double",
                        "field": "radius",
                        "value": radius,
                        "descriptor": null,
                    }],
                }],
            }),
            100_020,
        )
    }

    #[test]
    fn validator_counts_nodes() {
        let document = scene(json!([1, 2.5]));
        let file = File::from_root(&document).unwrap();
        assert_eq!(
            validate(&file),
            Ok(Report {
                prims: 1,
                variant_sets: 0,
                declarations: 1,
                assignments: 1,
                values: 4,
            })
        );
    }

    #[test]
    fn validator_reports_malformed_nodes() {
        let document = scene(json!({"type": "Path", "path": 3}));
        let file = File::from_root(&document).unwrap();
        assert_eq!(
            validate(&file),
            Err(Error::WrongValue {
                expected: "a string",
                found: "uint".to_string(),
            })
        );
    }

    #[derive(Default)]
    struct Owner {
        owned: Vec<String>,
    }

    impl<'d> Visitor<'d> for Owner {
        fn visit_definition_owned(&mut self, node: Definition<'d>) -> Result<()> {
            self.owned.push(node.get_name()?.to_string());
            walk_prim(self, &node)
        }

        fn visit_declaration_owned(&mut self, node: Declaration<'d>) -> Result<()> {
            self.owned.push(node.get_field()?.to_string());
            Ok(())
        }
    }

    #[test]
    fn walks_hand_children_over() {
        let document = scene(json!(1.0));
        let file = File::from_root(&document).unwrap();
        let mut owner = Owner::default();
        file.accept_owned(&mut owner).unwrap();
        assert_eq!(owner.owned, vec!["ball", "radius"]);
    }
}
