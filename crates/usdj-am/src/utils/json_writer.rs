use std::fmt;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value as Json};

use crate::array::Array;
use crate::assignment::Assignment;
use crate::declaration::Declaration;
use crate::declaration_keyword::DeclarationKeyword;
use crate::descriptor::Descriptor;
use crate::error::Result;
use crate::external_reference_import::ExternalReferenceImport;
use crate::file::File;
use crate::node::{AstNode, FromItem};
use crate::object_value::ObjectValue;
use crate::path::Path;
use crate::prim::{ClassDeclaration, Definition, OverDeclaration, PrimStatement};
use crate::value::{ConstValues, Number};
use crate::value_type::ValueType;
use crate::variant_set::{Variant, VariantSet};
use crate::visitor::{Accept, Visitor};

/// One level of indentation: `width` copies of `fill`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indenter {
    pub fill: char,
    pub width: usize,
}

impl Indenter {
    pub fn new(fill: char, width: usize) -> Self {
        Self { fill, width }
    }

    pub fn unit(&self) -> String {
        std::iter::repeat(self.fill).take(self.width).collect()
    }
}

impl Default for Indenter {
    fn default() -> Self {
        Self::new(' ', 2)
    }
}

/// Visitor that renders a subtree as USDA JSON.
///
/// Properties come out in schema order after `"type"`, with `null` for
/// absent nullable properties.
#[derive(Debug, Default)]
pub struct JsonWriter {
    indenter: Indenter,
    stack: Vec<Json>,
}

impl JsonWriter {
    pub fn new(indenter: Indenter) -> Self {
        Self {
            indenter,
            stack: Vec::new(),
        }
    }

    pub fn indenter(&self) -> Indenter {
        self.indenter
    }

    /// The most recently rendered value.
    pub fn value(&self) -> Option<&Json> {
        self.stack.last()
    }

    pub fn into_value(mut self) -> Option<Json> {
        self.stack.pop()
    }

    fn emit(&mut self, value: Json) -> Result<()> {
        self.stack.push(value);
        Ok(())
    }

    fn render<'d, T: Accept<'d>>(&mut self, node: T) -> Result<Json> {
        node.accept_owned(self)?;
        Ok(self.stack.pop().unwrap_or(Json::Null))
    }

    fn render_optional<'d, T: Accept<'d>>(&mut self, node: Option<T>) -> Result<Json> {
        match node {
            Some(node) => self.render(node),
            None => Ok(Json::Null),
        }
    }

    fn render_array<'d, T>(&mut self, array: Array<'d, T>) -> Result<Json>
    where
        T: FromItem<'d> + Accept<'d>,
    {
        let mut elements = Vec::with_capacity(array.len());
        for element in array.iter() {
            elements.push(self.render(element?)?);
        }
        Ok(Json::Array(elements))
    }

    fn render_prim<'d, P: PrimStatement<'d>>(&mut self, node: &P) -> Result<()> {
        let prim_type = optional_str(node.get_prim_type()?);
        let name = Json::from(node.get_name()?);
        let descriptor = self.render_optional(node.get_descriptor()?)?;
        let statements = self.render_array(node.get_statements()?)?;
        self.emit(typed(
            <P as AstNode<'d>>::TYPE,
            [
                ("primType", prim_type),
                ("name", name),
                ("descriptor", descriptor),
                ("statements", statements),
            ],
        ))
    }
}

fn typed<const N: usize>(value_type: ValueType, properties: [(&str, Json); N]) -> Json {
    let mut map = Map::with_capacity(N + 1);
    map.insert("type".to_string(), Json::from(value_type.as_str()));
    for (name, value) in properties {
        map.insert(name.to_string(), value);
    }
    Json::Object(map)
}

fn optional_str(value: Option<&str>) -> Json {
    value.map_or(Json::Null, Json::from)
}

fn optional_keyword(keyword: Option<DeclarationKeyword>) -> Json {
    keyword.map_or(Json::Null, |keyword| Json::from(keyword.as_str()))
}

impl<'d> Visitor<'d> for JsonWriter {
    fn visit_file(&mut self, node: &File<'d>) -> Result<()> {
        let descriptor = self.render_optional(node.get_descriptor()?)?;
        let statements = self.render_array(node.get_statements()?)?;
        self.emit(typed(
            ValueType::File,
            [("descriptor", descriptor), ("statements", statements)],
        ))
    }

    fn visit_descriptor(&mut self, node: &Descriptor<'d>) -> Result<()> {
        let description = optional_str(node.get_description()?);
        let assignments = self.render_array(node.get_assignments()?)?;
        self.emit(typed(
            ValueType::Descriptor,
            [("description", description), ("assignments", assignments)],
        ))
    }

    fn visit_assignment(&mut self, node: &Assignment<'d>) -> Result<()> {
        let keyword = optional_keyword(node.get_keyword()?);
        let field = Json::from(node.get_field()?);
        let value = self.render(node.get_value()?)?;
        self.emit(typed(
            ValueType::Assignment,
            [("keyword", keyword), ("field", field), ("value", value)],
        ))
    }

    fn visit_definition(&mut self, node: &Definition<'d>) -> Result<()> {
        self.render_prim(node)
    }

    fn visit_class_declaration(&mut self, node: &ClassDeclaration<'d>) -> Result<()> {
        self.render_prim(node)
    }

    fn visit_over_declaration(&mut self, node: &OverDeclaration<'d>) -> Result<()> {
        self.render_prim(node)
    }

    fn visit_variant_set(&mut self, node: &VariantSet<'d>) -> Result<()> {
        let keyword = optional_keyword(node.get_keyword()?);
        let name = Json::from(node.get_name()?);
        let variants = self.render_array(node.get_variants()?)?;
        self.emit(typed(
            ValueType::VariantSet,
            [("keyword", keyword), ("name", name), ("variants", variants)],
        ))
    }

    fn visit_variant(&mut self, node: &Variant<'d>) -> Result<()> {
        let name = Json::from(node.get_name()?);
        let descriptor = self.render_optional(node.get_descriptor()?)?;
        let statements = self.render_array(node.get_statements()?)?;
        self.emit(typed(
            ValueType::Variant,
            [
                ("name", name),
                ("descriptor", descriptor),
                ("statements", statements),
            ],
        ))
    }

    fn visit_declaration(&mut self, node: &Declaration<'d>) -> Result<()> {
        let keyword = optional_keyword(node.get_keyword()?);
        let value_type = optional_str(node.get_value_type()?);
        let field = Json::from(node.get_field()?);
        let value = self.render_optional(node.get_value()?)?;
        let descriptor = self.render_optional(node.get_descriptor()?)?;
        self.emit(typed(
            ValueType::Declaration,
            [
                ("keyword", keyword),
                ("valueType", value_type),
                ("field", field),
                ("value", value),
                ("descriptor", descriptor),
            ],
        ))
    }

    fn visit_object_value(&mut self, node: &ObjectValue<'d>) -> Result<()> {
        let declarations = self.render_array(node.get_declarations()?)?;
        self.emit(typed(
            ValueType::ObjectValue,
            [("declarations", declarations)],
        ))
    }

    fn visit_external_reference_import(
        &mut self,
        node: &ExternalReferenceImport<'d>,
    ) -> Result<()> {
        let field = optional_str(node.get_field()?);
        let import_path = Json::from(node.get_import_path()?);
        self.emit(typed(
            ValueType::ExternalReferenceImport,
            [("field", field), ("importPath", import_path)],
        ))
    }

    fn visit_path(&mut self, node: &Path<'d>) -> Result<()> {
        let path = Json::from(node.get_path()?);
        self.emit(typed(ValueType::Path, [("path", path)]))
    }

    fn visit_const_values(&mut self, values: &ConstValues<'d>) -> Result<()> {
        let mut elements = Vec::with_capacity(values.len());
        for value in values {
            elements.push(self.render(value.clone())?);
        }
        self.emit(Json::Array(elements))
    }

    fn visit_bool(&mut self, value: bool) -> Result<()> {
        self.emit(Json::Bool(value))
    }

    fn visit_number(&mut self, value: Number) -> Result<()> {
        self.emit(value.to_json())
    }

    fn visit_string(&mut self, value: &'d str) -> Result<()> {
        self.emit(Json::from(value))
    }
}

/// Pretty-prints the most recently rendered value; nothing if there is
/// none yet.
impl fmt::Display for JsonWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(value) = self.value() else {
            return Ok(());
        };
        let indent = self.indenter.unit();
        let mut out = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
        value.serialize(&mut serializer).map_err(|_| fmt::Error)?;
        f.write_str(std::str::from_utf8(&out).map_err(|_| fmt::Error)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Document;
    use serde_json::json;

    fn render(source: &Json, indenter: Indenter) -> String {
        let document = Document::from_json(source, 100_030);
        let file = File::from_root(&document).unwrap();
        let mut writer = JsonWriter::new(indenter);
        file.accept(&mut writer).unwrap();
        writer.to_string()
    }

    fn source() -> Json {
        json!({
            "type": "File",
            "descriptor": null,
            "statements": [{
                "type": "OverDeclaration",
                "primType": null,
                "name": "Ball",
                "descriptor": null,
                "statements": [{
                    "type": "Declaration",
                    "keyword": "uniform",
                    "valueType": "token[]",
                    "field": "xformOpOrder",
                    "value": ["xformOp:translate"],
                    "descriptor": null,
                }],
            }],
        })
    }

    #[test]
    fn renders_the_source_tree() {
        let source = source();
        let output = render(&source, Indenter::default());
        assert_eq!(serde_json::from_str::<Json>(&output).unwrap(), source);
        assert_eq!(output, serde_json::to_string_pretty(&source).unwrap());
    }

    #[test]
    fn honors_the_indenter() {
        let output = render(&source(), Indenter::new('\t', 1));
        assert!(output.starts_with("{\n\t\"type\": \"File\",\n\t\"descriptor\": null,"));
        assert_eq!(Indenter::new('-', 3).unit(), "---");
    }

    #[test]
    fn empty_writer_renders_nothing() {
        let writer = JsonWriter::default();
        assert_eq!(writer.to_string(), "");
        assert_eq!(writer.indenter(), Indenter::default());
        assert!(writer.into_value().is_none());
    }

    #[test]
    fn reorders_properties_into_schema_order() {
        let source = json!({
            "statements": [],
            "descriptor": null,
            "type": "File",
        });
        let output = render(&source, Indenter::default());
        assert_eq!(
            output,
            "{\n  \"type\": \"File\",\n  \"descriptor\": null,\n  \"statements\": []\n}"
        );
    }
}
