//! Owned scene description built from a syntax tree.
//!
//! [`SceneImporter`] takes nodes over through the `visit_*_owned` methods
//! and copies what they hold into plain data that outlives the document.
//! Its borrowing visits hand a copy of the node to the owned ones, so
//! `accept` and `accept_owned` import the same scene.

use indexmap::IndexMap;

use crate::declaration::Declaration;
use crate::declaration_keyword::DeclarationKeyword;
use crate::descriptor::Descriptor;
use crate::error::Result;
use crate::file::File;
use crate::prim::{ClassDeclaration, Definition, OverDeclaration, PrimStatement, Specifier};
use crate::value::{Number, Value};
use crate::variant_set::VariantSet;
use crate::visitor::{walk_array, Accept, Visitor};

#[derive(Debug, Clone, PartialEq)]
pub enum SceneValue {
    Bool(bool),
    Number(Number),
    String(String),
    Path(String),
    List(Vec<SceneValue>),
    Dictionary(IndexMap<String, Attribute>),
    Reference {
        field: Option<String>,
        import_path: String,
    },
}

impl SceneValue {
    pub fn from_value(value: Value<'_>) -> Result<Self> {
        Ok(match value {
            Value::Bool(b) => SceneValue::Bool(b),
            Value::Number(number) => SceneValue::Number(number),
            Value::String(s) => SceneValue::String(s.to_string()),
            Value::Path(path) => SceneValue::Path(path.get_path()?.to_string()),
            Value::ConstValues(values) => SceneValue::List(
                values
                    .into_iter()
                    .map(SceneValue::from_value)
                    .collect::<Result<_>>()?,
            ),
            Value::ObjectValue(object) => {
                let mut entries = IndexMap::new();
                for declaration in object.get_declarations()? {
                    let (field, attribute) = import_declaration(&declaration?)?;
                    entries.insert(field, attribute);
                }
                SceneValue::Dictionary(entries)
            }
            Value::ExternalReferenceImport(reference) => SceneValue::Reference {
                field: reference.get_field()?.map(str::to_string),
                import_path: reference.get_import_path()?.to_string(),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metadatum {
    pub keyword: Option<DeclarationKeyword>,
    pub value: SceneValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub description: Option<String>,
    pub entries: IndexMap<String, Metadatum>,
}

impl Metadata {
    pub fn get(&self, field: &str) -> Option<&SceneValue> {
        self.entries.get(field).map(|entry| &entry.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub keyword: Option<DeclarationKeyword>,
    pub value_type: Option<String>,
    pub value: Option<SceneValue>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantSetSpec {
    pub keyword: Option<DeclarationKeyword>,
    /// Variant bodies, each held as an `over` of the owning prim.
    pub variants: IndexMap<String, Prim>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prim {
    pub specifier: Specifier,
    pub type_name: Option<String>,
    pub name: String,
    pub metadata: Metadata,
    pub attributes: IndexMap<String, Attribute>,
    pub children: Vec<Prim>,
    pub variant_sets: IndexMap<String, VariantSetSpec>,
}

impl Prim {
    pub fn new(specifier: Specifier, name: impl Into<String>, type_name: Option<String>) -> Self {
        Self {
            specifier,
            type_name,
            name: name.into(),
            metadata: Metadata::default(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            variant_sets: IndexMap::new(),
        }
    }

    pub fn child(&self, name: &str) -> Option<&Prim> {
        self.children.iter().find(|child| child.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub metadata: Metadata,
    /// Pseudo-root holding the root prims and any root-level properties.
    pub root: Prim,
}

impl Scene {
    pub fn prims(&self) -> &[Prim] {
        &self.root.children
    }

    /// Looks a prim up by its scene path, e.g. `/World/Ball`.
    pub fn find(&self, path: &str) -> Option<&Prim> {
        path.strip_prefix('/')?
            .split('/')
            .try_fold(&self.root, |prim, name| prim.child(name))
    }
}

#[derive(Debug)]
pub struct SceneImporter {
    metadata: Metadata,
    root: Prim,
    open: Vec<Prim>,
}

impl Default for SceneImporter {
    fn default() -> Self {
        Self {
            metadata: Metadata::default(),
            root: Prim::new(Specifier::Def, "", None),
            open: Vec::new(),
        }
    }
}

impl SceneImporter {
    pub fn finish(self) -> Scene {
        Scene {
            metadata: self.metadata,
            root: self.root,
        }
    }

    fn current(&mut self) -> &mut Prim {
        match self.open.last_mut() {
            Some(prim) => prim,
            None => &mut self.root,
        }
    }

    fn import_prim<'d, P: PrimStatement<'d>>(&mut self, node: P) -> Result<()> {
        let type_name = node.get_prim_type()?.map(str::to_string);
        let mut prim = Prim::new(node.specifier(), node.get_name()?, type_name);
        prim.metadata = import_metadata(node.get_descriptor()?)?;
        self.open.push(prim);
        walk_array(self, node.get_statements()?)?;
        if let Some(prim) = self.open.pop() {
            self.current().children.push(prim);
        }
        Ok(())
    }
}

fn import_metadata(descriptor: Option<Descriptor<'_>>) -> Result<Metadata> {
    let Some(descriptor) = descriptor else {
        return Ok(Metadata::default());
    };
    let mut metadata = Metadata {
        description: descriptor.get_description()?.map(str::to_string),
        entries: IndexMap::new(),
    };
    for assignment in descriptor.get_assignments()? {
        let assignment = assignment?;
        metadata.entries.insert(
            assignment.get_field()?.to_string(),
            Metadatum {
                keyword: assignment.get_keyword()?,
                value: SceneValue::from_value(assignment.get_value()?)?,
            },
        );
    }
    Ok(metadata)
}

fn import_declaration(node: &Declaration<'_>) -> Result<(String, Attribute)> {
    let attribute = Attribute {
        keyword: node.get_keyword()?,
        value_type: node.get_value_type()?.map(str::to_string),
        value: node.get_value()?.map(SceneValue::from_value).transpose()?,
        metadata: import_metadata(node.get_descriptor()?)?,
    };
    Ok((node.get_field()?.to_string(), attribute))
}

impl<'d> Visitor<'d> for SceneImporter {
    fn visit_file(&mut self, node: &File<'d>) -> Result<()> {
        self.visit_file_owned(*node)
    }

    fn visit_definition(&mut self, node: &Definition<'d>) -> Result<()> {
        self.visit_definition_owned(*node)
    }

    fn visit_class_declaration(&mut self, node: &ClassDeclaration<'d>) -> Result<()> {
        self.visit_class_declaration_owned(*node)
    }

    fn visit_over_declaration(&mut self, node: &OverDeclaration<'d>) -> Result<()> {
        self.visit_over_declaration_owned(*node)
    }

    fn visit_variant_set(&mut self, node: &VariantSet<'d>) -> Result<()> {
        self.visit_variant_set_owned(*node)
    }

    fn visit_declaration(&mut self, node: &Declaration<'d>) -> Result<()> {
        self.visit_declaration_owned(*node)
    }

    fn visit_file_owned(&mut self, node: File<'d>) -> Result<()> {
        self.metadata = import_metadata(node.get_descriptor()?)?;
        walk_array(self, node.get_statements()?)
    }

    fn visit_definition_owned(&mut self, node: Definition<'d>) -> Result<()> {
        self.import_prim(node)
    }

    fn visit_class_declaration_owned(&mut self, node: ClassDeclaration<'d>) -> Result<()> {
        self.import_prim(node)
    }

    fn visit_over_declaration_owned(&mut self, node: OverDeclaration<'d>) -> Result<()> {
        self.import_prim(node)
    }

    fn visit_variant_set_owned(&mut self, node: VariantSet<'d>) -> Result<()> {
        let mut set = VariantSetSpec {
            keyword: node.get_keyword()?,
            variants: IndexMap::new(),
        };
        for variant in node.get_variants()? {
            let variant = variant?;
            let mut body = Prim::new(Specifier::Over, variant.get_name()?, None);
            body.metadata = import_metadata(variant.get_descriptor()?)?;
            self.open.push(body);
            walk_array(self, variant.get_statements()?)?;
            if let Some(body) = self.open.pop() {
                set.variants.insert(body.name.clone(), body);
            }
        }
        self.current()
            .variant_sets
            .insert(node.get_name()?.to_string(), set);
        Ok(())
    }

    fn visit_declaration_owned(&mut self, node: Declaration<'d>) -> Result<()> {
        let (field, attribute) = import_declaration(&node)?;
        self.current().attributes.insert(field, attribute);
        Ok(())
    }
}

/// Builds the owned scene of `file`.
pub fn import(file: File<'_>) -> Result<Scene> {
    let mut importer = SceneImporter::default();
    file.accept_owned(&mut importer)?;
    Ok(importer.finish())
}
