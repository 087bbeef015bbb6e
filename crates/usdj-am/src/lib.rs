//! usdj-am: a typed USDA syntax tree over scenes stored in a JSON CRDT
//! document.
//!
//! A USDA file that was parsed into JSON and stored in a
//! [`usdj_am_crdt::Model`] is read back through the [`utils::Document`]
//! adapter. Every grammar production has a node type here that validates
//! its backing map object on construction and re-reads its properties on
//! every accessor call. Traversal goes through the [`visitor::Visitor`]
//! double-dispatch protocol.
//!
//! ```
//! use serde_json::json;
//! use usdj_am::utils::{Document, JsonWriter};
//! use usdj_am::{Accept, File};
//!
//! let document = Document::from_json(&json!({
//!     "type": "File",
//!     "descriptor": null,
//!     "statements": [],
//! }), 100_000);
//! let file = File::from_root(&document).unwrap();
//! let mut writer = JsonWriter::default();
//! file.accept(&mut writer).unwrap();
//! assert_eq!(writer.to_string(), "{\n  \"type\": \"File\",\n  \"descriptor\": null,\n  \"statements\": []\n}");
//! ```

pub mod array;
pub mod assignment;
pub mod convert;
pub mod declaration;
pub mod declaration_keyword;
pub mod definition_statement;
pub mod descriptor;
pub mod error;
pub mod external_reference_import;
pub mod file;
pub mod node;
pub mod object_value;
pub mod path;
pub mod prim;
pub mod scene;
pub mod statement;
pub mod utils;
pub mod value;
pub mod value_type;
pub mod variant_set;
pub mod visitor;

pub use array::{Array, ArrayIter};
pub use assignment::Assignment;
pub use declaration::Declaration;
pub use declaration_keyword::DeclarationKeyword;
pub use definition_statement::DefinitionStatement;
pub use descriptor::Descriptor;
pub use error::{Error, Result};
pub use external_reference_import::ExternalReferenceImport;
pub use file::File;
pub use node::{AstNode, FromItem, Node};
pub use object_value::ObjectValue;
pub use path::Path;
pub use prim::{ClassDeclaration, Definition, OverDeclaration, PrimStatement, Specifier};
pub use statement::Statement;
pub use value::{ConstValues, Number, Value};
pub use value_type::ValueType;
pub use variant_set::{Variant, VariantSet};
pub use visitor::{Accept, Visitor};
