//! The TypeExpr algebra and the primitive name table.
//!
//! A surface annotation decodes to an ordered sequence of [`TypeExpr`]
//! alternatives (a flattened union). The five document primitives map
//! one-to-one onto source names; everything else is a schema reference.

/// The five document-side primitive types and their source-language names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Integer,
    Boolean,
    Array,
    Object,
}

impl Primitive {
    /// All primitives, in table order.
    pub const ALL: [Primitive; 5] = [
        Primitive::String,
        Primitive::Integer,
        Primitive::Boolean,
        Primitive::Array,
        Primitive::Object,
    ];

    /// The document-side name (`string`, `integer`, ...).
    pub fn document_name(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Integer => "integer",
            Primitive::Boolean => "boolean",
            Primitive::Array => "array",
            Primitive::Object => "object",
        }
    }

    /// The source-side name (`str`, `int`, ...).
    pub fn source_name(&self) -> &'static str {
        match self {
            Primitive::String => "str",
            Primitive::Integer => "int",
            Primitive::Boolean => "bool",
            Primitive::Array => "list",
            Primitive::Object => "object",
        }
    }

    /// Look up a source-side name in the table.
    pub fn from_source_name(name: &str) -> Option<Primitive> {
        Primitive::ALL
            .into_iter()
            .find(|p| p.source_name() == name)
    }

    /// Look up a document-side name in the table.
    pub fn from_document_name(name: &str) -> Option<Primitive> {
        Primitive::ALL
            .into_iter()
            .find(|p| p.document_name() == name)
    }
}

/// Map a document-side type name back to its source-side name.
///
/// Names outside the table pass through unchanged; this is how schema
/// reference names survive the reverse transform.
pub fn source_type_name(document_name: &str) -> String {
    match Primitive::from_document_name(document_name) {
        Some(primitive) => primitive.source_name().to_string(),
        None => document_name.to_string(),
    }
}

/// One alternative of a flattened union annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A table primitive.
    Primitive(Primitive),

    /// A reference to a named component schema.
    Reference(String),

    /// A `list[...]` with a single element type.
    List(Box<TypeExpr>),

    /// A `dict[key, value]`, captured as bare names only.
    Dict(String, String),

    /// The `None` alternative.
    Null,

    /// Partially decoded nested-container content.
    ///
    /// Only one level of container nesting is decoded; anything deeper lands
    /// here and aggregates to a plain object schema.
    Opaque(Vec<TypeExpr>),
}

impl TypeExpr {
    /// Classify a bare name as a primitive or a schema reference.
    pub fn from_name(name: &str) -> TypeExpr {
        match Primitive::from_source_name(name) {
            Some(primitive) => TypeExpr::Primitive(primitive),
            None => TypeExpr::Reference(name.to_string()),
        }
    }

    /// Whether this alternative is the null alternative.
    pub fn is_null(&self) -> bool {
        matches!(self, TypeExpr::Null)
    }
}
