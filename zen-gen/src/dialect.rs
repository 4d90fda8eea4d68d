//! Output dialects for code synthesis.
//!
//! A dialect bundles everything that varies between generated-code flavors:
//! the imports each module needs, the base class for type definitions, an
//! optional decorator template, optional top-level statements, and whether a
//! module logger is set up. Presets are plain values in a static registry;
//! nothing is loaded dynamically.

use crate::ast::{Assign, DecoratorTemplate, Expr, Import, PathSegment};
use crate::error::DialectError;

/// Names of the registered dialects, in registry order.
pub const DIALECT_NAMES: &[&str] = &["plain", "fastapi"];

/// A code-synthesis dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialect {
    /// Registry name of the dialect.
    pub name: &'static str,

    /// Base class override for generated type definitions. When absent the
    /// base recorded in the document is kept.
    pub base_class: Option<String>,

    /// Imports added to both generated modules.
    pub imports: Vec<Import>,

    /// Assignments emitted once at the top of the functions module.
    pub top_level: Vec<Assign>,

    /// Decorator applied to every generated function stub.
    pub decorator: Option<DecoratorTemplate>,

    /// Whether the functions module sets up a named logger.
    pub use_logger: bool,
}

impl Dialect {
    /// The plain preset: typed definitions with no framework surface.
    pub fn plain() -> Self {
        Dialect {
            name: "plain",
            base_class: None,
            imports: vec![Import::from_module("typing", ["TypedDict"])],
            top_level: Vec::new(),
            decorator: None,
            use_logger: true,
        }
    }

    /// The fastapi preset: pydantic models and route-decorated stubs.
    pub fn fastapi() -> Self {
        Dialect {
            name: "fastapi",
            base_class: Some("BaseModel".to_string()),
            imports: vec![
                Import::from_module("pydantic", ["BaseModel"]),
                Import::from_module("fastapi", ["FastAPI"]),
            ],
            top_level: vec![Assign {
                target: "app".to_string(),
                value: Expr::name("FastAPI").call(Vec::new()),
            }],
            decorator: Some(DecoratorTemplate {
                object: "app".to_string(),
                method: "get".to_string(),
                path: vec![
                    PathSegment::Literal("/".to_string()),
                    PathSegment::FunctionName,
                ],
            }),
            use_logger: true,
        }
    }

    /// Look up a dialect by registry name.
    pub fn resolve(name: &str) -> Result<Self, DialectError> {
        match name {
            "plain" => Ok(Self::plain()),
            "fastapi" => Ok(Self::fastapi()),
            _ => Err(DialectError::Unknown {
                name: name.to_string(),
                available: DIALECT_NAMES.join(", "),
            }),
        }
    }
}
