//! # zen-gen
//!
//! A bidirectional bridge between annotated type and function definitions and
//! an AsyncAPI-shaped interface document.
//!
//! The forward direction parses a models file and a functions file, decodes
//! every type annotation into a list of alternatives, aggregates the list
//! into a schema property, and assembles the result into a document. The
//! reverse direction loads a document, encodes each property back into an
//! annotation, synthesizes two generated-code trees under a chosen output
//! dialect, and renders them to source text.
//!
//! ## Architecture
//!
//! - [`ast`] - Annotation and generated-code tagged unions
//! - [`types`] - The `TypeExpr` algebra and the primitive name table
//! - [`codec`] - `decode` / `aggregate` / `encode` between annotations and properties
//! - [`docblock`] - `Args:` / `Returns:` doc-block extraction
//! - [`parser`] - Line-oriented source parser for the bridged syntax
//! - [`extractor`] - Class and function definitions to schemas and messages
//! - [`document`] - Serde model of the interface document
//! - [`assembler`] - Extraction results to a whole document, full or schemas-only
//! - [`dialect`] - Output dialect presets and the name registry
//! - [`synthesizer`] - Document back to generated-code trees
//! - [`printer`] - Generated-code trees to source text
//! - [`error`] - Error types and handling
//!
//! ## Quick Start
//!
//! ```rust
//! use zen_gen::{
//!     DocumentAssembler, DocumentProfile, SchemaExtractor, SourceParser,
//! };
//!
//! let parser = SourceParser::new();
//! let models = parser.parse_module("class Pet:\n    name: str\n").unwrap();
//! let functions = parser
//!     .parse_module("def get_pet(pet_id: int) -> Pet: ...\n")
//!     .unwrap();
//!
//! let extractor = SchemaExtractor::new();
//! let document = DocumentAssembler::new(DocumentProfile::Full).assemble(
//!     "PetStore",
//!     extractor.component_schemas(&models),
//!     extractor.extract_functions(&functions),
//! );
//! assert_eq!(document.asyncapi, "3.0.0");
//! ```

pub mod assembler;
pub mod ast;
pub mod codec;
pub mod dialect;
pub mod docblock;
pub mod document;
pub mod error;
pub mod extractor;
pub mod parser;
pub mod printer;
pub mod synthesizer;
pub mod types;

// Re-export main types for convenience
pub use assembler::{DocumentAssembler, DocumentProfile};
pub use dialect::Dialect;
pub use document::Document;
pub use error::{DialectError, ParseError};
pub use extractor::SchemaExtractor;
pub use parser::SourceParser;
pub use printer::render_module;
pub use synthesizer::CodeSynthesizer;
pub use types::TypeExpr;
