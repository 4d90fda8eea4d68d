//! Schema and message extraction from parsed definitions.
//!
//! Walks a parsed module and turns class definitions into component schemas
//! and function definitions into request/response message schemas, using the
//! annotation codec and the doc-block parser. Extraction happens once per
//! pass; the results are handed to the assembler and never mutated.

use indexmap::IndexMap;

use crate::ast::{Callable, Module, Stmt, TypeDef};
use crate::codec::{aggregate, decode};
use crate::docblock::{parse_doc_block, raw_returns_text};
use crate::document::{ComponentSchema, Message, Property};

/// Everything extracted from a function-definitions module.
#[derive(Debug, Clone, Default)]
pub struct FunctionExtraction {
    /// The module-level documentation text, if present.
    pub module_doc: Option<String>,

    /// Request/response pairs per function, in definition order.
    pub functions: IndexMap<String, ExtractedFunction>,
}

/// The request/response message pair of one function.
#[derive(Debug, Clone)]
pub struct ExtractedFunction {
    pub request: Message,
    pub response: Message,

    /// Whether the source declared the function suspend-capable. Recorded
    /// for callers; the document itself does not carry it.
    pub is_async: bool,
}

/// Extractor over parsed modules.
#[derive(Debug, Default)]
pub struct SchemaExtractor;

impl SchemaExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        SchemaExtractor
    }

    /// Build component schemas from every class definition, in visitation
    /// order.
    pub fn component_schemas(&self, module: &Module) -> IndexMap<String, ComponentSchema> {
        let mut schemas = IndexMap::new();
        for item in &module.items {
            if let Stmt::TypeDef(typedef) = item {
                schemas.insert(typedef.name.clone(), self.class_schema(typedef));
            }
        }
        schemas
    }

    /// Build request/response messages from every function definition.
    pub fn extract_functions(&self, module: &Module) -> FunctionExtraction {
        let mut extraction = FunctionExtraction {
            module_doc: module.doc.clone(),
            functions: IndexMap::new(),
        };
        for item in &module.items {
            if let Stmt::Callable(callable) = item {
                let (request, response) = self.function_messages(callable);
                extraction.functions.insert(
                    callable.name.clone(),
                    ExtractedFunction {
                        request,
                        response,
                        is_async: callable.is_async,
                    },
                );
            }
        }
        extraction
    }

    /// Convert one class definition into a component schema.
    fn class_schema(&self, typedef: &TypeDef) -> ComponentSchema {
        let mut schema = ComponentSchema {
            base_class: typedef.base.clone().unwrap_or_else(|| "object".to_string()),
            ..ComponentSchema::default()
        };

        for field in &typedef.fields {
            let (property, required) = aggregate(&decode(&field.annotation));
            if required {
                schema.required.push(field.name.clone());
            }
            schema.properties.insert(field.name.clone(), property);
        }

        schema
    }

    /// Convert one function definition into its request/response messages.
    fn function_messages(&self, callable: &Callable) -> (Message, Message) {
        let docstring = callable.doc.clone().unwrap_or_default();
        let block = parse_doc_block(&docstring);

        // Request: object-shaped payload built from the parameters.
        let mut payload = Property::empty_object_payload();
        for param in &callable.params {
            let alternatives = param
                .annotation
                .as_ref()
                .map(decode)
                .unwrap_or_default();
            let (mut property, required) = aggregate(&alternatives);
            property.description = Some(block.param_description(&param.name));

            if required {
                if let Some(names) = payload.required.as_mut() {
                    names.push(param.name.clone());
                }
            }
            if let Some(properties) = payload.properties.as_mut() {
                properties.insert(param.name.clone(), property);
            }
        }

        let request = Message {
            title: format!("Request params for {}", callable.name),
            summary: String::new(),
            description: docstring.clone(),
            payload,
        };

        // Response: a bare property, not wrapped in an object.
        let return_alternatives = callable
            .returns
            .as_ref()
            .map(decode)
            .unwrap_or_default();
        let (mut response_payload, required) = aggregate(&return_alternatives);

        // The required marker only sticks to mapping-shaped payloads; a
        // scalar empty payload loses the signal (known asymmetry).
        if required && !response_payload.is_empty_shape() {
            response_payload.format = Some("required".to_string());
        }

        let response_description = block
            .returns
            .or_else(|| raw_returns_text(&docstring))
            .unwrap_or_default();

        let response = Message {
            title: format!("Response params for {}", callable.name),
            summary: String::new(),
            description: response_description,
            payload: response_payload,
        };

        (request, response)
    }
}
