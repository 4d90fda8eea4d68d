//! Code synthesis from an interface document.
//!
//! The inverse of extraction: turns a document back into two generated-code
//! trees, one for the type definitions and one for the function stubs. The
//! dialect decides the framework surface (imports, base class, decorators,
//! top-level statements); everything else comes from the document in its
//! stored order.

use crate::ast::{Annotation, Assign, Callable, Expr, Field, Import, Module, Param, Stmt, TypeDef};
use crate::codec::encode;
use crate::dialect::Dialect;
use crate::document::{ComponentSchema, Document, Property};

/// Synthesizer from documents to generated-code trees.
#[derive(Debug, Clone)]
pub struct CodeSynthesizer {
    dialect: Dialect,
}

impl CodeSynthesizer {
    /// Create a synthesizer for the given dialect.
    pub fn new(dialect: Dialect) -> Self {
        CodeSynthesizer { dialect }
    }

    /// Synthesize the type-definitions module from the document's schemas.
    pub fn models_module(&self, document: &Document) -> Module {
        let mut module = Module::default();
        module.items.push(future_import());
        for import in &self.dialect.imports {
            module.items.push(Stmt::Import(import.clone()));
        }

        for (name, schema) in &document.components.schemas {
            module.items.push(Stmt::TypeDef(self.type_def(name, schema)));
        }

        module
    }

    /// Synthesize the function-stubs module from the document's operations.
    ///
    /// The stubs import the generated type definitions from `models_module`
    /// (a sibling module name, without extension). `is_async` makes every
    /// stub suspend-capable.
    pub fn functions_module(
        &self,
        document: &Document,
        app_name: &str,
        models_module: &str,
        is_async: bool,
    ) -> Module {
        let mut module = Module {
            doc: document.info.description.clone(),
            items: Vec::new(),
        };

        module.items.push(future_import());
        for import in &self.dialect.imports {
            module.items.push(Stmt::Import(import.clone()));
        }
        if self.dialect.use_logger {
            module.items.push(Stmt::Import(Import::Plain("logging".to_string())));
        }

        let schema_names: Vec<String> = document.components.schemas.keys().cloned().collect();
        if !schema_names.is_empty() {
            module.items.push(Stmt::Import(Import::from_module(
                format!(".{models_module}"),
                schema_names,
            )));
        }

        for assign in &self.dialect.top_level {
            module.items.push(Stmt::Assign(assign.clone()));
        }
        if self.dialect.use_logger {
            module.items.push(Stmt::Assign(Assign {
                target: "logger".to_string(),
                value: Expr::name("logging")
                    .attr("getLogger")
                    .call(vec![Expr::Str(app_name.to_string())]),
            }));
        }

        for (name, operation) in &document.components.operations {
            if let Some(stub) = self.function_stub(document, name, &operation.description, is_async)
            {
                module.items.push(Stmt::Callable(stub));
            }
        }

        module
    }

    /// Rebuild one type definition from a component schema.
    fn type_def(&self, name: &str, schema: &ComponentSchema) -> TypeDef {
        let base = self
            .dialect
            .base_class
            .clone()
            .unwrap_or_else(|| schema.base_class.clone());

        let fields = schema
            .properties
            .iter()
            .map(|(field_name, property)| Field {
                name: field_name.clone(),
                annotation: field_annotation(
                    property,
                    schema.required.iter().any(|r| r == field_name),
                ),
            })
            .collect();

        TypeDef {
            name: name.to_string(),
            base: Some(base),
            fields,
        }
    }

    /// Rebuild one function stub from its operation description and
    /// request/response message pair. An operation with either message
    /// missing produces no stub.
    fn function_stub(
        &self,
        document: &Document,
        name: &str,
        description: &str,
        is_async: bool,
    ) -> Option<Callable> {
        let request = document.request_message(name)?;
        let response = document.response_message(name)?;

        let required = request.payload.required_names();
        let params = request
            .payload
            .properties
            .as_ref()
            .map(|properties| {
                properties
                    .iter()
                    .map(|(param_name, property)| Param {
                        name: param_name.clone(),
                        annotation: Some(field_annotation(
                            property,
                            required.iter().any(|r| r == param_name),
                        )),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let returns = if response.payload.is_empty_shape() {
            Annotation::None
        } else {
            field_annotation(&response.payload, response.payload.is_marked_required())
        };

        let doc = if description.is_empty() {
            None
        } else {
            Some(description.to_string())
        };

        let decorators = self
            .dialect
            .decorator
            .as_ref()
            .map(|template| vec![template.bind(name)])
            .unwrap_or_default();

        Some(Callable {
            name: name.to_string(),
            params,
            returns: Some(returns),
            doc,
            decorators,
            is_async,
        })
    }
}

fn future_import() -> Stmt {
    Stmt::Import(Import::from_module("__future__", ["annotations"]))
}

/// Encode a property back to an annotation, re-adding the `| None`
/// alternative that the forward direction dropped for optional slots.
fn field_annotation(property: &Property, required: bool) -> Annotation {
    let annotation = encode(property);
    if required {
        annotation
    } else {
        annotation.optional()
    }
}
