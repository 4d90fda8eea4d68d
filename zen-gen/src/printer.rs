//! Rendering of generated-code trees to source text.
//!
//! A boundary module: the synthesizer produces trees, this prints them. The
//! output is stable line-oriented text with four-space indentation, one blank
//! line between the import block and any assignments, and two blank lines
//! before each definition.

use crate::ast::{Annotation, Callable, Expr, Import, Module, Stmt, SubscriptIndex, TypeDef};

const INDENT: &str = "    ";

/// Render a whole module to source text.
pub fn render_module(module: &Module) -> String {
    let mut out = String::new();

    if let Some(doc) = &module.doc {
        render_docstring(&mut out, doc, "");
        out.push('\n');
    }

    let mut previous: Option<&Stmt> = None;
    for item in &module.items {
        match item {
            Stmt::ModuleDoc(doc) => {
                render_docstring(&mut out, doc, "");
                out.push('\n');
            }
            Stmt::Import(import) => {
                out.push_str(&render_import(import));
                out.push('\n');
            }
            Stmt::Assign(assign) => {
                if matches!(previous, Some(Stmt::Import(_))) {
                    out.push('\n');
                }
                out.push_str(&format!(
                    "{} = {}\n",
                    assign.target,
                    render_expr(&assign.value)
                ));
            }
            Stmt::TypeDef(typedef) => {
                if previous.is_some() {
                    out.push_str("\n\n");
                }
                render_type_def(&mut out, typedef);
            }
            Stmt::Callable(callable) => {
                if previous.is_some() {
                    out.push_str("\n\n");
                }
                render_callable(&mut out, callable);
            }
        }
        previous = Some(item);
    }

    out
}

/// Render a single annotation expression.
pub fn render_annotation(annotation: &Annotation) -> String {
    match annotation {
        Annotation::Name(name) => name.clone(),
        Annotation::None => "None".to_string(),
        Annotation::Union(left, right) => {
            format!("{} | {}", render_annotation(left), render_annotation(right))
        }
        Annotation::Subscript { base, index } => {
            format!("{base}[{}]", render_subscript_index(index))
        }
        Annotation::Unsupported(text) => text.clone(),
    }
}

fn render_subscript_index(index: &SubscriptIndex) -> String {
    match index {
        SubscriptIndex::Name(name) => name.clone(),
        SubscriptIndex::Pair(key, value) => format!("{key}, {value}"),
        SubscriptIndex::Nested(inner) => render_annotation(inner),
        SubscriptIndex::Tuple(items) => items
            .iter()
            .map(render_annotation)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn render_import(import: &Import) -> String {
    match import {
        Import::Plain(module) => format!("import {module}"),
        Import::From { module, names } => {
            format!("from {module} import {}", names.join(", "))
        }
    }
}

fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::Name(name) => name.clone(),
        Expr::Str(text) => format!("\"{text}\""),
        Expr::Attribute { value, attr } => format!("{}.{attr}", render_expr(value)),
        Expr::Call { func, args } => {
            let rendered: Vec<String> = args.iter().map(render_expr).collect();
            format!("{}({})", render_expr(func), rendered.join(", "))
        }
    }
}

fn render_type_def(out: &mut String, typedef: &TypeDef) {
    match &typedef.base {
        Some(base) => out.push_str(&format!("class {}({base}):\n", typedef.name)),
        None => out.push_str(&format!("class {}:\n", typedef.name)),
    }

    if typedef.fields.is_empty() {
        out.push_str(INDENT);
        out.push_str("pass\n");
        return;
    }
    for field in &typedef.fields {
        out.push_str(&format!(
            "{INDENT}{}: {}\n",
            field.name,
            render_annotation(&field.annotation)
        ));
    }
}

fn render_callable(out: &mut String, callable: &Callable) {
    for decorator in &callable.decorators {
        out.push_str(&format!("@{}\n", render_expr(decorator)));
    }

    let keyword = if callable.is_async { "async def" } else { "def" };
    let params: Vec<String> = callable
        .params
        .iter()
        .map(|param| match &param.annotation {
            Some(annotation) => format!("{}: {}", param.name, render_annotation(annotation)),
            None => param.name.clone(),
        })
        .collect();

    out.push_str(&format!("{keyword} {}({})", callable.name, params.join(", ")));
    if let Some(returns) = &callable.returns {
        out.push_str(&format!(" -> {}", render_annotation(returns)));
    }
    out.push_str(":\n");

    if let Some(doc) = &callable.doc {
        render_docstring(out, doc, INDENT);
    }
    out.push_str(INDENT);
    out.push_str("...\n");
}

/// Render a docstring, inline when single-line and block-shaped otherwise.
fn render_docstring(out: &mut String, doc: &str, indent: &str) {
    if doc.contains('\n') {
        out.push_str(&format!("{indent}\"\"\"\n"));
        for line in doc.lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                out.push_str(&format!("{indent}{line}\n"));
            }
        }
        out.push_str(&format!("{indent}\"\"\"\n"));
    } else {
        out.push_str(&format!("{indent}\"\"\"{doc}\"\"\"\n"));
    }
}
