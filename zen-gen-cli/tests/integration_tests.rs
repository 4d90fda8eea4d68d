//! Integration tests for zen-gen-cli.
//!
//! These tests drive the same pipeline as the binary: reading annotated
//! sources, assembling the document, writing it out, and regenerating the
//! sources back from the document.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use zen_gen::{
    CodeSynthesizer, Dialect, Document, DocumentAssembler, DocumentProfile, SchemaExtractor,
    SourceParser,
};
use zen_gen_cli::{io, CliError};

const MODELS: &str = "\
class TaskAttachment(TypedDict):
    name: str
    kind: str | None
";

const FUNCTIONS: &str = r#""""Attachment bridge."""

def get_attachments(utd_id: int, limit: int | None) -> list[TaskAttachment]:
    """
    Fetch attachments.
    Args:
        utd_id () : declaration id
        limit () : page size

    Returns:
        The attachments
    """
    ...


def ping() -> None: ...
"#;

/// Create a temporary directory with test files.
fn create_temp_project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

/// The forward pipeline as the binary runs it.
fn forward(models_file: &Path, functions_file: &Path, output: &Path) -> Result<PathBuf, CliError> {
    let parser = SourceParser::new();
    let models = parser.parse_module(&io::read_source(models_file)?)?;
    let functions = parser.parse_module(&io::read_source(functions_file)?)?;

    let extractor = SchemaExtractor::new();
    let document = DocumentAssembler::new(DocumentProfile::Full).assemble(
        "Zen",
        extractor.component_schemas(&models),
        extractor.extract_functions(&functions),
    );
    io::save_document(output, "Zen", &document)
}

/// The reverse pipeline as the binary runs it.
fn reverse(
    source: &Path,
    models_file: &Path,
    functions_file: &Path,
    dialect: &str,
    async_defs: bool,
) -> Result<Document, CliError> {
    let document = io::load_document(source)?;
    let synthesizer = CodeSynthesizer::new(Dialect::resolve(dialect)?);
    io::save_module(models_file, &synthesizer.models_module(&document))?;
    io::save_module(
        functions_file,
        &synthesizer.functions_module(
            &document,
            "Zen",
            &io::module_name(models_file),
            async_defs,
        ),
    )?;
    Ok(document)
}

#[test]
fn test_forward_generates_document() {
    let dir = create_temp_project(&[("models.py", MODELS), ("functions.py", FUNCTIONS)]);
    let output = dir.path().join("asyncapi.yaml");

    let written = forward(
        &dir.path().join("models.py"),
        &dir.path().join("functions.py"),
        &output,
    )
    .unwrap();
    assert_eq!(written, output);

    let document = io::load_document(&output).unwrap();
    assert_eq!(document.asyncapi, "3.0.0");
    assert_eq!(document.info.title, "Zen");
    assert_eq!(document.info.description.as_deref(), Some("Attachment bridge."));
    assert!(document.components.schemas.contains_key("TaskAttachment"));
    assert!(document.request_message("get_attachments").is_some());
    assert!(document.response_message("ping").is_some());
}

#[test]
fn test_forward_missing_input_aborts_before_output() {
    let dir = create_temp_project(&[("functions.py", FUNCTIONS)]);
    let output = dir.path().join("asyncapi.yaml");

    let err = forward(
        &dir.path().join("models.py"),
        &dir.path().join("functions.py"),
        &output,
    )
    .unwrap_err();

    assert!(matches!(err, CliError::SourceNotFound { .. }));
    assert!(!output.exists());
}

#[test]
fn test_directory_input_is_rejected() {
    let dir = create_temp_project(&[("functions.py", FUNCTIONS)]);
    let err = forward(
        dir.path(),
        &dir.path().join("functions.py"),
        &dir.path().join("asyncapi.yaml"),
    )
    .unwrap_err();
    assert!(matches!(err, CliError::SourceIsDirectory { .. }));
}

#[test]
fn test_directory_output_is_named_after_app() {
    let dir = create_temp_project(&[("models.py", MODELS), ("functions.py", FUNCTIONS)]);

    let written = forward(
        &dir.path().join("models.py"),
        &dir.path().join("functions.py"),
        dir.path(),
    )
    .unwrap();

    assert_eq!(written, dir.path().join("Zen.yml"));
    assert!(written.exists());
}

#[test]
fn test_malformed_document_is_rejected() {
    let dir = create_temp_project(&[("doc.yaml", "asyncapi: [")]);
    let err = io::load_document(&dir.path().join("doc.yaml")).unwrap_err();
    assert!(matches!(err, CliError::MalformedDocument { .. }));
}

#[test]
fn test_reverse_generates_plain_sources() {
    let dir = create_temp_project(&[("models.py", MODELS), ("functions.py", FUNCTIONS)]);
    let document_path = dir.path().join("asyncapi.yaml");
    forward(
        &dir.path().join("models.py"),
        &dir.path().join("functions.py"),
        &document_path,
    )
    .unwrap();

    let models_out = dir.path().join("gen_models.py");
    let functions_out = dir.path().join("gen_functions.py");
    reverse(&document_path, &models_out, &functions_out, "plain", false).unwrap();

    let models_text = fs::read_to_string(&models_out).unwrap();
    assert!(models_text.contains("from typing import TypedDict"));
    assert!(models_text.contains("class TaskAttachment(TypedDict):"));
    assert!(models_text.contains("    kind: str | None"));

    let functions_text = fs::read_to_string(&functions_out).unwrap();
    assert!(functions_text.contains("\"\"\"Attachment bridge.\"\"\""));
    assert!(functions_text.contains("from .gen_models import TaskAttachment"));
    assert!(functions_text.contains("logger = logging.getLogger(\"Zen\")"));
    assert!(functions_text
        .contains("def get_attachments(utd_id: int, limit: int | None) -> list[TaskAttachment]:"));
    assert!(functions_text.contains("def ping() -> None:"));
    assert!(!functions_text.contains("@app."));
}

#[test]
fn test_reverse_generates_fastapi_sources_with_async() {
    let dir = create_temp_project(&[("models.py", MODELS), ("functions.py", FUNCTIONS)]);
    let document_path = dir.path().join("asyncapi.yaml");
    forward(
        &dir.path().join("models.py"),
        &dir.path().join("functions.py"),
        &document_path,
    )
    .unwrap();

    let models_out = dir.path().join("gen_models.py");
    let functions_out = dir.path().join("gen_functions.py");
    reverse(&document_path, &models_out, &functions_out, "fastapi", true).unwrap();

    let models_text = fs::read_to_string(&models_out).unwrap();
    assert!(models_text.contains("from pydantic import BaseModel"));
    assert!(models_text.contains("class TaskAttachment(BaseModel):"));

    let functions_text = fs::read_to_string(&functions_out).unwrap();
    assert!(functions_text.contains("app = FastAPI()"));
    assert!(functions_text.contains("@app.get(\"/get_attachments\")"));
    assert!(functions_text.contains("async def ping() -> None:"));
}

#[test]
fn test_unknown_dialect_is_rejected() {
    let dir = create_temp_project(&[("models.py", MODELS), ("functions.py", FUNCTIONS)]);
    let document_path = dir.path().join("asyncapi.yaml");
    forward(
        &dir.path().join("models.py"),
        &dir.path().join("functions.py"),
        &document_path,
    )
    .unwrap();

    let err = reverse(
        &document_path,
        &dir.path().join("m.py"),
        &dir.path().join("f.py"),
        "flask",
        false,
    )
    .unwrap_err();
    assert!(matches!(err, CliError::Dialect(_)));
}

#[test]
fn test_round_trip_is_stable() {
    // Document -> generated sources -> document again, byte for byte.
    let dir = create_temp_project(&[("models.py", MODELS), ("functions.py", FUNCTIONS)]);
    let first_path = dir.path().join("first.yaml");
    forward(
        &dir.path().join("models.py"),
        &dir.path().join("functions.py"),
        &first_path,
    )
    .unwrap();

    let models_out = dir.path().join("gen_models.py");
    let functions_out = dir.path().join("gen_functions.py");
    reverse(&first_path, &models_out, &functions_out, "plain", false).unwrap();

    let second_path = dir.path().join("second.yaml");
    forward(&models_out, &functions_out, &second_path).unwrap();

    assert_eq!(
        fs::read_to_string(&first_path).unwrap(),
        fs::read_to_string(&second_path).unwrap()
    );
}
