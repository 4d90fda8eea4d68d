//! # zen-gen-cli
//!
//! CLI tool bridging annotated Python definitions and AsyncAPI documents.
//!
//! ## Usage
//!
//! ```bash
//! # Build the document from annotated sources
//! zen-gen asyncapi --models-file models.py --functions-file functions.py
//!
//! # Regenerate plain typed sources from a document
//! zen-gen pure-python --source asyncapi.yaml
//!
//! # Regenerate a FastAPI application skeleton, with async stubs
//! zen-gen fastapi --source asyncapi.yaml --async
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use zen_gen::{CodeSynthesizer, Dialect, DocumentAssembler, DocumentProfile, SchemaExtractor, SourceParser};
use zen_gen_cli::{error::CliResult, io};

#[derive(Parser)]
#[command(name = "zen-gen")]
#[command(author, version, about = "Bridge annotated Python definitions and AsyncAPI documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an AsyncAPI document from annotated source files
    Asyncapi {
        /// Input file with the type definitions
        #[arg(long, default_value = "models.py")]
        models_file: PathBuf,

        /// Input file with the function definitions
        #[arg(long, default_value = "functions.py")]
        functions_file: PathBuf,

        /// Output document path; a directory gets `<app-name>.yml` inside it
        #[arg(long, default_value = "asyncapi.yaml")]
        output_file: PathBuf,

        /// Application name, used as the document title
        #[arg(long, default_value = "Zen")]
        app_name: String,
    },

    /// Generate plain typed source files from an AsyncAPI document
    PurePython {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Generate a FastAPI application skeleton from an AsyncAPI document
    Fastapi {
        #[command(flatten)]
        args: GenerateArgs,
    },
}

/// Arguments shared by the code-generating subcommands.
#[derive(clap::Args)]
struct GenerateArgs {
    /// Input AsyncAPI document
    #[arg(long, default_value = "asyncapi.yaml")]
    source: PathBuf,

    /// Output file for the type definitions
    #[arg(long, default_value = "models.py")]
    models_file: PathBuf,

    /// Output file for the function stubs
    #[arg(long, default_value = "functions.py")]
    functions_file: PathBuf,

    /// Application name, used for the module logger
    #[arg(long, default_value = "Zen")]
    app_name: String,

    /// Generate suspend-capable (`async def`) stubs
    #[arg(long = "async")]
    async_defs: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {}", "Error:".red().bold(), error);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Asyncapi {
            models_file,
            functions_file,
            output_file,
            app_name,
        } => run_asyncapi(&models_file, &functions_file, &output_file, &app_name),
        Commands::PurePython { args } => run_generate(&args, "plain"),
        Commands::Fastapi { args } => run_generate(&args, "fastapi"),
    }
}

/// Forward direction: annotated sources to document.
fn run_asyncapi(
    models_file: &PathBuf,
    functions_file: &PathBuf,
    output_file: &PathBuf,
    app_name: &str,
) -> CliResult<()> {
    // Both inputs are read and parsed before anything is written.
    let parser = SourceParser::new();
    let models = parser.parse_module(&io::read_source(models_file)?)?;
    let functions = parser.parse_module(&io::read_source(functions_file)?)?;

    let extractor = SchemaExtractor::new();
    let schemas = extractor.component_schemas(&models);
    let extraction = extractor.extract_functions(&functions);
    let schema_count = schemas.len();
    let operation_count = extraction.functions.len();

    let document =
        DocumentAssembler::new(DocumentProfile::Full).assemble(app_name, schemas, extraction);
    let written = io::save_document(output_file, app_name, &document)?;

    println!(
        "{} Wrote {} ({} schema(s), {} operation(s))",
        "✓".green(),
        written.display(),
        schema_count.to_string().green(),
        operation_count.to_string().green()
    );
    Ok(())
}

/// Reverse direction: document to generated source files.
fn run_generate(args: &GenerateArgs, dialect: &str) -> CliResult<()> {
    let document = io::load_document(&args.source)?;

    let synthesizer = CodeSynthesizer::new(Dialect::resolve(dialect)?);
    let models = synthesizer.models_module(&document);
    let functions = synthesizer.functions_module(
        &document,
        &args.app_name,
        &io::module_name(&args.models_file),
        args.async_defs,
    );

    io::save_module(&args.models_file, &models)?;
    io::save_module(&args.functions_file, &functions)?;

    println!(
        "{} Wrote {} and {} ({} operation(s))",
        "✓".green(),
        args.models_file.display(),
        args.functions_file.display(),
        document.components.operations.len().to_string().green()
    );
    Ok(())
}
