use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use xmlvalid_core::normalize::parse_xml;
use xmlvalid_core::{DocumentValidator, StringValidator, Validator, ValidatorOptions};

#[derive(Parser)]
#[command(name = "xmlvalid")]
#[command(about = "Validate XML files against XSD schemas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one XML file against a schema.
    Validate {
        #[arg(long)]
        schema: PathBuf,
        #[arg(long)]
        xml: PathBuf,
        /// TOML file with message templates and rendering options.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Parse the file first and validate the parsed document.
        #[arg(long)]
        document: bool,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            schema,
            xml,
            config,
            document,
        } => {
            let options = match config {
                Some(path) => ValidatorOptions::from_file(&path)?,
                None => ValidatorOptions::default(),
            };
            let input = std::fs::read_to_string(&xml)
                .with_context(|| format!("failed to read {}", xml.display()))?;

            let messages = if document {
                let mut validator = DocumentValidator::new(&schema, options)?;
                // Unparsable input takes the string path so it is reported
                // as not well-formed.
                let valid = match parse_xml(&input) {
                    Ok(doc) => validator.is_valid(&doc),
                    Err(_) => validator.validate_str(&input),
                };
                if valid {
                    None
                } else {
                    Some(validator.messages().clone())
                }
            } else {
                let mut validator = StringValidator::new(&schema, options)?;
                if validator.is_valid(&input) {
                    None
                } else {
                    Some(validator.messages().clone())
                }
            };

            match messages {
                None => {
                    info!(xml = %xml.display(), "valid");
                    println!("OK");
                    Ok(ExitCode::SUCCESS)
                }
                Some(messages) => {
                    for (_, message) in messages.iter() {
                        eprintln!("{message}");
                    }
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
