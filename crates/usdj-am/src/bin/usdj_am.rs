//! usdj-am CLI entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use usdj_am::utils::{Document, Indenter, JsonWriter};
use usdj_am::visitor::validate;
use usdj_am::{Accept, File};
use usdj_am_crdt::{random_session_id, MIN_SESSION_ID};

#[derive(Parser)]
#[command(name = "usdj-am")]
#[command(about = "USDA scenes stored in JSON CRDT documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a USDA JSON file as a document
    Import {
        /// USDA JSON input file
        input: PathBuf,

        /// Document output file
        output: PathBuf,

        /// Session ID of the authoring clock (random if omitted)
        #[arg(long, value_parser = clap::value_parser!(u64).range(MIN_SESSION_ID..))]
        session: Option<u64>,
    },

    /// Print the USDA JSON of a scene in a document
    Export {
        /// Document file
        document: PathBuf,

        /// Item path of the scene's `File` node
        #[arg(long, default_value = "/")]
        path: String,

        /// Spaces per indentation level
        #[arg(long, default_value_t = 2)]
        indent: usize,

        /// Indent with one tab per level instead of spaces
        #[arg(long)]
        tabs: bool,
    },

    /// Validate every node of a scene in a document
    Check {
        /// Document file
        document: PathBuf,

        /// Item path of the scene's `File` node
        #[arg(long, default_value = "/")]
        path: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("usdj_am=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            input,
            output,
            session,
        } => {
            let sid = session.unwrap_or_else(random_session_id);
            let source = std::fs::read_to_string(&input)?;
            let json: serde_json::Value = serde_json::from_str(&source)?;
            let document = Document::from_json(&json, sid);
            let report = validate(&File::from_root(&document)?)?;
            document.save(&output)?;
            info!(
                prims = report.prims,
                declarations = report.declarations,
                "imported {} -> {}",
                input.display(),
                output.display()
            );
        }

        Commands::Export {
            document,
            path,
            indent,
            tabs,
        } => {
            let document = Document::load(&document)?;
            let file = File::new(&document, document.get_item_at(&path)?)?;
            let indenter = if tabs {
                Indenter::new('\t', 1)
            } else {
                Indenter::new(' ', indent)
            };
            let mut writer = JsonWriter::new(indenter);
            file.accept(&mut writer)?;
            println!("{writer}");
        }

        Commands::Check { document, path } => {
            let document = Document::load(&document)?;
            let file = File::new(&document, document.get_item_at(&path)?)?;
            let report = validate(&file)?;
            println!(
                "ok: {} prims, {} variant sets, {} declarations, {} assignments, {} values",
                report.prims,
                report.variant_sets,
                report.declarations,
                report.assignments,
                report.values
            );
        }
    }

    Ok(())
}
