//! docstruct CLI - document structuring tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use log::debug;

use docstruct::render::{chunks_to_jsonl, to_json, to_outline};
use docstruct::{
    resolve_title, Chunker, DocumentSource, ExtractedDocument, JsonFormat, Limits, MatchOrder,
    StructureOptions, Structurer,
};

#[derive(Parser)]
#[command(name = "docstruct")]
#[command(version)]
#[command(about = "Structure extracted PDF text into a title, sections and chunks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Structure an extracted document (JSON) into metadata, sections and chunks
    Structure {
        /// Extracted document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output chunks only, one JSON object per line
        #[arg(long, conflicts_with = "compact")]
        jsonl: bool,

        /// Ignore styled lines when detecting sections
        #[arg(long)]
        text_only: bool,

        /// List numbered headings before keyword headings within a chunk
        #[arg(long)]
        family_order: bool,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Split a plain-text file into overlapping chunks
    Chunk {
        /// Plain-text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Maximum chunk length in characters
        #[arg(long, default_value_t = docstruct::analysis::DEFAULT_MAX_CHARS)]
        max_chars: usize,

        /// Overlap between chunks in characters
        #[arg(long, default_value_t = docstruct::analysis::DEFAULT_OVERLAP)]
        overlap: usize,
    },

    /// Print the inferred title of an extracted document
    Title {
        /// Extracted document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show document information and section outline
    Info {
        /// Extracted document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Show version information
    Version,
}

/// Resource caps; each falls back to its environment variable, then to the
/// built-in default.
#[derive(Args)]
struct LimitArgs {
    /// Maximum number of pages read
    #[arg(long, env = "EMBEDDER_MAX_PAGES")]
    max_pages: Option<u32>,

    /// Character budget across pages
    #[arg(long, env = "EMBEDDER_MAX_TOTAL_CHARS")]
    max_total_chars: Option<usize>,

    /// Maximum number of chunks
    #[arg(long, env = "EMBEDDER_MAX_CHUNKS")]
    max_chunks: Option<usize>,

    /// Maximum chunk length in characters
    #[arg(long, env = "EMBEDDER_CHUNK_MAX_CHARS")]
    chunk_max_chars: Option<usize>,

    /// Overlap between chunks in characters
    #[arg(long, env = "EMBEDDER_CHUNK_OVERLAP")]
    chunk_overlap: Option<usize>,
}

impl LimitArgs {
    fn to_limits(&self) -> Limits {
        let defaults = Limits::default();
        Limits {
            max_pages: self.max_pages.unwrap_or(defaults.max_pages),
            max_total_chars: self.max_total_chars.unwrap_or(defaults.max_total_chars),
            max_chunks: self.max_chunks.unwrap_or(defaults.max_chunks),
            chunk_max_chars: self.chunk_max_chars.unwrap_or(defaults.chunk_max_chars),
            chunk_overlap: self.chunk_overlap.unwrap_or(defaults.chunk_overlap),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Structure {
            input,
            output,
            compact,
            jsonl,
            text_only,
            family_order,
            limits,
        }) => {
            let options = StructureOptions::new()
                .with_limits(limits.to_limits())
                .with_layout(!text_only)
                .with_match_order(if family_order {
                    MatchOrder::Family
                } else {
                    MatchOrder::Position
                });
            let format = if jsonl {
                OutputFormat::JsonLines
            } else if compact {
                OutputFormat::Json(JsonFormat::Compact)
            } else {
                OutputFormat::Json(JsonFormat::Pretty)
            };
            cmd_structure(&input, output.as_deref(), options, format)
        }
        Some(Commands::Chunk {
            input,
            max_chars,
            overlap,
        }) => cmd_chunk(&input, max_chars, overlap),
        Some(Commands::Title { input }) => cmd_title(&input),
        Some(Commands::Info { input, limits }) => cmd_info(&input, limits.to_limits()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: docstruct <COMMAND> <FILE>".yellow());
            println!("       docstruct --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Json(JsonFormat),
    JsonLines,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn cmd_structure(
    input: &Path,
    output: Option<&Path>,
    options: StructureOptions,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    debug!("structuring {} with {:?}", input.display(), options);
    let doc = ExtractedDocument::from_path(input)?;
    let structure = Structurer::new(options)?.structure(&doc, &file_name(input))?;

    let rendered = match format {
        OutputFormat::Json(json) => to_json(&structure, json)?,
        OutputFormat::JsonLines => chunks_to_jsonl(&structure)?,
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!(
            "{} {} ({} sections, {} chunks)",
            "Saved to".green(),
            path.display(),
            structure.sections.len(),
            structure.chunks.len()
        );
    } else {
        println!("{}", rendered.trim_end());
    }

    Ok(())
}

fn cmd_chunk(input: &Path, max_chars: usize, overlap: usize) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let chunker = Chunker::new(max_chars, overlap)?;

    for (i, chunk) in chunker.chunk(&text).iter().enumerate() {
        println!(
            "{} {}",
            format!("── c_{} ({} chars)", i, chunk.chars().count()).cyan(),
            "─".repeat(20).dimmed()
        );
        println!("{}", chunk);
    }

    Ok(())
}

fn cmd_title(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", document_title(input)?);
    Ok(())
}

fn document_title(input: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let doc = ExtractedDocument::from_path(input)?;
    Ok(resolve_title(&doc.pages, &doc.info, &file_name(input)))
}

fn cmd_info(input: &Path, limits: Limits) -> Result<(), Box<dyn std::error::Error>> {
    let doc = ExtractedDocument::from_path(input)?;
    let info = doc.info();
    let structure = Structurer::new(StructureOptions::new().with_limits(limits))?
        .structure(&doc, &file_name(input))?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Title".bold(), structure.metadata.title);
    if !structure.metadata.authors.is_empty() {
        println!("{}: {}", "Author".bold(), structure.metadata.authors);
    }
    if let Some(created) = info.created() {
        println!("{}: {}", "Created".bold(), created.format("%Y-%m-%d"));
    } else if !structure.metadata.year.is_empty() {
        println!("{}: {}", "Year".bold(), structure.metadata.year);
    }
    println!(
        "{}: {} of {}",
        "Pages read".bold(),
        structure.metadata.pages,
        doc.page_count()
    );
    println!("{}: {}", "Bookmarks".bold(), doc.toc.len());
    println!(
        "{}: {}",
        "Layout".bold(),
        if doc.pages.iter().any(|p| p.has_layout()) { "Yes" } else { "No" }
    );
    println!("{}: {:?}", "Section signal".bold(), structure.signal);

    println!();
    println!("{}", "Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    print!("{}", to_outline(&structure));

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docstruct".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document structuring tool");
    println!();
    println!("License: MIT");
}
