//! Stallings graph CLI.
//!
//! Provides the `stallings` binary with subcommands for folding words into
//! graphs, checking subgroup containment, and computing extension lattices
//! with their extremal invariant. Summaries print as JSON to stdout for
//! machine-readable output; edge-list and lattice exports go to files.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use stallings_core::{Graph, Word};
use stallings_export::{
    graph_edges, lattice_attrs, lattice_links, to_json, write_attrs_csv, write_edges_csv,
    write_links_csv,
};

mod parse;

use parse::parse_words;

/// Stallings graph computations for free-group subgroups.
#[derive(Parser)]
#[command(name = "stallings", about = "Stallings graph computations for free-group subgroups")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Fold generating words into a Stallings graph and print its summary.
    Graph {
        /// Generating words, e.g. "x*y*x^-1*y^-1".
        #[arg(required = true)]
        words: Vec<String>,

        /// Write the edge list to this file.
        #[arg(long)]
        edges_out: Option<PathBuf>,

        /// Export format: csv or json.
        #[arg(long, default_value = "csv")]
        format: String,
    },

    /// Compute the one-point-extension lattice and its extremal invariant.
    Lattice {
        /// Generating words of the origin graph.
        #[arg(required = true)]
        words: Vec<String>,

        /// Write the parent/child link list to this file.
        #[arg(long)]
        links_out: Option<PathBuf>,

        /// Write the per-graph attribute table to this file.
        #[arg(long)]
        attrs_out: Option<PathBuf>,

        /// Export format: csv or json.
        #[arg(long, default_value = "csv")]
        format: String,
    },

    /// Check whether one subgroup is contained in another.
    Contains {
        /// Generating words of the candidate subgroup.
        #[arg(long = "sub", required = true)]
        sub: Vec<String>,

        /// Generating words of the candidate overgroup.
        #[arg(long = "sup", required = true)]
        sup: Vec<String>,
    },
}

/// Export format for row files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Csv,
    Json,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Graph {
            words,
            edges_out,
            format,
        } => run_graph(&words, edges_out.as_deref(), &format),
        Commands::Lattice {
            words,
            links_out,
            attrs_out,
            format,
        } => run_lattice(&words, links_out.as_deref(), attrs_out.as_deref(), &format),
        Commands::Contains { sub, sup } => run_contains(&sub, &sup),
    };
    process::exit(exit_code);
}

/// Execute the graph subcommand.
///
/// Returns exit code: 0 = success, 2 = bad input, 3 = I/O error.
fn run_graph(words: &[String], edges_out: Option<&Path>, format: &str) -> i32 {
    let (words, format) = match parse_inputs(words, format) {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };

    let graph = Graph::from_words(&words);
    tracing::info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph folded"
    );

    let summary = serde_json::json!({
        "vertices": graph.vertex_count(),
        "edges": graph.edge_count(),
        "euler_characteristic": graph.euler_characteristic(),
        "roots": graph.roots().len(),
        "hash": graph.structural_hash().to_hex(),
    });
    println!("{}", serde_json::to_string_pretty(&summary).unwrap());

    if let Some(path) = edges_out {
        let rows = graph_edges(&graph);
        if let Err(e) = write_rows(path, format, &rows, |out, rows| write_edges_csv(out, rows)) {
            eprintln!("Error: failed to write '{}': {}", path.display(), e);
            return 3;
        }
    }
    0
}

/// Execute the lattice subcommand.
///
/// Returns exit code: 0 = success, 2 = bad input, 3 = I/O error.
fn run_lattice(
    words: &[String],
    links_out: Option<&Path>,
    attrs_out: Option<&Path>,
    format: &str,
) -> i32 {
    let (words, format) = match parse_inputs(words, format) {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };

    let graph = Graph::from_words(&words);
    tracing::debug!(vertices = graph.vertex_count(), "computing descendant closure");
    let lattice = graph.descendants();
    tracing::info!(
        graphs = lattice.len(),
        links = lattice.links().len(),
        "closure complete"
    );

    let critical: Vec<u32> = lattice.critical_set().iter().map(|id| id.0).collect();
    let summary = serde_json::json!({
        "origin_vertices": graph.vertex_count(),
        "graphs": lattice.len(),
        "links": lattice.links().len(),
        "extremal_invariant": lattice.extremal_invariant(),
        "critical_set": critical,
    });
    println!("{}", serde_json::to_string_pretty(&summary).unwrap());

    if let Some(path) = links_out {
        let rows = lattice_links(lattice);
        if let Err(e) = write_rows(path, format, &rows, |out, rows| write_links_csv(out, rows)) {
            eprintln!("Error: failed to write '{}': {}", path.display(), e);
            return 3;
        }
    }
    if let Some(path) = attrs_out {
        let rows = lattice_attrs(lattice);
        if let Err(e) = write_rows(path, format, &rows, |out, rows| write_attrs_csv(out, rows)) {
            eprintln!("Error: failed to write '{}': {}", path.display(), e);
            return 3;
        }
    }
    0
}

/// Execute the contains subcommand.
///
/// Returns exit code: 0 = contained, 1 = not contained, 2 = bad input.
fn run_contains(sub: &[String], sup: &[String]) -> i32 {
    let sub_words = match parse_words(sub) {
        Ok(w) => w,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 2;
        }
    };
    let sup_words = match parse_words(sup) {
        Ok(w) => w,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 2;
        }
    };

    let sub_graph = Graph::from_words(&sub_words);
    let sup_graph = Graph::from_words(&sup_words);
    let contained = sub_graph.is_contained_in(&sup_graph);
    let equal = contained && sup_graph.is_contained_in(&sub_graph);

    let summary = serde_json::json!({
        "contained": contained,
        "equal": equal,
    });
    println!("{}", serde_json::to_string_pretty(&summary).unwrap());
    if contained {
        0
    } else {
        1
    }
}

/// Parse word arguments and the format flag, reporting errors to stderr.
fn parse_inputs(words: &[String], format: &str) -> Result<(Vec<Word>, Format), i32> {
    let format = match parse_format(format) {
        Ok(f) => f,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return Err(2);
        }
    };
    match parse_words(words) {
        Ok(w) => Ok((w, format)),
        Err(msg) => {
            eprintln!("Error: {}", msg);
            Err(2)
        }
    }
}

fn parse_format(s: &str) -> Result<Format, String> {
    match s {
        "csv" => Ok(Format::Csv),
        "json" => Ok(Format::Json),
        other => Err(format!("unknown format '{}', expected csv or json", other)),
    }
}

/// Write rows to a file in the chosen format.
fn write_rows<T, F>(
    path: &Path,
    format: Format,
    rows: &[T],
    write_csv: F,
) -> Result<(), stallings_export::ExportError>
where
    T: serde::Serialize,
    F: Fn(&mut BufWriter<File>, &[T]) -> Result<(), stallings_export::ExportError>,
{
    let mut out = BufWriter::new(File::create(path)?);
    match format {
        Format::Csv => write_csv(&mut out, rows),
        Format::Json => {
            use std::io::Write;
            let json = to_json(&rows)?;
            writeln!(out, "{}", json)?;
            Ok(())
        }
    }
}
