//! colexify CLI: colexification graphs from dictionary translations.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};

use colexify::audit::audit_word_senses;
use colexify::concept::{concept_id, Fnv58};
use colexify::config::GraphConfig;
use colexify::error::ColexResult;
use colexify::export::CytoscapeExport;
use colexify::extract::extract;
use colexify::fnv::{fnv_1a_128, fnv_1a_32, fnv_1a_64, to_hex};
use colexify::graph::{ColexEdge, ColexGraph, GraphBuilder};
use colexify::record::{self, RecordMode, TranslationRecord, WordSense};
use colexify::stats::WeightSummary;

#[derive(Parser)]
#[command(name = "colexify", version, about = "Colexification graphs from dictionary translations")]
struct Cli {
    /// Abort on malformed rows instead of skipping them.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the FNV-1a digest of a string in hex.
    Hash {
        /// Digest width.
        #[arg(short, long, value_enum, default_value = "32")]
        bits: Bits,
        /// String to hash.
        string: String,
    },

    /// Print the concept identifier of a word-sense.
    Id {
        /// Word (headword).
        word: String,
        /// Sense (gloss).
        sense: String,
    },

    /// Extract word senses from a dictionary dump (.jsonl).
    Extract {
        /// Path to the dictionary dump.
        dictionary: PathBuf,
    },

    /// Add concept identifiers to extracted word senses.
    Annotate {
        /// TSV file (columns: language, word, sense, gloss).
        tsv: PathBuf,
    },

    /// Check concept identifiers for collisions.
    Audit {
        /// TSV file (columns: language, word, sense, gloss).
        tsv: PathBuf,
    },

    /// Build the colexification graph.
    Build {
        /// TSV file (columns: language, word, concept ID, sense, gloss).
        tsv: PathBuf,

        /// TOML file with `sense_cutoff` and `edge_cutoff`.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Minimum languages required for word senses (default: 20).
        #[arg(long)]
        sense_cutoff: Option<usize>,

        /// Minimum weight required for edges in graph (default: 4).
        #[arg(long)]
        edge_cutoff: Option<usize>,

        /// Worker threads; more than 1 shards the build across a thread pool.
        #[arg(long, default_value = "1")]
        jobs: usize,
    },

    /// Convert a graph TSV into Cytoscape JSON.
    Export {
        /// Graph TSV produced by `build`.
        graph: PathBuf,
    },

    /// Print quantiles of the edge weights of a graph.
    Quantiles {
        /// Graph TSV produced by `build`.
        graph: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Bits {
    #[value(name = "32")]
    B32,
    #[value(name = "64")]
    B64,
    #[value(name = "128")]
    B128,
}

fn main() -> Result<()> {
    // Diagnostics here carry codes and help but no source spans.
    let _ = miette::set_hook(Box::new(|_| {
        Box::new(miette::MietteHandlerOpts::new().unicode(true).build())
    }));

    // Records go to stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mode = if cli.strict {
        RecordMode::Strict
    } else {
        RecordMode::Lenient
    };

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Hash { bits, string } => {
            let data = string.as_bytes();
            let hex = match bits {
                Bits::B32 => to_hex(&fnv_1a_32(data)),
                Bits::B64 => to_hex(&fnv_1a_64(data)),
                Bits::B128 => to_hex(&fnv_1a_128(data)),
            };
            writeln!(out, "{hex}").into_diagnostic()?;
        }

        Commands::Id { word, sense } => {
            writeln!(out, "{}", concept_id(&word, &sense)).into_diagnostic()?;
        }

        Commands::Extract { dictionary } => {
            let reader = record::open(&dictionary)?;
            let rows = extract(reader, &dictionary.display().to_string())?;
            record::write_rows(&mut out, &rows).into_diagnostic()?;
        }

        Commands::Annotate { tsv } => {
            let rows: Vec<WordSense> = record::read_file(&tsv, mode)?;
            let records: Vec<TranslationRecord> =
                rows.into_iter().map(WordSense::annotate).collect();
            record::write_rows(&mut out, &records).into_diagnostic()?;
        }

        Commands::Audit { tsv } => {
            let rows: Vec<WordSense> = record::read_file(&tsv, mode)?;
            let report = audit_word_senses(&Fnv58, &rows);
            write!(out, "{report}").into_diagnostic()?;
        }

        Commands::Build {
            tsv,
            config,
            sense_cutoff,
            edge_cutoff,
            jobs,
        } => {
            let config = load_config(config.as_deref())?.with_overrides(sense_cutoff, edge_cutoff);

            let records: Vec<TranslationRecord> = record::read_file(&tsv, mode)?;
            let builder = GraphBuilder::new(config);
            let graph = if jobs > 1 {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build()
                    .into_diagnostic()?
                    .install(|| builder.build_parallel(&records))
            } else {
                builder.build(&records)
            };
            let config = builder.config();
            tracing::info!(
                sense_cutoff = config.sense_cutoff,
                edge_cutoff = config.edge_cutoff,
                jobs,
                concepts = graph.concepts.len(),
                edges = graph.edges.len(),
                "built colexification graph"
            );
            record::write_rows(&mut out, &graph.edges).into_diagnostic()?;
        }

        Commands::Export { graph } => {
            let graph = read_graph(&graph, mode)?;
            let json = CytoscapeExport::from_graph(&graph).to_json().into_diagnostic()?;
            writeln!(out, "{json}").into_diagnostic()?;
        }

        Commands::Quantiles { graph } => {
            let graph = read_graph(&graph, mode)?;
            let summary = WeightSummary::new(&graph.weights())?;
            write!(out, "{summary}").into_diagnostic()?;
        }
    }

    out.flush().into_diagnostic()?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> ColexResult<GraphConfig> {
    match path {
        Some(path) => Ok(GraphConfig::load(path)?),
        None => Ok(GraphConfig::default()),
    }
}

fn read_graph(path: &Path, mode: RecordMode) -> ColexResult<ColexGraph> {
    let edges: Vec<ColexEdge> = record::read_file(path, mode)?;
    Ok(ColexGraph::from_edges(edges))
}
