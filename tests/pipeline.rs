//! File-based pipeline tests: each stage writes its TSV to disk and the
//! next stage reads it back, as the command-line tool does.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use colexify::config::GraphConfig;
use colexify::error::IngestError;
use colexify::extract::extract;
use colexify::graph::{ColexEdge, ColexGraph, GraphBuilder};
use colexify::record::{self, RecordMode, TranslationRecord, WordSense};
use colexify::stats::WeightSummary;

fn write_file<T: record::ToRow>(path: &Path, rows: &[T]) {
    let mut out = BufWriter::new(File::create(path).unwrap());
    record::write_rows(&mut out, rows).unwrap();
}

/// Five languages, each with one word for both "hand" and "arm", and a
/// sixth that keeps them apart.
fn dump() -> String {
    let pairs = [
        ("ru", "рука"),
        ("pl", "ręka"),
        ("cs", "ruka"),
        ("lt", "ranka"),
        ("sw", "mkono"),
    ];
    let translations = |sense: &str| {
        let mut items: Vec<String> = pairs
            .iter()
            .map(|(code, word)| format!(r#"{{"code": "{code}", "word": "{word}", "sense": "{sense}"}}"#))
            .collect();
        let de = if sense == "hand" { "Hand" } else { "Arm" };
        items.push(format!(r#"{{"code": "de", "word": "{de}", "sense": "{sense}"}}"#));
        items.join(", ")
    };
    [
        format!(
            r#"{{"word": "hand", "pos": "noun", "lang": "English", "lang_code": "en", "senses": [{{"translations": [{}]}}]}}"#,
            translations("hand")
        ),
        format!(
            r#"{{"word": "arm", "pos": "noun", "lang": "English", "lang_code": "en", "senses": [{{"translations": [{}]}}]}}"#,
            translations("arm")
        ),
    ]
    .join("\n")
}

#[test]
fn stages_through_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let dump_path = dir.path().join("dump.jsonl");
    std::fs::write(&dump_path, dump()).unwrap();

    // extract
    let rows = extract(record::open(&dump_path).unwrap(), "dump").unwrap();
    let senses_path = dir.path().join("senses.tsv");
    write_file(&senses_path, &rows);

    // annotate
    let senses: Vec<WordSense> = record::read_file(&senses_path, RecordMode::Strict).unwrap();
    assert_eq!(senses, rows);
    let records: Vec<TranslationRecord> = senses.into_iter().map(WordSense::annotate).collect();
    let records_path = dir.path().join("records.tsv");
    write_file(&records_path, &records);

    // build, with cutoffs from a config file
    let config_path = dir.path().join("colexify.toml");
    std::fs::write(&config_path, "sense_cutoff = 6\nedge_cutoff = 5\n").unwrap();
    let config = GraphConfig::load(&config_path).unwrap();
    let records: Vec<TranslationRecord> = record::read_file(&records_path, RecordMode::Strict).unwrap();
    let graph = GraphBuilder::new(config).build(&records);

    // hand and arm: 5 translating languages + de + en = 7 languages each.
    assert_eq!(graph.concepts.len(), 2);
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].weight, 5);

    let graph_path = dir.path().join("graph.tsv");
    write_file(&graph_path, &graph.edges);
    let edges: Vec<ColexEdge> = record::read_file(&graph_path, RecordMode::Strict).unwrap();
    assert_eq!(ColexGraph::from_edges(edges).edges, graph.edges);

    // one edge is too few for quantiles
    assert!(WeightSummary::new(&graph.weights()).is_err());
}

#[test]
fn edge_cutoff_above_weight_empties_graph() {
    let rows = extract(dump().as_bytes(), "dump").unwrap();
    let records: Vec<TranslationRecord> = rows.into_iter().map(WordSense::annotate).collect();
    let graph = GraphBuilder::new(GraphConfig::new(6, 6)).build(&records);
    assert_eq!(graph.concepts.len(), 2);
    assert!(graph.edges.is_empty());

    let graph = GraphBuilder::new(GraphConfig::new(8, 0)).build(&records);
    assert!(graph.concepts.is_empty());
}

#[test]
fn strict_mode_reports_line() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("records.tsv");
    std::fs::write(&path, "en\tbank\tid\tbank\tgloss\nen\tbank\tid\n").unwrap();

    let lenient: Vec<TranslationRecord> = record::read_file(&path, RecordMode::Lenient).unwrap();
    assert_eq!(lenient.len(), 1);

    let err = record::read_file::<TranslationRecord>(&path, RecordMode::Strict).unwrap_err();
    assert!(matches!(
        err,
        IngestError::MalformedRecord {
            line: 2,
            expected: 5,
            found: 3
        }
    ));
}

#[test]
fn lenient_graph_read_skips_bad_weights() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("graph.tsv");
    std::fs::write(
        &path,
        "a\tx\tg\tb\ty\tg\t4\na\tx\tg\tc\tz\tg\tmany\nb\ty\tg\tc\tz\tg\t2\n",
    )
    .unwrap();

    let edges: Vec<ColexEdge> = record::read_file(&path, RecordMode::Lenient).unwrap();
    let graph = ColexGraph::from_edges(edges);
    assert_eq!(graph.weights(), vec![4, 2]);
    let summary = WeightSummary::new(&graph.weights()).unwrap();
    assert_eq!(summary.quantiles[0], (2, vec![3.0]));

    assert!(matches!(
        record::read_file::<ColexEdge>(&path, RecordMode::Strict),
        Err(IngestError::InvalidWeight { line: 2, .. })
    ));
}
