//! Analyses an alliance network read from an edge-list file.
//!
//! ```text
//! cargo run --example tribes -- [EDGE_LIST] [CONFIG_JSON] [FRAMES_JSON]
//! ```
//!
//! Every metric is reported for the undirected and the directed reading of the file. When a
//! frames path is given, the renderer frames of every successful step are written there as JSON.
//! Log verbosity is controlled by `SOCIOGRAM_LOG`, e.g. `SOCIOGRAM_LOG=sociogram=debug`.

use std::{env, error::Error, fs, io, path::PathBuf};

use sociogram::{
    frame::Frame,
    graph::{DegreeMode, Graph},
    ingest::Records,
    pipeline::{run, Config, Metric},
    report,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_EDGE_LIST: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/alliances.edges");

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SOCIOGRAM_LOG")
        .unwrap_or_else(|_| EnvFilter::new("sociogram=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(io::stderr))
        .init();
}

fn analyse(
    label: &str,
    graph: &Graph<u64>,
    config: &Config,
    frames: &mut Vec<Frame<u64>>,
) -> io::Result<()> {
    let mut out = io::stdout().lock();

    println!("\n=== {label} ===");
    let largest = graph.largest_component();
    println!(
        "{} nodes, {} edges, density {:.4}, largest component {} nodes",
        graph.vertex_count(),
        graph.edge_count(),
        graph.density(),
        largest.vertex_count()
    );
    report::write_degree_summary(&mut out, graph, DegreeMode::Total)?;

    for (metric, step) in run(graph, &Metric::ALL, config) {
        println!("\n{}", metric.title());
        match step {
            Ok(step) => {
                report::write_step(&mut out, &step)?;
                frames.push(Frame::new(graph, &step));
            }
            Err(err) => println!("skipped: {err}"),
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let mut args = env::args().skip(1);
    let path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EDGE_LIST));
    let config: Config = match args.next() {
        Some(config) => serde_json::from_str(&fs::read_to_string(config)?)?,
        None => Config::default(),
    };
    let frames_path = args.next();

    let records = Records::read_edge_list(&path)?;

    let mut frames = Vec::new();
    analyse("Undirected", &records.undirected()?, &config, &mut frames)?;
    analyse("Directed", &records.directed()?, &config, &mut frames)?;

    if let Some(frames_path) = frames_path {
        fs::write(&frames_path, serde_json::to_string_pretty(&frames)?)?;
        println!("\nWrote {} frames to {frames_path}", frames.len());
    }

    Ok(())
}
