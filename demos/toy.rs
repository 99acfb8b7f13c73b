//! A toy network of three community organisations, coloured by age and sized by degree and
//! population.

use std::error::Error;

use sociogram::{
    color::{color_mapping, Normalization, Palette},
    frame::Frame,
    ingest::{attributes, Records},
    pipeline::{analyse, edge_widths, Config, Metric},
};

fn main() -> Result<(), Box<dyn Error>> {
    let records = Records::new()
        .node("arts", attributes([("age", 8.0), ("population", 3.0)]))
        .node("childcare", attributes([("age", 37.0), ("population", 15.0)]))
        .node("enrichment", attributes([("age", 17.0), ("population", 50.0)]))
        .weighted_edge("enrichment", "arts", 3.0)
        .weighted_edge("enrichment", "childcare", 5.0);

    println!("Nodes:");
    for (id, attrs) in records.nodes() {
        println!("  {id}: {attrs:?}");
    }
    println!("Edges:");
    for edge in records.edges() {
        println!("  {} - {} ({})", edge.source(), edge.target(), edge.weight());
    }

    let graph = records.undirected()?;

    let config = Config {
        size_attribute: Some("population".to_string()),
        ..Config::default()
    };
    let mut step = analyse(&graph, Metric::DegreeCentrality, &config)?;

    // Colour by age rather than by the metric.
    step.colors = color_mapping(
        &graph.attribute_values("age"),
        Palette::Rainbow,
        Normalization::with_padding(0.0),
    );

    println!("\nColors:");
    for (id, color) in &step.colors {
        println!("  {id}: {color}");
    }
    println!("Sizes:");
    for (id, size) in &step.sizes {
        println!("  {id}: {size}");
    }
    println!("Widths:");
    for ((source, target), width) in edge_widths(&graph) {
        println!("  {source} - {target}: {width}");
    }

    let frame = Frame::new(&graph, &step);
    println!("\n{}", serde_json::to_string_pretty(&frame)?);

    Ok(())
}
