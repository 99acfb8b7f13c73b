//! Plain text reports of analysis steps.
//!
//! Per-vertex values are written one per line as `Node {id}: {value}`, ids right aligned and
//! zero filled to two characters, values to four decimals. Scalars are written as
//! `{title}: {value}`, the degree assortativity with a space in place of a plus sign.

use std::{
    collections::BTreeMap,
    fmt::{Debug, Display},
    io::{self, Write},
};

use crate::{
    graph::{DegreeMode, Graph},
    pipeline::{Metric, MetricValue, Step},
};

/// Writes one line per vertex.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use sociogram::report::write_node_values;
///
/// let mut out = Vec::new();
/// write_node_values(&mut out, &BTreeMap::from([(1, 0.5), (12, 0.25)])).unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), "Node 01: 0.5000\nNode 12: 0.2500\n");
/// ```
pub fn write_node_values<W, T>(out: &mut W, values: &BTreeMap<T, f64>) -> io::Result<()>
where
    W: Write,
    T: Display,
{
    for (id, value) in values {
        writeln!(out, "Node {id:0>2}: {value:.4}")?;
    }

    Ok(())
}

/// Writes a single titled value.
pub fn write_scalar<W: Write>(out: &mut W, title: &str, value: f64) -> io::Result<()> {
    writeln!(out, "{title}: {value:.4}")
}

/// Writes a single titled value, padding non-negative values with a leading space so they line up
/// with negative ones.
pub fn write_signed_scalar<W: Write>(out: &mut W, title: &str, value: f64) -> io::Result<()> {
    let sign = if value.is_sign_negative() { "" } else { " " };
    writeln!(out, "{title}: {sign}{value:.4}")
}

/// Writes the metric value of a step.
pub fn write_step<W, T>(out: &mut W, step: &Step<T>) -> io::Result<()>
where
    W: Write,
    T: Display,
{
    match &step.value {
        MetricValue::PerNode(values) => write_node_values(out, values),
        MetricValue::Scalar(value) if step.metric == Metric::DegreeAssortativity => {
            write_signed_scalar(out, step.metric.title(), *value)
        }
        MetricValue::Scalar(value) => write_scalar(out, step.metric.title(), *value),
    }
}

/// Writes the degree rank sequence and the degree distribution of a graph.
pub fn write_degree_summary<W, T>(out: &mut W, graph: &Graph<T>, mode: DegreeMode) -> io::Result<()>
where
    W: Write,
    T: Clone + Ord + Debug,
{
    let sequence = graph.degree_sequence(mode);
    let ranked = sequence
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "Degree Rank: {ranked}")?;

    for (degree, count) in graph.degree_histogram(mode) {
        writeln!(out, "Degree {degree}: {count} nodes")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ingest::Records,
        pipeline::{analyse, Config},
    };

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn string_ids_are_not_zero_filled_past_their_width() {
        let values = BTreeMap::from([("Arlington", 1.0)]);

        assert_eq!(
            render(|out| write_node_values(out, &values)),
            "Node Arlington: 1.0000\n"
        );
    }

    #[test]
    fn scalar() {
        assert_eq!(
            render(|out| write_scalar(out, "Assortative Mixing by Degree", -0.5)),
            "Assortative Mixing by Degree: -0.5000\n"
        );
    }

    #[test]
    fn step() {
        let graph = Records::new().edge(1, 2).edge(2, 3).edge(3, 1).undirected().unwrap();
        let step = analyse(&graph, Metric::AverageClustering, &Config::default()).unwrap();

        assert_eq!(
            render(|out| write_step(out, &step)),
            "Average Clustering Coefficient: 1.0000\n"
        );
    }

    #[test]
    fn signed_scalar() {
        assert_eq!(
            render(|out| write_signed_scalar(out, "Assortative Mixing by Degree", 0.25)),
            "Assortative Mixing by Degree:  0.2500\n"
        );
        assert_eq!(
            render(|out| write_signed_scalar(out, "Assortative Mixing by Degree", -0.5)),
            "Assortative Mixing by Degree: -0.5000\n"
        );
    }

    #[test]
    fn assortativity_step_pads_its_sign() {
        let graph = Records::new()
            .edge(1, 2)
            .edge(1, 3)
            .edge(1, 4)
            .undirected()
            .unwrap();
        let step = analyse(&graph, Metric::DegreeAssortativity, &Config::default()).unwrap();

        assert_eq!(
            render(|out| write_step(out, &step)),
            "Assortative Mixing by Degree: -1.0000\n"
        );
    }

    #[test]
    fn degree_summary() {
        let graph = Records::new().edge(1, 2).edge(1, 3).undirected().unwrap();

        assert_eq!(
            render(|out| write_degree_summary(out, &graph, DegreeMode::Total)),
            "Degree Rank: 2 1 1\nDegree 1: 2 nodes\nDegree 2: 1 nodes\n"
        );
    }
}
