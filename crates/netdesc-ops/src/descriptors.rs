//! Structural descriptors of a network.
//!
//! All metrics are unweighted and use total degree. Path-based metrics need
//! a connected network (strongly connected when directed); extraction is
//! all-or-nothing, so one undefined metric fails the whole vector.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use netdesc_core::{Directedness, Network};

/// Reasons a descriptor cannot be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("network has no nodes")]
    EmptyGraph,

    #[error("assortativity is undefined for a network without edges")]
    NoEdges,

    #[error("path lengths are undefined on a disconnected {directedness} network")]
    Disconnected { directedness: Directedness },
}

/// The nine metrics extracted from a network, in report order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptors {
    pub node_count: usize,
    pub edge_count: usize,
    pub min_degree: usize,
    pub max_degree: usize,
    pub avg_degree: f64,
    /// `NaN` when the degrees at either end of the edges have zero variance.
    pub assortativity: f64,
    pub avg_clustering: f64,
    pub avg_path_length: f64,
    pub diameter: usize,
}

impl Descriptors {
    /// Prepend the network name.
    pub fn named(self, name: impl Into<String>) -> DescriptorVector {
        DescriptorVector::new(name, self)
    }
}

/// One report row: a network name followed by its descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptorVector {
    pub name: String,
    #[serde(flatten)]
    pub descriptors: Descriptors,
}

/// Row labels, in the fixed column order of the report.
pub const DESCRIPTOR_LABELS: [&str; 10] = [
    "Network",
    "Number of nodes",
    "Number of edges",
    "Minimum degree",
    "Maximum degree",
    "Average degree",
    "Assortativity",
    "Average clustering",
    "Average path length",
    "Diameter",
];

impl DescriptorVector {
    pub fn new(name: impl Into<String>, descriptors: Descriptors) -> Self {
        Self {
            name: name.into(),
            descriptors,
        }
    }

    /// Field values as text, aligned with [`DESCRIPTOR_LABELS`].
    ///
    /// Floats use the shortest round-trip form (`2.0`, `NaN`).
    pub fn values(&self) -> [String; 10] {
        let d = &self.descriptors;
        [
            self.name.clone(),
            d.node_count.to_string(),
            d.edge_count.to_string(),
            d.min_degree.to_string(),
            d.max_degree.to_string(),
            format!("{:?}", d.avg_degree),
            format!("{:?}", d.assortativity),
            format!("{:?}", d.avg_clustering),
            format!("{:?}", d.avg_path_length),
            d.diameter.to_string(),
        ]
    }

    /// `(label, value)` pairs in report order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        DESCRIPTOR_LABELS.into_iter().zip(self.values()).collect()
    }
}

/// Compute every descriptor of `network`.
pub fn extract(network: &Network) -> Result<Descriptors, DescriptorError> {
    let node_count = network.node_count();
    let edge_count = network.edge_count();

    let mut sorted_degrees = network.degrees();
    sorted_degrees.sort_unstable();
    let (Some(&min_degree), Some(&max_degree)) = (sorted_degrees.first(), sorted_degrees.last())
    else {
        return Err(DescriptorError::EmptyGraph);
    };

    let avg_degree = match network.directedness() {
        Directedness::Directed => edge_count as f64 / node_count as f64,
        Directedness::Undirected => 2.0 * edge_count as f64 / node_count as f64,
    };

    let adjacency = Adjacency::new(network);
    let assortativity = assortativity(network)?;
    let avg_clustering = average_clustering(&adjacency);
    let (avg_path_length, diameter) = path_lengths(network, &adjacency)?;

    debug!(
        nodes = node_count,
        edges = edge_count,
        diameter,
        "Extracted descriptors"
    );

    Ok(Descriptors {
        node_count,
        edge_count,
        min_degree,
        max_degree,
        avg_degree,
        assortativity,
        avg_clustering,
        avg_path_length,
        diameter,
    })
}

/// Dense, deduplicated neighbor lists.
///
/// For undirected networks `succ` and `pred` are the same symmetric lists.
#[derive(Debug)]
struct Adjacency {
    directed: bool,
    succ: Vec<Vec<usize>>,
    pred: Vec<Vec<usize>>,
}

impl Adjacency {
    fn new(network: &Network) -> Self {
        let n = network.node_count();
        let directed = network.is_directed();
        let mut succ = vec![Vec::new(); n];
        let mut pred = vec![Vec::new(); n];

        for (u, v) in network.edges() {
            succ[u].push(v);
            pred[v].push(u);
            if !directed && u != v {
                succ[v].push(u);
                pred[u].push(v);
            }
        }
        for list in succ.iter_mut().chain(pred.iter_mut()) {
            list.sort_unstable();
            list.dedup();
        }

        Self {
            directed,
            succ,
            pred,
        }
    }

    fn len(&self) -> usize {
        self.succ.len()
    }

    /// Successors of `v` excluding `v` itself.
    fn succ_without_self(&self, v: usize) -> Vec<usize> {
        self.succ[v].iter().copied().filter(|&w| w != v).collect()
    }

    /// Predecessors of `v` excluding `v` itself.
    fn pred_without_self(&self, v: usize) -> Vec<usize> {
        self.pred[v].iter().copied().filter(|&w| w != v).collect()
    }
}

/// Size of the intersection of two sorted, deduplicated lists.
fn intersection_len(a: &[usize], b: &[usize]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

/// Pearson correlation of degrees at both ends of every edge.
///
/// Undirected: each edge contributes both orientations, a self-loop once.
/// Directed: an arc `u -> v` contributes `(out_degree(u), in_degree(v))`.
fn assortativity(network: &Network) -> Result<f64, DescriptorError> {
    let pairs: Vec<(f64, f64)> = if network.is_directed() {
        let out = network.out_degrees();
        let inc = network.in_degrees();
        network
            .edges()
            .into_iter()
            .map(|(u, v)| (out[u] as f64, inc[v] as f64))
            .collect()
    } else {
        let degree = network.degrees();
        network
            .edges()
            .into_iter()
            .flat_map(|(u, v)| {
                let forward = (degree[u] as f64, degree[v] as f64);
                let backward = (degree[v] as f64, degree[u] as f64);
                if u == v {
                    vec![forward]
                } else {
                    vec![forward, backward]
                }
            })
            .collect()
    };

    if pairs.is_empty() {
        return Err(DescriptorError::NoEdges);
    }
    Ok(pearson(&pairs))
}

/// Pearson correlation coefficient; `NaN` when either side has no variance.
fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    (cov / denom).clamp(-1.0, 1.0)
}

/// Mean of the local clustering coefficient over every node.
fn average_clustering(adjacency: &Adjacency) -> f64 {
    let n = adjacency.len();
    if n == 0 {
        return 0.0;
    }
    let total: f64 = (0..n)
        .map(|v| {
            if adjacency.directed {
                directed_clustering(adjacency, v)
            } else {
                undirected_clustering(adjacency, v)
            }
        })
        .sum();
    total / n as f64
}

/// `2T / (d (d - 1))` over the neighbor set without self-loops.
fn undirected_clustering(adjacency: &Adjacency, v: usize) -> f64 {
    let neighbors = adjacency.succ_without_self(v);
    let d = neighbors.len();
    if d < 2 {
        return 0.0;
    }
    // Each triangle through `v` is seen from both of its other corners.
    let twice_triangles: usize = neighbors
        .iter()
        .map(|&w| intersection_len(&neighbors, &adjacency.succ_without_self(w)))
        .sum();
    if twice_triangles == 0 {
        return 0.0;
    }
    twice_triangles as f64 / (d * (d - 1)) as f64
}

/// Directed clustering: `T / (2 (d_tot (d_tot - 1) - 2 d_bi))`.
fn directed_clustering(adjacency: &Adjacency, i: usize) -> f64 {
    let ipred = adjacency.pred_without_self(i);
    let isucc = adjacency.succ_without_self(i);

    let mut triangles = 0usize;
    for &j in ipred.iter().chain(isucc.iter()) {
        let jpred = adjacency.pred_without_self(j);
        let jsucc = adjacency.succ_without_self(j);
        triangles += intersection_len(&ipred, &jpred)
            + intersection_len(&ipred, &jsucc)
            + intersection_len(&isucc, &jpred)
            + intersection_len(&isucc, &jsucc);
    }
    if triangles == 0 {
        return 0.0;
    }

    let total = ipred.len() + isucc.len();
    let reciprocal = intersection_len(&ipred, &isucc);
    let possible = 2 * (total * (total - 1) - 2 * reciprocal);
    triangles as f64 / possible as f64
}

/// Average shortest path length over ordered pairs, and the diameter.
fn path_lengths(network: &Network, adjacency: &Adjacency) -> Result<(f64, usize), DescriptorError> {
    let n = adjacency.len();
    if !network.is_connected() {
        return Err(DescriptorError::Disconnected {
            directedness: network.directedness(),
        });
    }
    if n == 1 {
        return Ok((0.0, 0));
    }

    let mut total: u64 = 0;
    let mut diameter = 0usize;
    let mut dist = vec![usize::MAX; n];
    let mut queue = VecDeque::with_capacity(n);

    for source in 0..n {
        dist.fill(usize::MAX);
        dist[source] = 0;
        queue.clear();
        queue.push_back(source);

        let mut eccentricity = 0;
        let mut reached = 1;
        while let Some(u) = queue.pop_front() {
            for &v in &adjacency.succ[u] {
                if dist[v] == usize::MAX {
                    dist[v] = dist[u] + 1;
                    total += dist[v] as u64;
                    eccentricity = eccentricity.max(dist[v]);
                    reached += 1;
                    queue.push_back(v);
                }
            }
        }
        if reached != n {
            return Err(DescriptorError::Disconnected {
                directedness: network.directedness(),
            });
        }
        diameter = diameter.max(eccentricity);
    }

    let pairs = (n * (n - 1)) as f64;
    Ok((total as f64 / pairs, diameter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use netdesc_core::network_from_pairs;

    fn square() -> Network {
        network_from_pairs(
            Directedness::Undirected,
            &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")],
        )
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_four_cycle() {
        let d = extract(&square()).unwrap();
        assert_eq!(d.node_count, 4);
        assert_eq!(d.edge_count, 4);
        assert_eq!(d.min_degree, 2);
        assert_eq!(d.max_degree, 2);
        assert_eq!(d.avg_degree, 2.0);
        assert_eq!(d.avg_clustering, 0.0);
        assert_eq!(d.diameter, 2);
        assert!(close(d.avg_path_length, 16.0 / 12.0));
        // Regular graph: no degree variance.
        assert!(d.assortativity.is_nan());
    }

    #[test]
    fn test_triangle_clustering() {
        let triangle = network_from_pairs(
            Directedness::Undirected,
            &[("A", "B"), ("B", "C"), ("C", "A")],
        );
        let d = extract(&triangle).unwrap();
        assert_eq!(d.avg_clustering, 1.0);
        assert_eq!(d.diameter, 1);
        assert_eq!(d.avg_path_length, 1.0);
    }

    #[test]
    fn test_star_is_disassortative() {
        let star = network_from_pairs(
            Directedness::Undirected,
            &[("h", "a"), ("h", "b"), ("h", "c"), ("h", "d")],
        );
        let d = extract(&star).unwrap();
        assert_eq!(d.min_degree, 1);
        assert_eq!(d.max_degree, 4);
        assert!(close(d.assortativity, -1.0));
        assert_eq!(d.avg_clustering, 0.0);
        assert_eq!(d.diameter, 2);
        // 4 spokes at distance 1 (both ways) + 12 leaf pairs at distance 2.
        assert!(close(d.avg_path_length, (8.0 + 24.0) / 20.0));
    }

    #[test]
    fn test_paw_clustering() {
        // Triangle a-b-c with pendant d on c.
        let paw = network_from_pairs(
            Directedness::Undirected,
            &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")],
        );
        let d = extract(&paw).unwrap();
        let expected = (1.0 + 1.0 + 1.0 / 3.0 + 0.0) / 4.0;
        assert!(close(d.avg_clustering, expected));
    }

    #[test]
    fn test_directed_cycle() {
        let cycle =
            network_from_pairs(Directedness::Directed, &[("A", "B"), ("B", "C"), ("C", "A")]);
        let d = extract(&cycle).unwrap();
        assert_eq!(d.avg_degree, 1.0);
        assert_eq!(d.min_degree, 2);
        assert_eq!(d.diameter, 2);
        assert!(close(d.avg_path_length, 1.5));
        // Each node has one predecessor and one successor that are linked.
        assert!(close(d.avg_clustering, 0.5));
    }

    #[test]
    fn test_undirected_self_loops() {
        // Two triangles sharing c, a pendant f, self-loops on a and d.
        let net = network_from_pairs(
            Directedness::Undirected,
            &[
                ("a", "b"),
                ("b", "c"),
                ("c", "a"),
                ("c", "d"),
                ("d", "e"),
                ("e", "c"),
                ("e", "f"),
                ("a", "a"),
                ("d", "d"),
            ],
        );
        let d = extract(&net).unwrap();
        assert_eq!(d.node_count, 6);
        assert_eq!(d.edge_count, 9);
        assert_eq!(d.min_degree, 1);
        assert_eq!(d.max_degree, 4);
        assert_eq!(d.avg_degree, 3.0);
        // 14 pairs from the plain edges, one per self-loop.
        assert!(close(d.assortativity, -1.0 / 55.0));
        // Self-loops are not neighbours: a and d keep a clustering of 1.
        assert!(close(d.avg_clustering, 11.0 / 18.0));
        assert!(close(d.avg_path_length, 5.0 / 3.0));
        assert_eq!(d.diameter, 3);
    }

    #[test]
    fn test_directed_assortativity_and_clustering() {
        let net = network_from_pairs(
            Directedness::Directed,
            &[
                ("a", "b"),
                ("b", "c"),
                ("c", "a"),
                ("a", "c"),
                ("c", "d"),
                ("d", "a"),
                ("d", "d"),
                ("d", "e"),
                ("e", "a"),
                ("b", "e"),
            ],
        );
        let d = extract(&net).unwrap();
        assert_eq!(d.node_count, 5);
        assert_eq!(d.edge_count, 10);
        assert_eq!(d.min_degree, 3);
        assert_eq!(d.max_degree, 5);
        assert_eq!(d.avg_degree, 2.0);
        // Pairs are (out-degree of source, in-degree of target).
        assert!(close(d.assortativity, -1.0 / 9.0));
        assert!(close(d.avg_clustering, 31.0 / 75.0));
        assert!(close(d.avg_path_length, 1.6));
        assert_eq!(d.diameter, 3);
    }

    #[test]
    fn test_avg_degree_formula() {
        let undirected = network_from_pairs(
            Directedness::Undirected,
            &[("1", "2"), ("2", "3"), ("3", "4"), ("4", "1"), ("1", "3")],
        );
        let d = extract(&undirected).unwrap();
        assert_eq!(d.avg_degree, 2.0 * 5.0 / 4.0);

        let directed = network_from_pairs(
            Directedness::Directed,
            &[("1", "2"), ("2", "3"), ("3", "1"), ("1", "3")],
        );
        let d = extract(&directed).unwrap();
        assert_eq!(d.avg_degree, 4.0 / 3.0);
    }

    #[test]
    fn test_degree_extrema_bound_every_node() {
        let net = network_from_pairs(
            Directedness::Undirected,
            &[("a", "b"), ("a", "c"), ("a", "d"), ("b", "c"), ("d", "e")],
        );
        let d = extract(&net).unwrap();
        for degree in net.degrees() {
            assert!(degree >= d.min_degree && degree <= d.max_degree);
        }
        assert!(net.degrees().contains(&d.min_degree));
        assert!(net.degrees().contains(&d.max_degree));
    }

    #[test]
    fn test_disconnected_fails() {
        let split = network_from_pairs(Directedness::Undirected, &[("A", "B"), ("C", "D")]);
        assert_eq!(
            extract(&split),
            Err(DescriptorError::Disconnected {
                directedness: Directedness::Undirected
            })
        );

        let path = network_from_pairs(Directedness::Directed, &[("A", "B"), ("B", "C")]);
        assert!(matches!(
            extract(&path),
            Err(DescriptorError::Disconnected { .. })
        ));
    }

    #[test]
    fn test_empty_and_edgeless() {
        let empty = netdesc_core::NetworkBuilder::new().build(Directedness::Undirected);
        assert_eq!(extract(&empty), Err(DescriptorError::EmptyGraph));

        let mut builder = netdesc_core::NetworkBuilder::new();
        builder.vertex("lonely");
        let single = builder.build(Directedness::Undirected);
        assert_eq!(extract(&single), Err(DescriptorError::NoEdges));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let net = network_from_pairs(
            Directedness::Undirected,
            &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d"), ("d", "e"), ("e", "c")],
        );
        let first = extract(&net).unwrap();
        let second = extract(&net).unwrap();
        assert_eq!(first.values_bits(), second.values_bits());
    }

    #[test]
    fn test_values_formatting() {
        let row = extract(&square()).unwrap().named("square");
        let values = row.values();
        assert_eq!(values[0], "square");
        assert_eq!(values[5], "2.0");
        assert_eq!(values[6], "NaN");
        assert_eq!(values[8], "1.3333333333333333");
        assert_eq!(values[9], "2");
    }

    impl Descriptors {
        fn values_bits(&self) -> [u64; 4] {
            [
                self.avg_degree.to_bits(),
                self.assortativity.to_bits(),
                self.avg_clustering.to_bits(),
                self.avg_path_length.to_bits(),
            ]
        }
    }
}
