//! Network model: a simple graph tagged with its directedness.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::stable_graph::{NodeIndex, StableDiGraph, StableUnGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::{Deserialize, Serialize};

/// Whether edges of a network are ordered pairs or unordered pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Directedness {
    /// Edges are arcs `u -> v`.
    Directed,
    /// Edges are unordered `{u, v}`.
    Undirected,
}

impl Directedness {
    /// Get a display label for the directedness.
    pub fn label(&self) -> &'static str {
        match self {
            Directedness::Directed => "directed",
            Directedness::Undirected => "undirected",
        }
    }
}

impl std::fmt::Display for Directedness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A vertex as declared in the network file.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Identifier used by the edge sections.
    pub id: String,
    /// Human readable label.
    pub label: String,
    /// Layout coordinates, when the file provides them.
    pub position: Option<(f64, f64)>,
}

impl Vertex {
    /// Vertex whose label is its identifier.
    pub fn unlabeled(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            position: None,
        }
    }
}

/// Directed storage: node weight is the vertex, edge weight the Pajek weight.
pub type DirectedGraph = StableDiGraph<Vertex, f64>;

/// Undirected storage.
pub type UndirectedGraph = StableUnGraph<Vertex, f64>;

/// A loaded network, normalized to one explicit representation.
///
/// Both variants are simple graphs: parallel edges are collapsed while
/// self-loops are kept. Nodes are never removed after construction, so node
/// indices are dense in `0..node_count()`.
#[derive(Debug, Clone)]
pub enum Network {
    Directed(DirectedGraph),
    Undirected(UndirectedGraph),
}

impl Network {
    /// Directedness tag of this network.
    pub fn directedness(&self) -> Directedness {
        match self {
            Network::Directed(_) => Directedness::Directed,
            Network::Undirected(_) => Directedness::Undirected,
        }
    }

    pub fn is_directed(&self) -> bool {
        matches!(self, Network::Directed(_))
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        match self {
            Network::Directed(g) => g.node_count(),
            Network::Undirected(g) => g.node_count(),
        }
    }

    /// Number of edges; a self-loop counts once.
    pub fn edge_count(&self) -> usize {
        match self {
            Network::Directed(g) => g.edge_count(),
            Network::Undirected(g) => g.edge_count(),
        }
    }

    /// Vertex stored at a dense node index.
    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        let idx = NodeIndex::new(index);
        match self {
            Network::Directed(g) => g.node_weight(idx),
            Network::Undirected(g) => g.node_weight(idx),
        }
    }

    /// All vertices in node index order.
    pub fn vertices(&self) -> Vec<&Vertex> {
        (0..self.node_count())
            .filter_map(|i| self.vertex(i))
            .collect()
    }

    /// Edge endpoints as dense node indices, in insertion order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        match self {
            Network::Directed(g) => g
                .edge_references()
                .map(|e| (e.source().index(), e.target().index()))
                .collect(),
            Network::Undirected(g) => g
                .edge_references()
                .map(|e| (e.source().index(), e.target().index()))
                .collect(),
        }
    }

    /// Out-degree per node. Equals `degrees()` for undirected networks.
    pub fn out_degrees(&self) -> Vec<usize> {
        if !self.is_directed() {
            return self.degrees();
        }
        let mut out = vec![0; self.node_count()];
        for (u, _) in self.edges() {
            out[u] += 1;
        }
        out
    }

    /// In-degree per node. Equals `degrees()` for undirected networks.
    pub fn in_degrees(&self) -> Vec<usize> {
        if !self.is_directed() {
            return self.degrees();
        }
        let mut inc = vec![0; self.node_count()];
        for (_, v) in self.edges() {
            inc[v] += 1;
        }
        inc
    }

    /// Total degree per node.
    ///
    /// Undirected self-loops add two to their node; directed degree is
    /// in-degree plus out-degree.
    pub fn degrees(&self) -> Vec<usize> {
        let mut degree = vec![0; self.node_count()];
        for (u, v) in self.edges() {
            degree[u] += 1;
            degree[v] += 1;
        }
        degree
    }

    /// Frequency of each degree value, indexed by degree from 0 to the maximum.
    pub fn degree_histogram(&self) -> Vec<usize> {
        let degrees = self.degrees();
        let Some(&max) = degrees.iter().max() else {
            return Vec::new();
        };
        let mut freqs = vec![0; max + 1];
        for d in degrees {
            freqs[d] += 1;
        }
        freqs
    }

    /// Whether every node reaches every other node.
    ///
    /// Directed networks must be strongly connected. An empty network is
    /// not connected.
    pub fn is_connected(&self) -> bool {
        let components = match self {
            Network::Directed(g) => tarjan_scc(g).len(),
            Network::Undirected(g) => tarjan_scc(g).len(),
        };
        components == 1
    }
}

#[derive(Debug, Clone, Copy)]
struct RawEdge {
    from: usize,
    to: usize,
    weight: f64,
    arc: bool,
}

/// Incremental builder used by the loaders.
///
/// Vertices are keyed by their file identifier. Edges are kept raw until
/// `build` knows the final directedness.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    vertices: Vec<Vertex>,
    id_to_index: HashMap<String, usize>,
    edges: Vec<RawEdge>,
}

impl NetworkBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a vertex. Re-declaring an id updates its label and position.
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        if let Some(&idx) = self.id_to_index.get(&vertex.id) {
            self.vertices[idx] = vertex;
            return idx;
        }
        let idx = self.vertices.len();
        self.id_to_index.insert(vertex.id.clone(), idx);
        self.vertices.push(vertex);
        idx
    }

    /// Index of the vertex with this id, created unlabeled if unknown.
    pub fn vertex(&mut self, id: &str) -> usize {
        match self.id_to_index.get(id) {
            Some(&idx) => idx,
            None => self.add_vertex(Vertex::unlabeled(id)),
        }
    }

    /// Whether a vertex with this id has been declared.
    pub fn contains(&self, id: &str) -> bool {
        self.id_to_index.contains_key(id)
    }

    /// Add an unordered edge.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) {
        self.edges.push(RawEdge {
            from,
            to,
            weight,
            arc: false,
        });
    }

    /// Add an ordered arc.
    pub fn add_arc(&mut self, from: usize, to: usize, weight: f64) {
        self.edges.push(RawEdge {
            from,
            to,
            weight,
            arc: true,
        });
    }

    /// Build the final simple `Network`.
    ///
    /// Directed: an unordered edge becomes a reciprocal pair of arcs.
    /// Undirected: arcs lose their orientation. Parallel edges collapse and
    /// the last weight wins.
    pub fn build(self, directedness: Directedness) -> Network {
        let mut order: Vec<(usize, usize)> = Vec::new();
        let mut weights: HashMap<(usize, usize), f64> = HashMap::new();
        let mut insert = |key: (usize, usize), weight: f64| {
            if weights.insert(key, weight).is_none() {
                order.push(key);
            }
        };

        for edge in &self.edges {
            match directedness {
                Directedness::Directed => {
                    insert((edge.from, edge.to), edge.weight);
                    if !edge.arc && edge.from != edge.to {
                        insert((edge.to, edge.from), edge.weight);
                    }
                }
                Directedness::Undirected => {
                    let key = (edge.from.min(edge.to), edge.from.max(edge.to));
                    insert(key, edge.weight);
                }
            }
        }

        match directedness {
            Directedness::Directed => {
                let mut g = DirectedGraph::with_capacity(self.vertices.len(), order.len());
                let nodes: Vec<NodeIndex> =
                    self.vertices.into_iter().map(|v| g.add_node(v)).collect();
                for key in order {
                    g.add_edge(nodes[key.0], nodes[key.1], weights[&key]);
                }
                Network::Directed(g)
            }
            Directedness::Undirected => {
                let mut g = UndirectedGraph::with_capacity(self.vertices.len(), order.len());
                let nodes: Vec<NodeIndex> =
                    self.vertices.into_iter().map(|v| g.add_node(v)).collect();
                for key in order {
                    g.add_edge(nodes[key.0], nodes[key.1], weights[&key]);
                }
                Network::Undirected(g)
            }
        }
    }
}

/// Build a network from labeled edge pairs; vertices appear in first-seen order.
pub fn network_from_pairs(directedness: Directedness, pairs: &[(&str, &str)]) -> Network {
    let mut builder = NetworkBuilder::new();
    for (u, v) in pairs {
        let from = builder.vertex(u);
        let to = builder.vertex(v);
        match directedness {
            Directedness::Directed => builder.add_arc(from, to, 1.0),
            Directedness::Undirected => builder.add_edge(from, to, 1.0),
        }
    }
    builder.build(directedness)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Network {
        network_from_pairs(
            Directedness::Undirected,
            &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")],
        )
    }

    #[test]
    fn test_counts_and_degrees() {
        let net = square();
        assert_eq!(net.node_count(), 4);
        assert_eq!(net.edge_count(), 4);
        assert_eq!(net.degrees(), vec![2, 2, 2, 2]);
        assert_eq!(net.directedness(), Directedness::Undirected);
    }

    #[test]
    fn test_parallel_edges_collapse() {
        let net = network_from_pairs(
            Directedness::Undirected,
            &[("A", "B"), ("B", "A"), ("A", "B")],
        );
        assert_eq!(net.edge_count(), 1);
        assert_eq!(net.degrees(), vec![1, 1]);
    }

    #[test]
    fn test_reciprocal_arcs_are_distinct() {
        let net = network_from_pairs(Directedness::Directed, &[("A", "B"), ("B", "A")]);
        assert_eq!(net.edge_count(), 2);
        assert_eq!(net.out_degrees(), vec![1, 1]);
        assert_eq!(net.in_degrees(), vec![1, 1]);
        assert_eq!(net.degrees(), vec![2, 2]);
    }

    #[test]
    fn test_self_loop_degree() {
        let net = network_from_pairs(Directedness::Undirected, &[("A", "A"), ("A", "B")]);
        assert_eq!(net.edge_count(), 2);
        assert_eq!(net.degrees(), vec![3, 1]);
        assert_eq!(net.degree_histogram(), vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_undirected_edge_in_directed_build() {
        let mut builder = NetworkBuilder::new();
        let a = builder.vertex("1");
        let b = builder.vertex("2");
        builder.add_edge(a, b, 2.5);
        let net = builder.build(Directedness::Directed);
        assert_eq!(net.edge_count(), 2);
        assert!(net.is_connected());
    }

    #[test]
    fn test_connectivity() {
        assert!(square().is_connected());

        let split = network_from_pairs(Directedness::Undirected, &[("A", "B"), ("C", "D")]);
        assert!(!split.is_connected());

        let path = network_from_pairs(Directedness::Directed, &[("A", "B"), ("B", "C")]);
        assert!(!path.is_connected());

        let cycle =
            network_from_pairs(Directedness::Directed, &[("A", "B"), ("B", "C"), ("C", "A")]);
        assert!(cycle.is_connected());

        let empty = NetworkBuilder::new().build(Directedness::Undirected);
        assert!(!empty.is_connected());
    }

    #[test]
    fn test_redeclared_vertex_keeps_index() {
        let mut builder = NetworkBuilder::new();
        let first = builder.vertex("7");
        let again = builder.add_vertex(Vertex {
            id: "7".to_string(),
            label: "seven".to_string(),
            position: Some((0.5, 0.5)),
        });
        assert_eq!(first, again);
        let net = builder.build(Directedness::Undirected);
        assert_eq!(net.vertex(0).map(|v| v.label.as_str()), Some("seven"));
    }
}
