//! Core network model shared across the netdesc workspace.
//!
//! A [`Network`] is loaded once from a Pajek file, normalized to an explicit
//! directed or undirected simple graph, and never mutated afterwards.

mod error;
mod network;
pub mod pajek;

pub use error::{GraphError, GraphResult};
pub use network::{
    network_from_pairs, DirectedGraph, Directedness, Network, NetworkBuilder, UndirectedGraph,
    Vertex,
};
pub use pajek::{load_pajek, parse_pajek};
