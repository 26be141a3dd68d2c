//! Pajek `.net` loader.
//!
//! Understands `*Vertices`, `*Edges`, `*Arcs`, `*Edgeslist`, `*Arcslist` and
//! `*Matrix` sections. Section keywords are case-insensitive, `%` starts a
//! comment line.
//!
//! Directedness comes from the file itself: any arc or matrix section makes
//! the network directed, edge sections alone make it undirected, and a file
//! without edges is directed.

use std::path::Path;

use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::network::{Directedness, Network, NetworkBuilder, Vertex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Vertices { declared: usize, remaining: usize },
    Edges,
    Arcs,
    EdgesList,
    ArcsList,
    Matrix { row: usize },
}

/// Read and parse a Pajek file from disk.
pub fn load_pajek(path: impl AsRef<Path>) -> GraphResult<Network> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let network = parse_pajek(&content)?;
    debug!(
        path = %path.display(),
        nodes = network.node_count(),
        edges = network.edge_count(),
        directed = network.is_directed(),
        "Loaded Pajek network"
    );
    Ok(network)
}

/// Parse Pajek content already in memory.
pub fn parse_pajek(content: &str) -> GraphResult<Network> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut parser = Parser::default();
    for (idx, raw) in content.lines().enumerate() {
        parser.line(idx + 1, raw)?;
    }
    parser.finish()
}

#[derive(Debug)]
struct Parser {
    builder: NetworkBuilder,
    section: Section,
    /// Vertex ids in declaration order, used by `*Matrix`.
    matrix_ids: Vec<String>,
    directed: bool,
    saw_edges: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            builder: NetworkBuilder::new(),
            section: Section::Preamble,
            matrix_ids: Vec::new(),
            directed: false,
            saw_edges: false,
        }
    }
}

impl Parser {
    fn line(&mut self, line_no: usize, raw: &str) -> GraphResult<()> {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('%') {
            return Ok(());
        }

        if line.starts_with('*') {
            return self.section_header(line_no, line);
        }

        match self.section {
            Section::Preamble => Err(GraphError::parse(
                line_no,
                format!("unexpected line outside of a section: {line}"),
            )),
            Section::Vertices {
                declared,
                remaining,
            } => {
                self.vertex_line(line_no, line)?;
                self.section = if remaining <= 1 {
                    Section::Preamble
                } else {
                    Section::Vertices {
                        declared,
                        remaining: remaining - 1,
                    }
                };
                Ok(())
            }
            Section::Edges => self.edge_line(line_no, line, false),
            Section::Arcs => self.edge_line(line_no, line, true),
            Section::EdgesList => self.list_line(line_no, line, false),
            Section::ArcsList => self.list_line(line_no, line, true),
            Section::Matrix { row } => {
                self.matrix_line(line_no, line, row)?;
                self.section = Section::Matrix { row: row + 1 };
                Ok(())
            }
        }
    }

    fn section_header(&mut self, line_no: usize, line: &str) -> GraphResult<()> {
        if let Section::Vertices { declared, .. } = self.section {
            self.fill_implicit_vertices(declared);
        }

        let mut parts = line.split_whitespace();
        let keyword = parts
            .next()
            .map(|k| k.to_ascii_lowercase())
            .unwrap_or_default();

        self.section = match keyword.as_str() {
            "*network" => Section::Preamble,
            "*vertices" => {
                let count = parts.next().ok_or_else(|| {
                    GraphError::parse(line_no, "*Vertices requires a vertex count")
                })?;
                let declared: usize = count.parse().map_err(|_| {
                    GraphError::parse(line_no, format!("invalid vertex count: {count}"))
                })?;
                if declared == 0 {
                    Section::Preamble
                } else {
                    Section::Vertices {
                        declared,
                        remaining: declared,
                    }
                }
            }
            "*edges" => {
                self.saw_edges = true;
                Section::Edges
            }
            "*arcs" => {
                self.directed = true;
                Section::Arcs
            }
            "*edgeslist" => {
                self.saw_edges = true;
                Section::EdgesList
            }
            "*arcslist" => {
                self.directed = true;
                Section::ArcsList
            }
            "*matrix" => {
                self.directed = true;
                Section::Matrix { row: 0 }
            }
            other => {
                return Err(GraphError::parse(
                    line_no,
                    format!("unknown section {other}"),
                ))
            }
        };
        Ok(())
    }

    fn vertex_line(&mut self, line_no: usize, line: &str) -> GraphResult<()> {
        let fields = split_fields(line_no, line)?;
        let id = fields[0].clone();
        let label = fields.get(1).cloned().unwrap_or_else(|| id.clone());
        let position = match (fields.get(2), fields.get(3)) {
            (Some(x), Some(y)) => match (x.parse::<f64>(), y.parse::<f64>()) {
                (Ok(x), Ok(y)) => Some((x, y)),
                _ => None,
            },
            _ => None,
        };

        self.matrix_ids.push(id.clone());
        self.builder.add_vertex(Vertex {
            id,
            label,
            position,
        });
        Ok(())
    }

    /// Pajek allows fewer vertex lines than declared; the missing ones are
    /// the unlisted ids in `1..=N`.
    fn fill_implicit_vertices(&mut self, declared: usize) {
        for n in 1..=declared {
            let id = n.to_string();
            if !self.builder.contains(&id) {
                self.matrix_ids.push(id.clone());
                self.builder.add_vertex(Vertex::unlabeled(id));
            }
        }
    }

    fn edge_line(&mut self, line_no: usize, line: &str, arc: bool) -> GraphResult<()> {
        let fields = split_fields(line_no, line)?;
        if fields.len() < 2 {
            return Ok(());
        }
        // A third field that is not a number starts the attribute list.
        let weight = fields
            .get(2)
            .and_then(|w| w.parse::<f64>().ok())
            .unwrap_or(1.0);
        let from = self.builder.vertex(&fields[0]);
        let to = self.builder.vertex(&fields[1]);
        self.push(from, to, weight, arc);
        Ok(())
    }

    fn list_line(&mut self, line_no: usize, line: &str, arc: bool) -> GraphResult<()> {
        let fields = split_fields(line_no, line)?;
        let Some((head, targets)) = fields.split_first() else {
            return Ok(());
        };
        let from = self.builder.vertex(head);
        for target in targets {
            let to = self.builder.vertex(target);
            self.push(from, to, 1.0, arc);
        }
        Ok(())
    }

    fn matrix_line(&mut self, line_no: usize, line: &str, row: usize) -> GraphResult<()> {
        let Some(row_id) = self.matrix_ids.get(row).cloned() else {
            return Err(GraphError::parse(
                line_no,
                format!("matrix row {} has no matching vertex", row + 1),
            ));
        };
        for (col, cell) in line.split_whitespace().enumerate() {
            let weight: f64 = cell.parse().map_err(|_| {
                GraphError::parse(line_no, format!("invalid matrix entry: {cell}"))
            })?;
            if weight == 0.0 {
                continue;
            }
            let Some(col_id) = self.matrix_ids.get(col).cloned() else {
                return Err(GraphError::parse(
                    line_no,
                    format!("matrix column {} has no matching vertex", col + 1),
                ));
            };
            let from = self.builder.vertex(&row_id);
            let to = self.builder.vertex(&col_id);
            self.builder.add_arc(from, to, weight);
        }
        Ok(())
    }

    fn push(&mut self, from: usize, to: usize, weight: f64, arc: bool) {
        if arc {
            self.builder.add_arc(from, to, weight);
        } else {
            self.builder.add_edge(from, to, weight);
        }
    }

    fn finish(mut self) -> GraphResult<Network> {
        if let Section::Vertices { declared, .. } = self.section {
            self.fill_implicit_vertices(declared);
        }
        let directedness = if self.directed || !self.saw_edges {
            Directedness::Directed
        } else {
            Directedness::Undirected
        };
        Ok(self.builder.build(directedness))
    }
}

/// Split a line on whitespace, keeping double-quoted fields together.
fn split_fields(line_no: usize, line: &str) -> GraphResult<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    fields.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }
    if in_quotes {
        return Err(GraphError::parse(line_no, "unterminated quoted field"));
    }
    if !current.is_empty() || quoted {
        fields.push(current);
    }
    if fields.is_empty() {
        return Err(GraphError::parse(line_no, "empty record"));
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SQUARE: &str = "*Vertices 4\n1 \"A\" 0.1 0.1 0.5\n2 \"B\"\n3 \"C\"\n4 \"D\"\n*Edges\n1 2 1\n2 3 1\n3 4\n4 1\n";

    #[test]
    fn test_parse_undirected() {
        let net = parse_pajek(SQUARE).unwrap();
        assert_eq!(net.directedness(), Directedness::Undirected);
        assert_eq!(net.node_count(), 4);
        assert_eq!(net.edge_count(), 4);
        let first = net.vertex(0).unwrap();
        assert_eq!(first.label, "A");
        assert_eq!(first.position, Some((0.1, 0.1)));
    }

    #[test]
    fn test_parse_arcs_is_directed() {
        let content = "*Network demo\n*Vertices 3\n1 \"a\"\n2 \"b\"\n3 \"c\"\n*Arcs\n1 2\n2 3\n3 1\n";
        let net = parse_pajek(content).unwrap();
        assert!(net.is_directed());
        assert_eq!(net.edge_count(), 3);
        assert!(net.is_connected());
    }

    #[test]
    fn test_no_edge_section_is_directed() {
        let net = parse_pajek("*Vertices 2\n1 \"a\"\n2 \"b\"\n").unwrap();
        assert!(net.is_directed());
        assert_eq!(net.edge_count(), 0);
    }

    #[test]
    fn test_implicit_vertices() {
        let net = parse_pajek("*Vertices 3\n*Edges\n1 2\n2 3\n").unwrap();
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.vertex(2).map(|v| v.label.as_str()), Some("3"));
    }

    #[test]
    fn test_quoted_labels_with_spaces_and_comments() {
        let content =
            "% toy network\n*vertices 2\n1 \"New York\"\n2 \"Los Angeles\"\n\n*edges\n1 2 3.5\n";
        let net = parse_pajek(content).unwrap();
        let labels: Vec<&str> = net.vertices().iter().map(|v| v.label.as_str()).collect();
        assert_eq!(labels, vec!["New York", "Los Angeles"]);
    }

    #[test]
    fn test_edges_list_and_matrix() {
        let list = parse_pajek("*Vertices 3\n*Edgeslist\n1 2 3\n").unwrap();
        assert_eq!(list.edge_count(), 2);
        assert!(!list.is_directed());

        let matrix = parse_pajek("*Vertices 2\n*Matrix\n0 1\n1 0\n").unwrap();
        assert!(matrix.is_directed());
        assert_eq!(matrix.edge_count(), 2);
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            parse_pajek("*Vertices many\n"),
            Err(GraphError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_pajek("*Vertices 2\n1 \"a\n"),
            Err(GraphError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            parse_pajek("1 2\n"),
            Err(GraphError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_pajek("*Hyperedges\n"),
            Err(GraphError::Parse { .. })
        ));
    }

    #[test]
    fn test_edge_attributes_without_weight() {
        let content = "*Vertices 3\n1 \"a\"\n2 \"b\"\n3 \"c\"\n*Edges\n1 2 c Blue\n2 3 2.5 c Red\n";
        let Network::Undirected(g) = parse_pajek(content).unwrap() else {
            panic!("edge sections should load undirected");
        };
        let weights: Vec<f64> = g.edge_indices().filter_map(|e| g.edge_weight(e).copied()).collect();
        assert_eq!(weights, vec![1.0, 2.5]);
    }

    #[test]
    fn test_leading_byte_order_mark() {
        let net = parse_pajek("\u{feff}*Vertices 2\n*Edges\n1 2\n").unwrap();
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 1);
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SQUARE.as_bytes()).unwrap();
        let net = load_pajek(file.path()).unwrap();
        assert_eq!(net.edge_count(), 4);
    }

    #[test]
    fn test_missing_file() {
        let err = load_pajek("/definitely/not/here.net").unwrap_err();
        assert!(matches!(err, GraphError::Io { .. }));
    }
}
