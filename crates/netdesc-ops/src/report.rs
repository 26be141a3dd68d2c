//! Descriptor sinks: a console block and an append-only CSV table.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::descriptors::{DescriptorVector, DESCRIPTOR_LABELS};
use crate::error::OpsResult;

const RULE: &str = "-------------------------------------";

/// Bordered console block, one `| label: value` line per descriptor.
pub fn format_descriptors(row: &DescriptorVector) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    for (label, value) in row.fields() {
        out.push_str(&format!("| {label}: {value}\n"));
    }
    out.push_str(RULE);
    out
}

/// Print the console block to stdout.
pub fn print_descriptors(row: &DescriptorVector) {
    println!("{}", format_descriptors(row));
}

/// Header and rows read back from a descriptor table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Append-only descriptor table on disk.
///
/// The header is written only when the file does not exist yet, rows are
/// never deduplicated.
#[derive(Debug, Clone)]
pub struct CsvReport {
    path: PathBuf,
}

impl CsvReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, writing the header first if the table is new.
    pub fn append(&self, row: &DescriptorVector) -> OpsResult<()> {
        let is_new = !self.path.exists();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            writer.write_record(DESCRIPTOR_LABELS)?;
        }
        writer.write_record(row.values())?;
        writer.flush()?;

        debug!(path = %self.path.display(), network = %row.name, new_file = is_new, "Appended descriptor row");
        Ok(())
    }

    /// Read the whole table back.
    pub fn read_table(&self) -> OpsResult<DescriptorTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;

        let header = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(DescriptorTable { header, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptors::Descriptors;
    use tempfile::TempDir;

    fn row(name: &str) -> DescriptorVector {
        DescriptorVector::new(
            name,
            Descriptors {
                node_count: 4,
                edge_count: 4,
                min_degree: 2,
                max_degree: 2,
                avg_degree: 2.0,
                assortativity: f64::NAN,
                avg_clustering: 0.0,
                avg_path_length: 4.0 / 3.0,
                diameter: 2,
            },
        )
    }

    #[test]
    fn test_console_block() {
        let block = format_descriptors(&row("square"));
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], RULE);
        assert_eq!(lines[1], "| Network: square");
        assert_eq!(lines[6], "| Average degree: 2.0");
        assert_eq!(lines[7], "| Assortativity: NaN");
        assert_eq!(lines[10], "| Diameter: 2");
        assert_eq!(lines[11], RULE);
    }

    #[test]
    fn test_header_written_once() {
        let dir = TempDir::new().unwrap();
        let report = CsvReport::new(dir.path().join("nested").join("out.csv"));

        report.append(&row("square")).unwrap();
        report.append(&row("square")).unwrap();

        let text = std::fs::read_to_string(report.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Network,Number of nodes,Number of edges,Minimum degree,Maximum degree,\
             Average degree,Assortativity,Average clustering,Average path length,Diameter"
        );
        assert_eq!(lines[1], "square,4,4,2,2,2.0,NaN,0.0,1.3333333333333333,2");
        assert_eq!(lines[1], lines[2]);
    }

    #[test]
    fn test_existing_file_gets_no_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "").unwrap();

        CsvReport::new(&path).append(&row("a")).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("a,4,4"));
    }

    #[test]
    fn test_read_table() {
        let dir = TempDir::new().unwrap();
        let report = CsvReport::new(dir.path().join("out.csv"));
        report.append(&row("first")).unwrap();
        report.append(&row("second")).unwrap();

        let table = report.read_table().unwrap();
        assert_eq!(table.header.len(), 10);
        assert_eq!(table.header[0], "Network");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][0], "second");
    }
}
