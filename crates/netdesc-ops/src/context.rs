//! OpsContext - runs the descriptor and distribution pipelines.
//!
//! Networks are processed one at a time, each to completion: load, extract,
//! append to the table, print, then optionally display.

use tracing::{debug, error, info, warn};

use netdesc_core::{load_pajek, Network};

use crate::catalog::{Catalog, CatalogEntry};
use crate::config::Config;
use crate::descriptors::extract;
use crate::distribution::DegreeHistogram;
use crate::error::{OpsError, OpsResult};
use crate::render::{ChartRenderer, GraphViewer};
use crate::report::{print_descriptors, CsvReport};
use crate::requests::*;
use crate::responses::*;

/// The main operations context.
#[derive(Debug, Clone)]
pub struct OpsContext {
    pub config: Config,
}

impl OpsContext {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// The configured catalog, or the one found on disk.
    pub fn catalog(&self, discover: bool) -> OpsResult<Catalog> {
        if discover {
            Catalog::discover(&self.config)
        } else {
            Ok(Catalog::from_config(&self.config))
        }
    }

    /// Entries whose distribution is plotted by default.
    pub fn distribution_selection(&self) -> OpsResult<Vec<CatalogEntry>> {
        Catalog::from_config(&self.config).resolve(&self.config.distribution)
    }

    /// Table that describe runs append to.
    pub fn report(&self) -> CsvReport {
        CsvReport::new(self.config.output_path())
    }

    // =========================================================================
    // Descriptors
    // =========================================================================

    /// Load one network.
    pub fn load(&self, entry: &CatalogEntry) -> OpsResult<Network> {
        debug!(network = %entry.key(), path = %entry.path.display(), "Loading network");
        Ok(load_pajek(&entry.path)?)
    }

    /// Describe every network of the request.
    ///
    /// Load and extraction failures abort the run unless `keep_going` is
    /// set. Table, console and viewer failures always abort.
    pub fn describe(
        &self,
        request: DescribeRequest,
        viewer: &mut dyn GraphViewer,
    ) -> OpsResult<DescribeResponse> {
        let report = self.report();
        let mut rows = Vec::new();
        let mut failures = Vec::new();

        info!(networks = request.catalog.len(), output = %report.path().display(), "Describing networks");

        for entry in request.catalog {
            let key = entry.key();
            let extracted = self
                .load(&entry)
                .and_then(|network| Ok((extract(&network)?, network)));

            let (descriptors, network) = match extracted {
                Ok(found) => found,
                Err(e) if request.keep_going => {
                    error!(network = %key, error = %e, "Skipping network");
                    failures.push(EntryFailure {
                        key,
                        message: e.to_string(),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            let row = descriptors.named(&entry.name);
            report.append(&row)?;
            if request.echo {
                print_descriptors(&row);
            }
            if request.show_graphs {
                viewer
                    .show(&entry.name, &network)
                    .map_err(|e| OpsError::render(&key, e))?;
            }

            info!(
                network = %key,
                nodes = row.descriptors.node_count,
                edges = row.descriptors.edge_count,
                "Described network"
            );
            rows.push(row);
        }

        if !failures.is_empty() {
            warn!(skipped = failures.len(), "Some networks could not be described");
        }

        Ok(DescribeResponse {
            rows,
            failures,
            output: report.path().to_path_buf(),
        })
    }

    // =========================================================================
    // Visualization
    // =========================================================================

    /// Bin and render the degree distribution of each requested network.
    pub fn distribution(
        &self,
        request: DistributionRequest,
        renderer: &mut dyn ChartRenderer,
    ) -> OpsResult<DistributionResponse> {
        let mut distributions = Vec::new();
        let mut failures = Vec::new();

        for entry in request.entries {
            let key = entry.key();
            let binned = self
                .load(&entry)
                .and_then(|network| Ok(DegreeHistogram::from_network(&network)?));

            let histogram = match binned {
                Ok(histogram) => histogram,
                Err(e) if request.keep_going => {
                    error!(network = %key, error = %e, "Skipping distribution");
                    failures.push(EntryFailure {
                        key,
                        message: e.to_string(),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            let mut chart_ids = Vec::new();
            for chart in histogram.charts(&entry.name) {
                renderer
                    .render(&chart)
                    .map_err(|e| OpsError::render(&chart.id, e))?;
                chart_ids.push(chart.id);
            }

            let dropped = histogram.dropped();
            if dropped > 0 {
                warn!(network = %key, dropped, "Degrees outside every bin");
            }
            info!(network = %key, charts = chart_ids.len(), "Rendered degree distribution");

            distributions.push(DistributionSummary {
                key,
                node_count: histogram.node_count,
                min_degree: histogram.edges[0] as usize,
                max_degree: histogram.frequencies.len().saturating_sub(1),
                counts: histogram.counts,
                charts: chart_ids,
            });
        }

        Ok(DistributionResponse {
            distributions,
            failures,
        })
    }

    /// Load a network and hand it to the viewer.
    pub fn show(&self, entry: &CatalogEntry, viewer: &mut dyn GraphViewer) -> OpsResult<()> {
        let network = self.load(entry)?;
        info!(
            network = %entry.key(),
            nodes = network.node_count(),
            edges = network.edge_count(),
            directed = network.is_directed(),
            "Showing network"
        );
        viewer
            .show(&entry.name, &network)
            .map_err(|e| OpsError::render(entry.key(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CategoryConfig;
    use crate::render::{NoopViewer, NullRenderer};
    use std::path::Path;
    use tempfile::TempDir;

    const SQUARE: &str = "*Vertices 4\n1 \"A\"\n2 \"B\"\n3 \"C\"\n4 \"D\"\n*Edges\n1 2\n2 3\n3 4\n4 1\n";
    const SPLIT: &str = "*Vertices 4\n*Edges\n1 2\n3 4\n";

    fn setup(files: &[(&str, &str, &str)]) -> (TempDir, OpsContext) {
        let dir = TempDir::new().unwrap();
        let mut categories: Vec<CategoryConfig> = Vec::new();
        for (category, name, content) in files {
            let sub = dir.path().join(category);
            std::fs::create_dir_all(&sub).unwrap();
            std::fs::write(sub.join(format!("{name}.net")), content).unwrap();
            match categories.iter_mut().find(|c| c.name == *category) {
                Some(c) => c.networks.push(name.to_string()),
                None => categories.push(CategoryConfig {
                    name: category.to_string(),
                    networks: vec![name.to_string()],
                }),
            }
        }
        let config = Config {
            base_dir: dir.path().to_path_buf(),
            categories,
            distribution: vec![],
            ..Config::default()
        };
        (dir, OpsContext::new(config))
    }

    fn csv_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_describe_appends_rows() {
        let (_dir, ctx) = setup(&[("toy", "square", SQUARE)]);
        let request = DescribeRequest::new(ctx.catalog(false).unwrap()).quiet();

        let response = ctx.describe(request, &mut NoopViewer::default()).unwrap();
        assert_eq!(response.described_count(), 1);
        assert_eq!(response.rows[0].descriptors.diameter, 2);

        let lines = csv_lines(&response.output);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Network,"));
        assert_eq!(lines[1], "square,4,4,2,2,2.0,NaN,0.0,1.3333333333333333,2");
    }

    #[test]
    fn test_disconnected_aborts_by_default() {
        let (_dir, ctx) = setup(&[("toy", "split", SPLIT), ("toy", "square", SQUARE)]);
        let request = DescribeRequest::new(ctx.catalog(false).unwrap()).quiet();

        let err = ctx.describe(request, &mut NoopViewer::default()).unwrap_err();
        assert!(matches!(err, OpsError::Descriptor(_)));
        assert!(!ctx.config.output_path().exists());
    }

    #[test]
    fn test_keep_going_skips_failures() {
        let (_dir, ctx) = setup(&[("toy", "split", SPLIT), ("toy", "square", SQUARE)]);
        let request = DescribeRequest::new(ctx.catalog(false).unwrap())
            .quiet()
            .keep_going(true)
            .show_graphs(true);
        let mut viewer = NoopViewer::default();

        let response = ctx.describe(request, &mut viewer).unwrap();
        assert_eq!(response.failures.len(), 1);
        assert_eq!(response.failures[0].key, "toy/split");
        assert_eq!(response.rows.len(), 1);
        assert_eq!(viewer.shown, vec!["square".to_string()]);
    }

    #[test]
    fn test_missing_file_is_graph_error() {
        let (_dir, mut ctx) = setup(&[("toy", "square", SQUARE)]);
        ctx.config.categories[0].networks.push("ghost".into());
        let request = DescribeRequest::new(ctx.catalog(false).unwrap()).quiet();

        let err = ctx.describe(request, &mut NoopViewer::default()).unwrap_err();
        assert!(matches!(err, OpsError::Graph(_)));
    }

    #[test]
    fn test_distribution_renders_two_charts() {
        let (_dir, ctx) = setup(&[("model", "square", SQUARE)]);
        let entries = ctx.catalog(false).unwrap().resolve(&["model/square"]).unwrap();
        let mut renderer = NullRenderer::default();

        let response = ctx
            .distribution(DistributionRequest::new(entries), &mut renderer)
            .unwrap();
        let ids: Vec<&str> = renderer.rendered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["square_pdf", "square_ccdf"]);
        let summary = &response.distributions[0];
        assert_eq!(summary.node_count, 4);
        assert_eq!(summary.min_degree, 2);
        assert_eq!(summary.max_degree, 2);
        assert_eq!(summary.counts.iter().sum::<usize>(), 4);
    }

    #[test]
    fn test_distribution_zero_degree() {
        let isolated = "*Vertices 3\n*Edges\n1 2\n";
        let (_dir, ctx) = setup(&[("toy", "iso", isolated)]);
        let entries = ctx.catalog(false).unwrap().resolve(&["iso"]).unwrap();

        let err = ctx
            .distribution(DistributionRequest::new(entries.clone()), &mut NullRenderer::default())
            .unwrap_err();
        assert!(matches!(err, OpsError::Distribution(_)));

        let response = ctx
            .distribution(
                DistributionRequest::new(entries).keep_going(true),
                &mut NullRenderer::default(),
            )
            .unwrap();
        assert!(response.has_failures());
    }

    #[test]
    fn test_show() {
        let (_dir, ctx) = setup(&[("real", "square", SQUARE)]);
        let entry = ctx.catalog(false).unwrap().resolve_target("real/square").unwrap();
        let mut viewer = NoopViewer::default();
        ctx.show(&entry, &mut viewer).unwrap();
        assert_eq!(viewer.shown, vec!["square".to_string()]);
    }
}
