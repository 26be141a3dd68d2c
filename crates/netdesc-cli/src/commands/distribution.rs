//! Distribution command implementation.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use netdesc_ops::{DistributionRequest, OpsContext};
use netdesc_viz::SvgRenderer;

/// Execute the distribution command.
///
/// With no networks given, the configured selection is plotted.
pub fn execute(
    ctx: &OpsContext,
    networks: &[String],
    keep_going: bool,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let entries = if networks.is_empty() {
        ctx.distribution_selection()
            .context("Invalid distribution selection in configuration")?
    } else {
        ctx.catalog(false)?.resolve(networks)?
    };

    let out_dir = out_dir.unwrap_or_else(|| ctx.config.chart_dir_path());
    let mut renderer = SvgRenderer::new(&out_dir);

    let response = ctx
        .distribution(
            DistributionRequest::new(entries).keep_going(keep_going),
            &mut renderer,
        )
        .context("Plotting degree distributions failed")?;

    for summary in &response.distributions {
        println!(
            "{}: {} nodes, degrees {}..={}",
            summary.key, summary.node_count, summary.min_degree, summary.max_degree
        );
    }
    for path in renderer.written() {
        println!("  wrote {}", path.display());
    }

    if response.has_failures() {
        for failure in &response.failures {
            eprintln!("  {}: {}", failure.key, failure.message);
        }
        bail!("{} distributions could not be plotted", response.failures.len());
    }

    Ok(())
}
