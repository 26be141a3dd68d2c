//! Describe command implementation.

use anyhow::{bail, Context, Result};
use tracing::warn;

use netdesc_ops::{DescribeRequest, GraphViewer, NoopViewer, OpsContext};

/// Flags of the describe command.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub show_graphs: bool,
    pub keep_going: bool,
    pub categories: Vec<String>,
    pub discover: bool,
    /// Print the descriptor block of each network.
    pub echo: bool,
}

/// Execute the describe command.
pub fn execute(ctx: &OpsContext, options: Options) -> Result<()> {
    let catalog = ctx
        .catalog(options.discover)
        .context("Failed to build the network catalog")?
        .filter_categories(&options.categories);

    if catalog.is_empty() {
        warn!("No networks to describe");
        return Ok(());
    }

    let mut viewer: Box<dyn GraphViewer> = match (options.show_graphs, super::viewer()) {
        (true, Some(viewer)) => viewer,
        (true, None) => {
            warn!("Built without the native viewer, graphs will not be shown");
            Box::new(NoopViewer::default())
        }
        (false, _) => Box::new(NoopViewer::default()),
    };

    let mut request = DescribeRequest::new(catalog)
        .show_graphs(options.show_graphs)
        .keep_going(options.keep_going);
    if !options.echo {
        request = request.quiet();
    }

    let response = ctx
        .describe(request, viewer.as_mut())
        .context("Describing networks failed")?;

    if options.echo {
        println!(
            "Described {} networks into {}",
            response.described_count(),
            response.output.display()
        );
    }

    if response.has_failures() {
        for failure in &response.failures {
            eprintln!("  {}: {}", failure.key, failure.message);
        }
        bail!("{} networks could not be described", response.failures.len());
    }

    Ok(())
}
