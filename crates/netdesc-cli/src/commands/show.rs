//! Show command implementation.
//!
//! Opens a network in the native viewer.

use anyhow::{Context, Result};

use netdesc_ops::OpsContext;

/// Execute the show command.
pub fn execute(ctx: &OpsContext, target: &str) -> Result<()> {
    let entry = ctx.catalog(false)?.resolve_target(target)?;

    let Some(mut viewer) = super::viewer() else {
        anyhow::bail!(
            "netdesc was built without the graph viewer. Rebuild with `--features native-viz`"
        );
    };

    ctx.show(&entry, viewer.as_mut())
        .with_context(|| format!("Failed to show {}", entry.key()))
}
