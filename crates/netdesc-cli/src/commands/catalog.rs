//! Catalog command implementation.

use anyhow::Result;

use netdesc_ops::OpsContext;

/// List catalog entries grouped by category.
pub fn execute(ctx: &OpsContext, discover: bool) -> Result<()> {
    let catalog = ctx.catalog(discover)?;

    println!("Network catalog ({})", ctx.config.base_dir.display());
    println!("{:-<40}", "");

    let mut current: Option<&str> = None;
    let mut missing = 0;
    for entry in catalog.entries() {
        if current != Some(entry.category.as_str()) {
            println!("{}:", entry.category);
            current = Some(entry.category.as_str());
        }
        let marker = if entry.exists() {
            "ok"
        } else {
            missing += 1;
            "missing"
        };
        println!("  {:<24} {}", entry.name, marker);
    }

    println!();
    println!("{} networks, {} missing", catalog.len(), missing);
    Ok(())
}
