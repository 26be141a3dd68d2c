//! Config command implementation.

use std::path::Path;

use anyhow::Result;

use netdesc_ops::Config;

/// Show current configuration.
pub fn show(config: &Config, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("netdesc Configuration");
    println!("{:-<40}", "");
    for key in Config::keys() {
        let value = config.get(key).unwrap_or_default();
        println!("{:<14} {}", key, value);
    }
    println!("{:<14} {}", "output_path", config.output_path().display());

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Get a configuration value.
pub fn get(config: &Config, key: &str) -> Result<()> {
    match config.get(key) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => anyhow::bail!(
            "Unknown config key: {}. Valid keys: {}",
            key,
            Config::keys().join(", ")
        ),
    }
}

/// Reset configuration to defaults.
pub fn reset(explicit: Option<&Path>) -> Result<()> {
    let path = Config::default().save(explicit)?;
    println!("Configuration reset to defaults: {}", path.display());
    Ok(())
}

/// Show the config file in use.
pub fn path(explicit: Option<&Path>) {
    match explicit.map(Path::to_path_buf).or_else(Config::config_file_path) {
        Some(path) => println!("{}", path.display()),
        None => println!("(no config file path available)"),
    }
}
