//! Configuration for the batch pipeline.
//!
//! Precedence: built-in defaults, then the JSON config file, then
//! environment variables (a `.env` file in the working directory counts).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OpsError, OpsResult};

/// Environment variable overriding [`Config::base_dir`].
pub const ENV_BASE_DIR: &str = "NETDESC_BASE_DIR";
/// Environment variable overriding [`Config::output_file`].
pub const ENV_OUTPUT: &str = "NETDESC_OUTPUT";
/// Environment variable overriding [`Config::chart_dir`].
pub const ENV_CHART_DIR: &str = "NETDESC_CHART_DIR";

/// Networks of one category, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub networks: Vec<String>,
}

impl CategoryConfig {
    fn new(name: &str, networks: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            networks: networks.iter().map(|n| n.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root holding one directory per category.
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Descriptor table; relative paths are resolved against `base_dir`.
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Where rendered charts are written; relative to `base_dir` too.
    #[serde(default = "default_chart_dir")]
    pub chart_dir: PathBuf,

    /// Open the graph viewer after describing each network.
    #[serde(default)]
    pub show_graphs: bool,

    /// Network file extension, dot included.
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,

    /// `category/name` keys whose degree distribution gets plotted.
    #[serde(default = "default_distribution")]
    pub distribution: Vec<String>,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("A1_nets")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("networks_descriptors.csv")
}

fn default_chart_dir() -> PathBuf {
    PathBuf::from("charts")
}

fn default_extension() -> String {
    ".net".to_string()
}

fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig::new(
            "toy",
            &[
                "20x2+5x2",
                "circle9",
                "graph3+1+3",
                "graph3+2+3",
                "grid-p-6x6",
                "rb25",
                "star",
                "wheel",
            ],
        ),
        CategoryConfig::new(
            "model",
            &[
                "256_4_4_2_15_18_p",
                "256_4_4_4_13_18_p",
                "BA1000",
                "ER1000k8",
                "ER5000-kmed8",
                "homorand_N1000_K4_0",
                "homorand_N1000_K6_0",
                "rb125",
                "SF_500_g2.7",
                "SF_1000_g2.5",
                "SF_1000_g2.7",
                "SF_1000_g3.0",
                "ws1000",
                "ws2000",
            ],
        ),
        CategoryConfig::new("real", &["airports_UW", "dolphins", "PGP", "zachary_unwh"]),
    ]
}

fn default_distribution() -> Vec<String> {
    ["model/ER1000k8", "model/SF_1000_g2.7", "model/ws1000", "real/airports_UW"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            output_file: default_output_file(),
            chart_dir: default_chart_dir(),
            show_graphs: false,
            extension: default_extension(),
            categories: default_categories(),
            distribution: default_distribution(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the per-user config file when `None`.
    ///
    /// A missing default config file is not an error; a missing explicit
    /// one is.
    pub fn load(path: Option<&Path>) -> OpsResult<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::config_file_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Parse a JSON config file; absent fields take their defaults.
    pub fn from_file(path: &Path) -> OpsResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            OpsError::Config(format!("Cannot read {}: {e}", path.display()))
        })?;
        let config = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn with_env_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_dir: lookup(ENV_BASE_DIR).map(PathBuf::from).unwrap_or(self.base_dir),
            output_file: lookup(ENV_OUTPUT)
                .map(PathBuf::from)
                .unwrap_or(self.output_file),
            chart_dir: lookup(ENV_CHART_DIR)
                .map(PathBuf::from)
                .unwrap_or(self.chart_dir),
            ..self
        }
    }

    /// Save configuration to `path`, or to the per-user config file.
    pub fn save(&self, path: Option<&Path>) -> OpsResult<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_file_path()
                .ok_or_else(|| OpsError::Config("No config directory available".into()))?,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Get the path to the per-user configuration file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "netdesc", "netdesc")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Resolved path of the descriptor table.
    pub fn output_path(&self) -> PathBuf {
        self.base_dir.join(&self.output_file)
    }

    /// Resolved chart directory.
    pub fn chart_dir_path(&self) -> PathBuf {
        self.base_dir.join(&self.chart_dir)
    }

    /// Network file for a catalog entry.
    pub fn network_path(&self, category: &str, name: &str) -> PathBuf {
        self.base_dir
            .join(category)
            .join(format!("{name}{}", self.extension))
    }

    /// Get a configuration value by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "base_dir" => Some(self.base_dir.display().to_string()),
            "output_file" => Some(self.output_file.display().to_string()),
            "chart_dir" => Some(self.chart_dir.display().to_string()),
            "show_graphs" => Some(self.show_graphs.to_string()),
            "extension" => Some(self.extension.clone()),
            "categories" => Some(
                self.categories
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            "distribution" => Some(self.distribution.join(",")),
            _ => None,
        }
    }

    /// Keys accepted by [`Config::get`], in display order.
    pub fn keys() -> &'static [&'static str] {
        &[
            "base_dir",
            "output_file",
            "chart_dir",
            "show_graphs",
            "extension",
            "categories",
            "distribution",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_catalog() {
        let config = Config::default();
        let sizes: Vec<(&str, usize)> = config
            .categories
            .iter()
            .map(|c| (c.name.as_str(), c.networks.len()))
            .collect();
        assert_eq!(sizes, vec![("toy", 8), ("model", 14), ("real", 4)]);
        assert_eq!(config.distribution.len(), 4);
        assert_eq!(
            config.output_path(),
            PathBuf::from("A1_nets/networks_descriptors.csv")
        );
        assert_eq!(
            config.network_path("toy", "star"),
            PathBuf::from("A1_nets/toy/star.net")
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "base_dir": "/data/nets", "show_graphs": true }"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.base_dir, PathBuf::from("/data/nets"));
        assert!(config.show_graphs);
        assert_eq!(config.extension, ".net");
        assert_eq!(config.categories.len(), 3);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default().with_env_overrides(|key| match key {
            ENV_BASE_DIR => Some("/tmp/nets".to_string()),
            ENV_CHART_DIR => Some("plots".to_string()),
            _ => None,
        });
        assert_eq!(config.base_dir, PathBuf::from("/tmp/nets"));
        assert_eq!(config.output_file, PathBuf::from("networks_descriptors.csv"));
        assert_eq!(config.chart_dir_path(), PathBuf::from("/tmp/nets/plots"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("config.json");
        let mut config = Config::default();
        config.distribution = vec!["toy/star".into()];

        let written = config.save(Some(&path)).unwrap();
        assert_eq!(written, path);
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::from_file(Path::new("/nonexistent/netdesc.json")).unwrap_err();
        assert!(matches!(err, OpsError::Config(_)));
    }

    #[test]
    fn test_get_keys() {
        let config = Config::default();
        for key in Config::keys() {
            assert!(config.get(key).is_some(), "{key}");
        }
        assert_eq!(config.get("categories").unwrap(), "toy,model,real");
        assert!(config.get("nope").is_none());
    }
}
