//! Which networks to process, and where their files live.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{OpsError, OpsResult};

/// One network of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub category: String,
    pub name: String,
    pub path: PathBuf,
}

impl CatalogEntry {
    pub fn new(category: impl Into<String>, name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            path,
        }
    }

    /// Entry for a file outside any category; its name is the file stem.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new("", name, path)
    }

    /// `category/name`, or just the name for uncategorized entries.
    pub fn key(&self) -> String {
        if self.category.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.category, self.name)
        }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// Ordered list of networks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Entries listed by the configuration, categories in order.
    pub fn from_config(config: &Config) -> Self {
        let entries = config
            .categories
            .iter()
            .flat_map(|category| {
                category.networks.iter().map(|name| {
                    CatalogEntry::new(
                        &category.name,
                        name,
                        config.network_path(&category.name, name),
                    )
                })
            })
            .collect();
        Self { entries }
    }

    /// Entries found on disk under `<base_dir>/<category>/`.
    ///
    /// Configured categories come first in their configured order, any other
    /// directory follows alphabetically. Files are sorted by name.
    pub fn discover(config: &Config) -> OpsResult<Self> {
        let base = &config.base_dir;
        if !base.is_dir() {
            return Err(OpsError::Scan {
                path: base.clone(),
                message: "not a directory".to_string(),
            });
        }

        let mut found: Vec<CatalogEntry> = Vec::new();
        for entry in WalkDir::new(base)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() || is_hidden(entry.path()) {
                continue;
            }
            let Some(name) = network_name(entry.path(), &config.extension) else {
                continue;
            };
            let Some(category) = entry
                .path()
                .parent()
                .and_then(Path::file_name)
                .map(|c| c.to_string_lossy().into_owned())
            else {
                continue;
            };
            found.push(CatalogEntry::new(category, name, entry.path().to_path_buf()));
        }

        let rank = |category: &str| {
            config
                .categories
                .iter()
                .position(|c| c.name == category)
                .unwrap_or(usize::MAX)
        };
        found.sort_by(|a, b| {
            rank(&a.category)
                .cmp(&rank(&b.category))
                .then_with(|| a.category.cmp(&b.category))
        });

        debug!(base = %base.display(), networks = found.len(), "Discovered networks");
        Ok(Self { entries: found })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only entries of the given categories; empty keeps everything.
    pub fn filter_categories(self, categories: &[String]) -> Self {
        if categories.is_empty() {
            return self;
        }
        Self {
            entries: self
                .entries
                .into_iter()
                .filter(|e| categories.contains(&e.category))
                .collect(),
        }
    }

    /// Look up an entry by `category/name` key, or by bare name when unique.
    pub fn find(&self, key: &str) -> Option<&CatalogEntry> {
        if let Some(entry) = self.entries.iter().find(|e| e.key() == key) {
            return Some(entry);
        }
        let mut by_name = self.entries.iter().filter(|e| e.name == key);
        match (by_name.next(), by_name.next()) {
            (Some(entry), None) => Some(entry),
            _ => None,
        }
    }

    /// Resolve keys to entries, failing on the first unknown one.
    pub fn resolve<S: AsRef<str>>(&self, keys: &[S]) -> OpsResult<Vec<CatalogEntry>> {
        keys.iter()
            .map(|key| {
                self.find(key.as_ref())
                    .cloned()
                    .ok_or_else(|| OpsError::UnknownNetwork {
                        key: key.as_ref().to_string(),
                    })
            })
            .collect()
    }

    /// Resolve a key, or treat it as a path to a network file.
    pub fn resolve_target(&self, target: &str) -> OpsResult<CatalogEntry> {
        if let Some(entry) = self.find(target) {
            return Ok(entry.clone());
        }
        let path = Path::new(target);
        if path.is_file() {
            return Ok(CatalogEntry::from_path(path));
        }
        Err(OpsError::UnknownNetwork {
            key: target.to_string(),
        })
    }
}

impl IntoIterator for Catalog {
    type Item = CatalogEntry;
    type IntoIter = std::vec::IntoIter<CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Hidden file, or a file inside a hidden category directory.
fn is_hidden(path: &Path) -> bool {
    let hidden = |p: Option<&std::ffi::OsStr>| {
        p.and_then(|s| s.to_str())
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
    };
    hidden(path.file_name()) || hidden(path.parent().and_then(Path::file_name))
}

/// File name without `extension`, if it has that extension.
fn network_name(path: &Path, extension: &str) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let name = file_name.strip_suffix(extension)?;
    (!name.is_empty()).then(|| name.to_string())
}
