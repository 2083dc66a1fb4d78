//! Linter configuration (tgmlint.yaml).
//!
//! Every field is optional. Categories listed here replace the default
//! prefix set of the same name; unlisted categories keep their defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::lint::{Categories, LintOptions, PrefixSet, RuleRegistry};

/// Config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "tgmlint.yaml";

/// Configuration loaded from tgmlint.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Category name -> path prefixes.
    pub categories: BTreeMap<String, Vec<String>>,

    /// Rule identifiers to skip.
    pub disabled_rules: Vec<String>,

    /// Lint tiles on all cores.
    pub parallel: bool,
}

impl Config {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MapError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string. Blank input is the default config.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| MapError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load the explicit config if given, else `dir/tgmlint.yaml` if it
    /// exists, else the defaults. Returns the file actually read.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            Ok((Self::load(&candidate)?, Some(candidate)))
        } else {
            Ok((Self::default(), None))
        }
    }

    /// Default categories overlaid with the configured ones.
    pub fn categories(&self) -> Categories {
        let mut categories = Categories::default();
        for (name, prefixes) in &self.categories {
            categories.set(name.clone(), PrefixSet::new(prefixes.iter().cloned()));
        }
        categories
    }

    /// Built-in rules over the configured categories, minus disabled ones.
    pub fn build_registry(&self) -> Result<RuleRegistry> {
        let mut registry = RuleRegistry::with_categories(&self.categories())?;
        for id in &self.disabled_rules {
            if !registry.unregister(id) {
                return Err(MapError::Config {
                    message: format!("unknown rule '{}' in disabled_rules", id),
                    help: Some("Run `tgmlint rules` to list rule identifiers".to_string()),
                });
            }
        }
        Ok(registry)
    }

    pub fn lint_options(&self) -> LintOptions {
        LintOptions {
            parallel: self.parallel,
        }
    }
}
