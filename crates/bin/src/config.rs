//! Demo configuration.

use rectstore::{QuadConfig, Rectangle};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Points to look up, as `[x, y]` pairs.
    #[serde(default = "default_queries")]
    pub queries: Vec<[i64; 2]>,
    #[serde(default)]
    pub tree: QuadConfig,
    #[serde(default = "default_bounds")]
    pub bounds: Rectangle,
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Fixed rectangles inserted after the random ones.
    #[serde(default = "default_rectangles")]
    pub rectangles: Vec<Rectangle>,
}

impl Config {
    /// Load configuration from `path`, writing the defaults there if it is missing.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            info!("No {} found, creating default config", path.display());
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            Ok(default_config)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queries: default_queries(),
            tree: QuadConfig::default(),
            bounds: default_bounds(),
            generator: GeneratorConfig::default(),
            rectangles: default_rectangles(),
        }
    }
}

fn default_bounds() -> Rectangle {
    Rectangle::new(0, 0, 1000, 1000)
}
fn default_rectangles() -> Vec<Rectangle> {
    vec![
        Rectangle::new(100, 100, 400, 400),
        Rectangle::new(200, 200, 300, 300),
    ]
}
fn default_queries() -> Vec<[i64; 2]> {
    vec![[150, 150], [250, 250], [500, 500]]
}

/// Random rectangle generation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Number of random rectangles to insert before the fixed ones.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Seed for reproducible runs; unset draws from the thread RNG.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            seed: None,
        }
    }
}

fn default_count() -> usize {
    100
}
