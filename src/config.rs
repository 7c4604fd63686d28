use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub limits: Limits,
    pub excerpt: ExcerptConfig,
    pub page: PageConfig,
}

/// What to do with a note longer than [`Limits::max_chars`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    #[default]
    Reject,
    Truncate,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_chars: usize,
    pub overflow: Overflow,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_chars: 2000,
            overflow: Overflow::Reject,
        }
    }
}

impl Limits {
    /// Apply the length cap before rendering.
    ///
    /// Lengths are counted in chars. Truncation cuts at a char boundary.
    pub fn enforce<'a>(&self, text: &'a str) -> Result<&'a str> {
        let len = text.chars().count();
        if len <= self.max_chars {
            return Ok(text);
        }
        match self.overflow {
            Overflow::Reject => Err(Error::NoteTooLong {
                len,
                max: self.max_chars,
            }),
            Overflow::Truncate => {
                log::debug!("truncating note from {len} to {} chars", self.max_chars);
                let cut = text
                    .char_indices()
                    .nth(self.max_chars)
                    .map_or(text.len(), |(i, _)| i);
                Ok(&text[..cut])
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExcerptConfig {
    pub max_chars: usize,
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self { max_chars: 60 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub standalone: bool,
    pub title: String,
    pub lang: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            standalone: false,
            title: "Notes".to_string(),
            lang: "en".to_string(),
        }
    }
}

impl Config {
    /// The defaults shipped in `default_config.toml`, checked by the build script.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|source| Error::Config {
                source,
                path: path.to_path_buf(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::compiled_default())
            }
            Err(source) => Err(Error::Io {
                source,
                path: path.to_path_buf(),
            }),
        }
    }
}
