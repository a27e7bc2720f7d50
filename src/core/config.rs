use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::matcher::Matcher;
use crate::core::ranker::Ranker;
use crate::core::render::Renderer;
use crate::engine::hooks::Commit;

pub const DEFAULT_MIN_CHARS: usize = 2;
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Attribute-derived configuration overrides, the host-markup equivalent of
/// `data-*` attributes. Values are raw strings; anything that fails to parse
/// falls through to the next layer instead of aborting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttrOverrides {
    entries: IndexMap<String, String>,
}

impl AttrOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Typed view of an override. `Err` carries the malformed raw value;
    /// resolution absorbs it and falls back to the next layer.
    pub fn parse<T: FromStr>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
                ConfigError::InvalidOption {
                    key: key.to_string(),
                    value: raw.to_string(),
                }
            }),
        }
    }

    /// Boolean overrides are presence-based, like boolean markup attributes.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.entries.contains_key(key).then_some(true)
    }
}

/// Explicitly passed options, the middle configuration layer. Function-valued
/// options have no attribute form and resolve from here or the defaults.
#[derive(Default)]
pub struct EngineOptions {
    pub min_chars: Option<usize>,
    pub max_items: Option<usize>,
    pub auto_first: Option<bool>,
    pub matcher: Option<Matcher>,
    pub ranker: Option<Ranker>,
    pub renderer: Option<Renderer>,
    pub commit: Option<Commit>,
}

/// Resolved configuration, immutable after construction. Precedence per
/// option: attribute override, then explicit option, then built-in default.
pub struct EngineConfig {
    pub min_chars: usize,
    pub max_items: usize,
    pub auto_first: bool,
    pub matcher: Matcher,
    pub ranker: Ranker,
    pub renderer: Renderer,
    pub commit: Commit,
}

impl EngineConfig {
    pub fn resolve(attrs: &AttrOverrides, options: EngineOptions) -> Self {
        Self {
            min_chars: attrs
                .parse("minchars")
                .ok()
                .flatten()
                .or(options.min_chars)
                .unwrap_or(DEFAULT_MIN_CHARS),
            max_items: attrs
                .parse("maxitems")
                .ok()
                .flatten()
                .or(options.max_items)
                .unwrap_or(DEFAULT_MAX_ITEMS),
            auto_first: attrs
                .flag("autofirst")
                .or(options.auto_first)
                .unwrap_or(false),
            matcher: options.matcher.unwrap_or_default(),
            ranker: options.ranker.unwrap_or_default(),
            renderer: options.renderer.unwrap_or_default(),
            commit: options.commit.unwrap_or_default(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::resolve(&AttrOverrides::default(), EngineOptions::default())
    }
}
