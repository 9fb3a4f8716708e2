//! Raw lexicon resources and their TOML shape.
//!
//! A lexicon is supplied as two text resources:
//!
//! - the *pattern table*: one ordered list of regex fragments per component,
//!   plus an optional `[markers]` table;
//! - the *delta table*: one section per component mapping a matched literal to
//!   a signed offset, plus a `[weekday_names]` section.
//!
//! ```text
//! patterns.toml                 deltas.toml
//! ─────────────                 ───────────
//! week = ["上上周", "上周"]       [week]
//! hour = ["上午", "下午"]         "上上周" = -2
//! [markers]                     [weekday_names]
//! hour = "点"                    "三" = 3
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::{Component, Error, Result};

const BUNDLED_PATTERNS: &str = include_str!("../../lexicon/patterns.toml");
const BUNDLED_DELTAS: &str = include_str!("../../lexicon/deltas.toml");

/// The two text resources a [`crate::Lexicon`] is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconSource {
    /// Pattern table (TOML).
    pub patterns: String,
    /// Delta table (TOML).
    pub deltas: String,
}

impl LexiconSource {
    pub fn new(patterns: impl Into<String>, deltas: impl Into<String>) -> Self {
        Self { patterns: patterns.into(), deltas: deltas.into() }
    }

    /// The Chinese lexicon compiled into the crate.
    pub fn bundled() -> Self {
        Self::new(BUNDLED_PATTERNS, BUNDLED_DELTAS)
    }

    /// Read both resources from explicit paths.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if either file cannot be read.
    pub fn from_paths(patterns: impl AsRef<Path>, deltas: impl AsRef<Path>) -> Result<Self> {
        let patterns = read(patterns.as_ref())?;
        let deltas = read(deltas.as_ref())?;
        Ok(Self { patterns, deltas })
    }
}

fn read(path: &Path) -> Result<String> {
    tracing::info!(path = %path.display(), "Loading lexicon resource");
    std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read lexicon file {}: {}", path.display(), e)))
}

/// Language markers the composite components look for inside a match.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Suffix a second literal must carry ("30秒").
    pub second: String,
    /// Suffix of an explicit minute count ("25分").
    pub minute: String,
    /// Literal meaning "half past", always thirty minutes.
    pub half_hour: String,
    /// Suffix closing a clock hour ("2点").
    pub hour: String,
    /// Prefixes introducing a named weekday ("星期", "周").
    pub weekday_prefixes: Vec<String>,
    /// Weekday tails that mean Sunday.
    pub sunday: Vec<String>,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            second: "秒".to_string(),
            minute: "分".to_string(),
            half_hour: "点半".to_string(),
            hour: "点".to_string(),
            weekday_prefixes: vec!["星期".to_string(), "礼拜".to_string(), "周".to_string()],
            sunday: vec!["天".to_string(), "日".to_string()],
        }
    }
}

impl Markers {
    pub(crate) fn validate(&self) -> Result<()> {
        let singles = [
            ("second", &self.second),
            ("minute", &self.minute),
            ("half_hour", &self.half_hour),
            ("hour", &self.hour),
        ];
        for (name, value) in singles {
            if value.is_empty() {
                return Err(Error::Config(format!("marker `{name}` must not be empty")));
            }
        }
        if self.weekday_prefixes.iter().all(String::is_empty) {
            return Err(Error::Config("marker `weekday_prefixes` needs at least one prefix".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PatternFile {
    year: Option<Vec<String>>,
    month: Option<Vec<String>>,
    day: Option<Vec<String>>,
    week: Option<Vec<String>>,
    hour: Option<Vec<String>>,
    minute: Option<Vec<String>>,
    second: Option<Vec<String>>,
    #[serde(default)]
    pub markers: Markers,
}

impl PatternFile {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(format!("Invalid pattern table: {}", e)))
    }

    /// Fragments declared for `component`, in priority order.
    ///
    /// The weekday pattern is derived from the weekday names instead and has
    /// no list of its own.
    pub fn fragments(&self, component: Component) -> Result<&[String]> {
        let list = match component {
            Component::Year => &self.year,
            Component::Month => &self.month,
            Component::Day => &self.day,
            Component::Week => &self.week,
            Component::Hour => &self.hour,
            Component::Minute => &self.minute,
            Component::Second => &self.second,
            Component::Weekday => return Ok(&[]),
        };
        let list = list
            .as_deref()
            .ok_or_else(|| Error::Config(format!("pattern table is missing `{}`", component.config_name())))?;
        if list.is_empty() {
            return Err(Error::Config(format!("pattern list `{}` is empty", component.config_name())));
        }
        Ok(list)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeltaFile {
    year: Option<HashMap<String, i64>>,
    month: Option<HashMap<String, i64>>,
    day: Option<HashMap<String, i64>>,
    week: Option<HashMap<String, i64>>,
    hour: Option<HashMap<String, i64>>,
    weekday_names: Option<HashMap<String, u32>>,
}

impl DeltaFile {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(format!("Invalid delta table: {}", e)))
    }

    /// Take the delta section of every component that is resolved by lookup.
    pub fn take_sections(&mut self) -> Result<HashMap<Component, HashMap<String, i64>>> {
        let sections = [
            (Component::Year, self.year.take()),
            (Component::Month, self.month.take()),
            (Component::Day, self.day.take()),
            (Component::Week, self.week.take()),
            (Component::Hour, self.hour.take()),
        ];

        let mut out = HashMap::with_capacity(sections.len());
        for (component, section) in sections {
            let section = section
                .ok_or_else(|| Error::Config(format!("delta table is missing `[{}]`", component.config_name())))?;
            out.insert(component, section);
        }
        Ok(out)
    }

    pub fn take_weekday_names(&mut self) -> Result<HashMap<String, u32>> {
        let names =
            self.weekday_names.take().ok_or_else(|| Error::Config("delta table is missing `[weekday_names]`".into()))?;
        if let Some((name, n)) = names.iter().find(|(_, n)| !(1..=7).contains(*n)) {
            return Err(Error::Config(format!("weekday name `{name}` maps to {n}, expected 1-7")));
        }
        Ok(names)
    }
}
