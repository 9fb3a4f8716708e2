//! Lexicon: the configuration that drives recognition and resolution.
//!
//! A [`Lexicon`] is built once from a [`LexiconSource`] and is read-only
//! afterwards, so one instance can back any number of [`crate::Resolver`]s,
//! including across threads.
//!
//! ## Compilation
//!
//! Loading validates both tables against the closed [`Component`] set and
//! compiles one regex per component:
//!
//! ```text
//! second/minute/week/day/month/year ── (?:f1)|(?:f2)|…      first fragment wins ties
//! hour                              ── ((?:q1)|(?:q2)|…)([0-9０-９]+)点
//! weekday                           ── (?:星期|礼拜|周)([0-9０-９]+|一|二|…|天|日)
//! ```
//!
//! The weekday alternation is assembled from the `[weekday_names]` section and
//! the Sunday markers; longer names are tried first.

#[path = "lexicon/source.rs"]
mod source;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

pub use source::{LexiconSource, Markers};
use source::{DeltaFile, PatternFile};

use crate::{Component, Error, Result};

/// ASCII or full-width digit run, the forms the resolver can read back.
const DIGITS: &str = "[0-9０-９]+";

static BUNDLED: Lazy<Result<Lexicon>> = Lazy::new(|| Lexicon::load(&LexiconSource::bundled()));

/// Compiled recognition patterns, one per component.
#[derive(Debug)]
struct Patterns {
    second: Regex,
    minute: Regex,
    hour: Regex,
    week: Regex,
    weekday: Regex,
    day: Regex,
    month: Regex,
    year: Regex,
}

/// Validated, compiled pattern and delta tables.
#[derive(Debug)]
pub struct Lexicon {
    patterns: Patterns,
    deltas: HashMap<Component, HashMap<String, i64>>,
    weekday_names: HashMap<String, u32>,
    markers: Markers,
}

impl Lexicon {
    /// Parse, validate and compile a lexicon.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if either table is malformed, a required
    /// component is missing, or a fragment is not a valid regex.
    pub fn load(source: &LexiconSource) -> Result<Self> {
        let pattern_file = PatternFile::parse(&source.patterns)?;
        let mut delta_file = DeltaFile::parse(&source.deltas)?;

        let markers = pattern_file.markers.clone();
        markers.validate()?;

        let deltas = delta_file.take_sections()?;
        let weekday_names = delta_file.take_weekday_names()?;

        let simple = |component: Component| -> Result<Regex> {
            compile(component, &alternation(pattern_file.fragments(component)?))
        };

        let hour = format!(
            "({})({DIGITS}){}",
            alternation(pattern_file.fragments(Component::Hour)?),
            regex::escape(&markers.hour)
        );

        let patterns = Patterns {
            second: simple(Component::Second)?,
            minute: simple(Component::Minute)?,
            hour: compile(Component::Hour, &hour)?,
            week: simple(Component::Week)?,
            weekday: compile(Component::Weekday, &weekday_pattern(&markers, &weekday_names))?,
            day: simple(Component::Day)?,
            month: simple(Component::Month)?,
            year: simple(Component::Year)?,
        };

        Ok(Self { patterns, deltas, weekday_names, markers })
    }

    /// The bundled Chinese lexicon, built on first use and shared afterwards.
    pub fn bundled() -> Result<&'static Lexicon> {
        Lazy::force(&BUNDLED).as_ref().map_err(Clone::clone)
    }

    /// Compiled recognition pattern for `component`.
    pub fn pattern(&self, component: Component) -> &Regex {
        match component {
            Component::Second => &self.patterns.second,
            Component::Minute => &self.patterns.minute,
            Component::Hour => &self.patterns.hour,
            Component::Week => &self.patterns.week,
            Component::Weekday => &self.patterns.weekday,
            Component::Day => &self.patterns.day,
            Component::Month => &self.patterns.month,
            Component::Year => &self.patterns.year,
        }
    }

    /// Signed offset mapped to `literal`, or 0 when the literal is unmapped.
    pub fn delta(&self, component: Component, literal: &str) -> i64 {
        match self.deltas.get(&component).and_then(|section| section.get(literal)) {
            Some(delta) => *delta,
            None => {
                tracing::debug!(component = component.config_name(), literal, "matched literal has no delta");
                0
            }
        }
    }

    /// Weekday number (1 = Monday) for a weekday name such as "三".
    pub fn weekday_number(&self, name: &str) -> Option<u32> {
        self.weekday_names.get(name).copied()
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }
}

fn alternation(fragments: &[String]) -> String {
    fragments.iter().map(|f| format!("(?:{f})")).collect::<Vec<_>>().join("|")
}

fn compile(component: Component, pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| Error::Config(format!("invalid pattern for `{}`: {}", component.config_name(), e)))
}

fn weekday_pattern(markers: &Markers, names: &HashMap<String, u32>) -> String {
    let prefixes: Vec<String> =
        markers.weekday_prefixes.iter().filter(|p| !p.is_empty()).map(|p| regex::escape(p)).collect();

    let mut tails: Vec<&str> = names.keys().map(String::as_str).collect();
    tails.extend(markers.sunday.iter().map(String::as_str).filter(|s| !s.is_empty()));
    tails.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    tails.dedup();

    let mut alternatives = vec![DIGITS.to_string()];
    alternatives.extend(tails.into_iter().map(regex::escape));

    format!("(?:{})({})", prefixes.join("|"), alternatives.join("|"))
}
