//! Component extraction and application.
//!
//! A [`Resolver`] owns the anchor for one request. Each component operation
//! scans the text with the lexicon's pattern for that component, turns the
//! first match into a signed delta, and applies it to the anchor:
//!
//! ```text
//! text ── pattern(c).find ──▶ literal ──▶ delta ──▶ anchor.apply_delta / shift_*
//!                  │
//!                  └─ no match: anchor untouched
//! ```
//!
//! Operations are order-sensitive: the weekday step compares against the
//! anchor's weekday *after* the week step has moved it. [`Resolver::parse`]
//! fixes the order to [`Component::RESOLUTION_ORDER`].

use std::time::Instant;

use chrono::NaiveDateTime;

use super::anchor::{AnchorDate, Delta};
use super::trace::{RunTrace, Step};
use crate::{Component, ComponentSet, Error, Lexicon, Result};

/// Resolves relative phrases in `text` against a mutable anchor.
///
/// Single-use: [`Resolver::parse`] and [`Resolver::parse_traced`] consume it, so
/// a second run cannot reapply deltas to an already-moved anchor. Build one
/// per request.
#[derive(Debug)]
pub struct Resolver<'a> {
    text: &'a str,
    anchor: AnchorDate,
    lexicon: &'a Lexicon,
    steps: Vec<Step>,
    matched: ComponentSet,
}

impl<'a> Resolver<'a> {
    pub fn new(text: &'a str, anchor: impl Into<AnchorDate>, lexicon: &'a Lexicon) -> Self {
        Self { text, anchor: anchor.into(), lexicon, steps: Vec::new(), matched: ComponentSet::empty() }
    }

    /// Build from an optional anchor string.
    ///
    /// Without an anchor the resolver starts from today's date at 00:00:00;
    /// the wall-clock time of day is not used.
    ///
    /// # Errors
    /// Returns [`Error::InvalidAnchor`] if `anchor` does not match `format`.
    pub fn from_anchor_str(text: &'a str, anchor: Option<&str>, format: &str, lexicon: &'a Lexicon) -> Result<Self> {
        let anchor = match anchor {
            Some(value) => AnchorDate::parse(value, format)?,
            None => AnchorDate::midnight_today(),
        };
        Ok(Self::new(text, anchor, lexicon))
    }

    pub fn anchor(&self) -> &AnchorDate {
        &self.anchor
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Steps applied so far, in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn matched(&self) -> ComponentSet {
        self.matched
    }

    /// Run every component in resolution order and return the final anchor.
    pub fn parse(mut self) -> NaiveDateTime {
        self.run()
    }

    /// Like [`Resolver::parse`], also returning the step trace and timing.
    pub fn parse_traced(mut self) -> RunTrace {
        let start = Instant::now();
        let value = self.run();
        RunTrace { value, steps: self.steps, matched: self.matched, total: start.elapsed() }
    }

    fn run(&mut self) -> NaiveDateTime {
        for component in Component::RESOLUTION_ORDER {
            self.resolve(component);
        }
        self.anchor.to_datetime()
    }

    /// Run a single component step.
    pub fn resolve(&mut self, component: Component) {
        match component {
            Component::Second => self.second(),
            Component::Minute => self.minute(),
            Component::Hour => self.hour(),
            Component::Week => self.week(),
            Component::Weekday => self.weekday(),
            Component::Day => self.day(),
            Component::Month => self.month(),
            Component::Year => self.year(),
        }
    }

    /// "30秒": seconds from the literal's leading number.
    pub fn second(&mut self) {
        let lexicon = self.lexicon;
        let marker = lexicon.markers().second.as_str();
        let found = self.find(Component::Second).map(|literal| {
            let seconds = if literal.contains(marker) { leading_number(literal).unwrap_or(0) } else { 0 };
            (literal, seconds)
        });
        self.apply(Component::Second, found);
    }

    /// "25分钟" adds its number of minutes; "点半" adds thirty.
    pub fn minute(&mut self) {
        let lexicon = self.lexicon;
        let markers = lexicon.markers();
        let found = self.find(Component::Minute).map(|literal| {
            let minutes = if literal.contains(markers.half_hour.as_str()) {
                30
            } else if literal.contains(markers.minute.as_str()) {
                leading_number(literal).unwrap_or(0)
            } else {
                0
            };
            (literal, minutes)
        });
        self.apply(Component::Minute, found);
    }

    /// "下午2点": a period-of-day qualifier plus a clock hour.
    ///
    /// The qualifier's delta is a base hour; a reading below it is lifted by
    /// the base (下午2点 is 14), a reading at or above it is kept (下午13点 is
    /// 13). The resolved hour is added to the anchor.
    pub fn hour(&mut self) {
        let lexicon = self.lexicon;
        let found = lexicon.pattern(Component::Hour).captures(self.text).map(|caps| {
            let literal = caps.get(0).map_or("", |m| m.as_str());
            let qualifier = caps.get(1).map_or("", |m| m.as_str());
            let hours = match caps.get(2).and_then(|m| leading_number(m.as_str())) {
                Some(reading) => {
                    let base = lexicon.delta(Component::Hour, qualifier);
                    if reading < base { reading + base } else { reading }
                }
                None => 0,
            };
            (literal, hours)
        });
        self.apply(Component::Hour, found);
    }

    /// "上上个周": whole weeks.
    pub fn week(&mut self) {
        self.lookup(Component::Week);
    }

    /// "星期天": move within the week to the named weekday.
    ///
    /// The tail after the prefix is a number, a weekday name, or a Sunday
    /// marker; anything else keeps the current weekday.
    pub fn weekday(&mut self) {
        let current = i64::from(self.anchor.weekday());
        let lexicon = self.lexicon;
        let found = lexicon.pattern(Component::Weekday).captures(self.text).map(|caps| {
            let literal = caps.get(0).map_or("", |m| m.as_str());
            let tail = caps.get(1).map_or("", |m| m.as_str());
            let target = if let Some(n) = leading_number(tail) {
                n
            } else if let Some(n) = lexicon.weekday_number(tail) {
                i64::from(n)
            } else if lexicon.markers().sunday.iter().any(|s| s == tail) {
                7
            } else {
                current
            };
            (literal, target - current)
        });
        self.apply(Component::Weekday, found);
    }

    /// "前天": whole days.
    pub fn day(&mut self) {
        self.lookup(Component::Day);
    }

    /// "上个月": whole months with year carry.
    pub fn month(&mut self) {
        self.lookup(Component::Month);
    }

    /// "去年": whole years.
    pub fn year(&mut self) {
        self.lookup(Component::Year);
    }

    /// Combining two resolutions is not supported.
    ///
    /// # Errors
    /// Always returns [`Error::UnsupportedOperation`].
    pub fn try_add(&self, _other: &Resolver<'_>) -> Result<Resolver<'a>> {
        Err(Error::UnsupportedOperation("add"))
    }

    /// Scaling a resolution is not supported.
    ///
    /// # Errors
    /// Always returns [`Error::UnsupportedOperation`].
    pub fn try_mul(&self, _factor: i64) -> Result<Resolver<'a>> {
        Err(Error::UnsupportedOperation("mul"))
    }

    fn find(&self, component: Component) -> Option<&'a str> {
        self.lexicon.pattern(component).find(self.text).map(|m| m.as_str())
    }

    fn lookup(&mut self, component: Component) {
        let lexicon = self.lexicon;
        let found = self.find(component).map(|literal| (literal, lexicon.delta(component, literal)));
        self.apply(component, found);
    }

    fn apply(&mut self, component: Component, found: Option<(&'a str, i64)>) {
        let Some((literal, delta)) = found else {
            self.steps.push(Step { component, literal: None, delta: 0, anchor: self.anchor.to_datetime() });
            return;
        };

        match component {
            Component::Second => self.anchor.apply_delta(Delta::seconds(delta)),
            Component::Minute => self.anchor.apply_delta(Delta::minutes(delta)),
            Component::Hour => self.anchor.apply_delta(Delta::hours(delta)),
            Component::Week => self.anchor.apply_delta(Delta::weeks(delta)),
            Component::Weekday | Component::Day => self.anchor.apply_delta(Delta::days(delta)),
            Component::Month => self.anchor.shift_months(delta),
            Component::Year => self.anchor.shift_years(delta),
        }

        tracing::debug!(component = component.config_name(), literal, delta, anchor = %self.anchor.to_datetime(), "applied");

        self.matched |= component.flag();
        self.steps.push(Step {
            component,
            literal: Some(literal.to_string()),
            delta,
            anchor: self.anchor.to_datetime(),
        });
    }
}

/// Leading number of a literal ("25分钟" -> 25, "３０分" -> 30).
///
/// ASCII and full-width digits are both read; `None` if the literal has no
/// leading digits or the number overflows.
fn leading_number(literal: &str) -> Option<i64> {
    let digits = regex!(r"^[0-9０-９]+").find(literal)?;
    digits.as_str().chars().filter_map(digit_value).try_fold(0i64, |acc, d| acc.checked_mul(10)?.checked_add(d))
}

fn digit_value(c: char) -> Option<i64> {
    match c {
        '0'..='9' => Some(i64::from(u32::from(c) - u32::from('0'))),
        '０'..='９' => Some(i64::from(u32::from(c) - u32::from('０'))),
        _ => None,
    }
}
