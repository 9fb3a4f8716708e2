use crate::{ComponentSet, Lexicon, Resolver, Result, Step};
use chrono::{Datelike, NaiveDateTime, Timelike};
use std::time::Duration;

/// Default anchor format: `2019-10-31 13:21:00`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parsing context.
///
/// This holds the anchor relative phrases are resolved against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    /// Anchor moment. `None` means today's date at 00:00:00; the wall-clock
    /// time of day is deliberately not used.
    pub reference_time: Option<NaiveDateTime>,
}

impl Context {
    pub fn at(reference_time: NaiveDateTime) -> Self {
        Self { reference_time: Some(reference_time) }
    }

    /// Build a context from an anchor string in `options.date_format`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidAnchor`] if the string does not match.
    pub fn from_reference_str(value: &str, options: &Options) -> Result<Self> {
        let anchor = crate::AnchorDate::parse(value, &options.date_format)?;
        Ok(Self::at(anchor.to_datetime()))
    }
}

/// Options that affect how anchors are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// chrono format string for anchor timestamps.
    pub date_format: String,
}

impl Default for Options {
    fn default() -> Self {
        Self { date_format: DEFAULT_DATE_FORMAT.to_string() }
    }
}

/// Result from [`parse`] and [`parse_with`].
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The parsed input text.
    pub text: String,
    /// Resolved absolute timestamp.
    pub value: NaiveDateTime,
    /// `value` rendered by [`format_timestamp`].
    pub formatted: String,
    /// Total elapsed time spent resolving.
    pub elapsed: Duration,
}

/// Additional details returned by [`parse_verbose_with`].
#[derive(Debug, Clone)]
pub struct ParseDetails {
    pub total: Duration,
    /// One entry per component, in resolution order.
    pub steps: Vec<Step>,
    /// Components whose phrase was found in the text.
    pub matched: ComponentSet,
}

/// Result from [`parse_verbose_with`].
#[derive(Debug, Clone)]
pub struct ParseResultVerbose {
    pub text: String,
    pub value: NaiveDateTime,
    pub formatted: String,
    pub elapsed: Duration,
    pub details: ParseDetails,
}

/// Parse `text` with the bundled lexicon, anchored at today's midnight.
///
/// # Example
/// ```
/// use reltime::parse;
///
/// let out = parse("明天").unwrap();
/// assert_eq!(out.value.time(), chrono::NaiveTime::MIN);
/// ```
///
/// # Errors
/// Returns [`crate::Error::Config`] if the bundled lexicon fails to load.
pub fn parse(text: &str) -> Result<ParseResult> {
    Ok(parse_with(text, &Context::default(), Lexicon::bundled()?))
}

/// Parse `text` against `context` with a caller-supplied lexicon.
///
/// Use this when you want deterministic results by supplying an anchor.
pub fn parse_with(text: &str, context: &Context, lexicon: &Lexicon) -> ParseResult {
    let run = resolver(text, context, lexicon).parse_traced();

    ParseResult { text: text.to_string(), value: run.value, formatted: format_timestamp(run.value), elapsed: run.total }
}

/// Parse `text` and also return the per-step trace.
pub fn parse_verbose_with(text: &str, context: &Context, lexicon: &Lexicon) -> ParseResultVerbose {
    let run = resolver(text, context, lexicon).parse_traced();

    let details = ParseDetails { total: run.total, steps: run.steps, matched: run.matched };

    ParseResultVerbose {
        text: text.to_string(),
        value: run.value,
        formatted: format_timestamp(run.value),
        elapsed: details.total,
        details,
    }
}

/// Render a timestamp as `Y-M-D HH:MM:SS`.
///
/// Year, month and day are not padded; the clock is padded to two digits
/// (`2019-1-5 03:04:05`).
pub fn format_timestamp(value: NaiveDateTime) -> String {
    format!(
        "{}-{}-{} {:02}:{:02}:{:02}",
        value.year(),
        value.month(),
        value.day(),
        value.hour(),
        value.minute(),
        value.second()
    )
}

fn resolver<'a>(text: &'a str, context: &Context, lexicon: &'a Lexicon) -> Resolver<'a> {
    match context.reference_time {
        Some(anchor) => Resolver::new(text, anchor, lexicon),
        None => Resolver::new(text, crate::AnchorDate::midnight_today(), lexicon),
    }
}
