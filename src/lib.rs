#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod lexicon;

pub use api::{
    Context, DEFAULT_DATE_FORMAT, Options, ParseDetails, ParseResult, ParseResultVerbose, format_timestamp, parse,
    parse_verbose_with, parse_with,
};
pub use engine::{AnchorDate, Delta, Resolver, RunTrace, Step};
pub use error::{Error, Result};
pub use lexicon::{Lexicon, LexiconSource, Markers};

// --- Components ---------------------------------------------------------------

/// One independently extracted time field.
///
/// Variants are declared in resolution order: [`Resolver::parse`] runs the
/// second step first and the year step last, and each step observes the anchor
/// as left by the previous ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    Second,
    Minute,
    Hour,
    Week,
    /// Named weekday ("星期三"), resolved against the anchor's current weekday.
    Weekday,
    Day,
    Month,
    Year,
}

impl Component {
    /// The fixed order in which [`Resolver::parse`] applies components.
    pub const RESOLUTION_ORDER: [Component; 8] = [
        Component::Second,
        Component::Minute,
        Component::Hour,
        Component::Week,
        Component::Weekday,
        Component::Day,
        Component::Month,
        Component::Year,
    ];

    /// Name used for this component in lexicon files and traces.
    pub fn config_name(self) -> &'static str {
        match self {
            Component::Second => "second",
            Component::Minute => "minute",
            Component::Hour => "hour",
            Component::Week => "week",
            Component::Weekday => "what_week",
            Component::Day => "day",
            Component::Month => "month",
            Component::Year => "year",
        }
    }

    pub(crate) fn flag(self) -> ComponentSet {
        match self {
            Component::Second => ComponentSet::SECOND,
            Component::Minute => ComponentSet::MINUTE,
            Component::Hour => ComponentSet::HOUR,
            Component::Week => ComponentSet::WEEK,
            Component::Weekday => ComponentSet::WEEKDAY,
            Component::Day => ComponentSet::DAY,
            Component::Month => ComponentSet::MONTH,
            Component::Year => ComponentSet::YEAR,
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.config_name())
    }
}

bitflags::bitflags! {
    /// Tracks which components matched a phrase during a run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComponentSet: u8 {
        const SECOND  = 1 << 0;
        const MINUTE  = 1 << 1;
        const HOUR    = 1 << 2;
        const WEEK    = 1 << 3;
        const WEEKDAY = 1 << 4;
        const DAY     = 1 << 5;
        const MONTH   = 1 << 6;
        const YEAR    = 1 << 7;
    }
}

impl ComponentSet {
    /// Components in this set, in resolution order.
    pub fn components(self) -> impl Iterator<Item = Component> {
        Component::RESOLUTION_ORDER.into_iter().filter(move |c| self.contains(c.flag()))
    }
}
