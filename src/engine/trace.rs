//! Resolution trace.
//!
//! Every component step appends one [`Step`] to the resolver's trace, matched
//! or not, so a caller can see exactly how the final timestamp was derived:
//!
//! ```text
//! second  "30秒"      +30  2019-10-31 13:21:30
//! minute  "25分钟"    +25  2019-10-31 13:46:30
//! hour    "下午2点"   +14  2019-11-01 03:46:30
//! week    "上上个周"   -2  2019-10-18 03:46:30
//! ...
//! ```
//!
//! Collecting the trace is cheap (eight small records per parse), so it is
//! always on; [`RunTrace`] adds wall-clock timing for verbose runs.

use chrono::NaiveDateTime;
use std::time::Duration;

use crate::{Component, ComponentSet};

/// Outcome of one component step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub component: Component,
    /// Matched literal, `None` when the text has no phrase for this component.
    pub literal: Option<String>,
    /// Delta applied, in the component's own unit (days for weekday).
    pub delta: i64,
    /// Anchor after the step.
    pub anchor: NaiveDateTime,
}

impl Step {
    pub fn matched(&self) -> bool {
        self.literal.is_some()
    }
}

/// Steps of a full run plus its timing.
#[derive(Debug, Clone)]
pub struct RunTrace {
    pub value: NaiveDateTime,
    pub steps: Vec<Step>,
    pub matched: ComponentSet,
    /// Total elapsed time for [`crate::Resolver::parse_traced`].
    pub total: Duration,
}
