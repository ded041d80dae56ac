//! Extraction configuration.
//!
//! Holds the optional date window and the policy deciding how a date-only
//! end bound is turned into an instant.

use crate::models::{DateBound, DateRange, EndDatePolicy};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for a Dst extraction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DstConfig {
    /// Inclusive lower bound (unbounded when absent)
    pub begin: Option<DateBound>,

    /// Inclusive upper bound (unbounded when absent)
    pub end: Option<DateBound>,

    /// Promotion rule for a date-only `end`
    pub end_date_policy: EndDatePolicy,
}

impl DstConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lower bound
    pub fn with_begin(mut self, begin: impl Into<DateBound>) -> Self {
        self.begin = Some(begin.into());
        self
    }

    /// Set the upper bound
    pub fn with_end(mut self, end: impl Into<DateBound>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Choose how a date-only end bound is promoted
    pub fn with_end_date_policy(mut self, policy: EndDatePolicy) -> Self {
        self.end_date_policy = policy;
        self
    }

    /// Resolve the configured bounds into an inclusive window
    pub fn date_range(&self) -> DateRange {
        let range = DateRange::new(self.begin, self.end, self.end_date_policy);
        debug!(
            "Resolved date range: {} ..= {} ({:?})",
            range.begin, range.end, self.end_date_policy
        );
        range
    }
}
