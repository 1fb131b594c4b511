//! Binary refund outcome.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Outcome of a refund request.
///
/// The numeric codes match the `refund_approved` column: `0` for flagged,
/// `1` for approved. Ordering follows the codes, so `Flagged < Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Needs manual review.
    Flagged,
    /// Approved automatically.
    Approved,
}

impl Label {
    /// Both labels in code order.
    pub const ALL: [Label; 2] = [Label::Flagged, Label::Approved];

    /// Parse a `refund_approved` code.
    pub fn from_code(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Self::Flagged),
            1 => Ok(Self::Approved),
            other => Err(ModelError::InvalidLabel { value: other }),
        }
    }

    /// The `refund_approved` code for this label.
    pub const fn code(self) -> i64 {
        match self {
            Self::Flagged => 0,
            Self::Approved => 1,
        }
    }

    /// Position of this label in [`Label::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Flagged => 0,
            Self::Approved => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flagged => "flagged",
            Self::Approved => "approved",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-label tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub flagged: usize,
    pub approved: usize,
}

impl LabelCounts {
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a Label>) -> Self {
        let mut counts = Self::default();
        for label in labels {
            counts.add(*label, 1);
        }
        counts
    }

    pub fn add(&mut self, label: Label, n: usize) {
        match label {
            Label::Flagged => self.flagged += n,
            Label::Approved => self.approved += n,
        }
    }

    pub fn get(&self, label: Label) -> usize {
        match label {
            Label::Flagged => self.flagged,
            Label::Approved => self.approved,
        }
    }

    pub fn total(&self) -> usize {
        self.flagged + self.approved
    }

    /// True when at most one label is present.
    pub fn is_pure(&self) -> bool {
        self.flagged == 0 || self.approved == 0
    }

    /// Label with the larger count; ties go to [`Label::Flagged`].
    pub fn majority(&self) -> Label {
        if self.approved > self.flagged {
            Label::Approved
        } else {
            Label::Flagged
        }
    }

    /// Gini impurity of the tallied labels. Zero for an empty tally.
    pub fn gini(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        let p_flagged = self.flagged as f64 / total;
        let p_approved = self.approved as f64 / total;
        1.0 - p_flagged * p_flagged - p_approved * p_approved
    }
}
