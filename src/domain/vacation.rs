use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{duration, EmployeeName};

/// The category of a vacation.
///
/// The set is fixed. [`VacationType::Annual`] comes first and is what the
/// form selects by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VacationType {
    /// Planned annual leave.
    #[default]
    #[serde(alias = "أنوال")]
    Annual,
    /// Short-notice leave.
    #[serde(alias = "إمرجنسى")]
    Emergency,
    /// Recorded absence.
    #[serde(alias = "أبسينت")]
    Absent,
}

impl VacationType {
    /// Every vacation type, in picker order.
    pub const ALL: [Self; 3] = [Self::Annual, Self::Emergency, Self::Absent];

    /// The first type in picker order.
    #[must_use]
    pub const fn first() -> Self {
        Self::ALL[0]
    }

    /// The label shown in pickers and tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Annual => "Annual",
            Self::Emergency => "Emergency",
            Self::Absent => "Absent",
        }
    }

    /// The Arabic label the type was originally recorded under.
    const fn arabic_label(self) -> &'static str {
        match self {
            Self::Annual => "أنوال",
            Self::Emergency => "إمرجنسى",
            Self::Absent => "أبسينت",
        }
    }
}

impl fmt::Display for VacationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VacationType {
    type Err = UnknownTypeError;

    /// Matches English labels case-insensitively, and the Arabic labels
    /// exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s) || kind.arabic_label() == s)
            .ok_or_else(|| UnknownTypeError(s.to_string()))
    }
}

/// Error returned when a label names no vacation type.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown vacation type '{0}': expected one of Annual, Emergency, Absent")]
pub struct UnknownTypeError(String);

/// Why a draft could not be built.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    /// The start date falls after the end date.
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        /// The requested first day.
        start: NaiveDate,
        /// The requested last day.
        end: NaiveDate,
    },
}

/// A validated vacation that has not been stored yet.
///
/// Drafts always satisfy `start <= end`. The id is optional; the store
/// assigns one on insertion if the draft has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacationDraft {
    pub(crate) id: Option<Uuid>,
    pub(crate) employee: EmployeeName,
    pub(crate) kind: VacationType,
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
}

impl VacationDraft {
    /// Builds a draft for the given employee and inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::EndBeforeStart`] if `start` is after `end`.
    pub fn new(
        employee: EmployeeName,
        kind: VacationType,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, DraftError> {
        if start > end {
            return Err(DraftError::EndBeforeStart { start, end });
        }
        Ok(Self {
            id: None,
            employee,
            kind,
            start,
            end,
        })
    }

    /// Pins the id the record will be stored under.
    #[must_use]
    pub const fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

/// A stored vacation.
///
/// Records are immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vacation {
    id: Uuid,
    employee: EmployeeName,
    #[serde(rename = "type")]
    kind: VacationType,
    start: NaiveDate,
    end: NaiveDate,
}

impl Vacation {
    pub(crate) fn from_draft(draft: VacationDraft, id: Uuid) -> Self {
        Self {
            id,
            employee: draft.employee,
            kind: draft.kind,
            start: draft.start,
            end: draft.end,
        }
    }

    /// The unique, stable identifier of this record.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The employee on vacation.
    #[must_use]
    pub const fn employee(&self) -> &EmployeeName {
        &self.employee
    }

    /// The category of the vacation.
    #[must_use]
    pub const fn kind(&self) -> VacationType {
        self.kind
    }

    /// The first day of the vacation.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// The last day of the vacation.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// The number of days covered, counting both the first and last day.
    #[must_use]
    pub fn duration(&self) -> u64 {
        duration(Some(self.start), Some(self.end))
    }
}
