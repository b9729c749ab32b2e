//! Career timeline event model.
//!
//! # Responsibility
//! - Define the canonical record for one past or current career step.
//! - Provide draft/patch shapes used by explicit add and partial update.
//!
//! # Invariants
//! - `id` is stable and never reused for another event.
//! - `title` is non-blank after trimming.
//! - `end_year` is never earlier than `start_year` when set.
//! - A current event (`is_current`) carries no `end_year`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a timeline event.
pub type EventId = Uuid;

/// Category of a timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Study,
    Work,
    Training,
    Other,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::Work => "work",
            Self::Training => "training",
            Self::Other => "other",
        }
    }
}

/// Validation errors for event records and drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    NilId,
    BlankTitle,
    InvalidYearRange { start: i32, end: i32 },
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "event id must not be nil"),
            Self::BlankTitle => write!(f, "event title must not be blank"),
            Self::InvalidYearRange { start, end } => {
                write!(f, "end_year ({end}) must be >= start_year ({start})")
            }
        }
    }
}

impl Error for EventValidationError {}

/// One entry of the career timeline.
///
/// Serialized with camelCase field names and `type` for the kind, matching
/// the payload the generation services expect as `career_history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerEvent {
    pub id: EventId,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    pub start_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CareerEvent {
    /// Materializes a draft into a record with a fresh stable ID.
    pub fn from_draft(draft: NewEvent) -> Result<Self, EventValidationError> {
        Self::from_draft_with_id(Uuid::new_v4(), draft)
    }

    /// Materializes a draft under a caller-provided ID (import paths).
    pub fn from_draft_with_id(id: EventId, draft: NewEvent) -> Result<Self, EventValidationError> {
        let mut event = Self {
            id,
            kind: draft.kind,
            title: draft.title,
            institution: draft.institution,
            start_year: draft.start_year,
            end_year: draft.end_year,
            is_current: draft.is_current,
            description: draft.description,
        };
        event.normalize();
        event.validate()?;
        Ok(event)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.id.is_nil() {
            return Err(EventValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(EventValidationError::BlankTitle);
        }
        if let Some(end) = self.end_year {
            if end < self.start_year {
                return Err(EventValidationError::InvalidYearRange {
                    start: self.start_year,
                    end,
                });
            }
        }
        Ok(())
    }

    /// Human-readable year span, e.g. `2019–2022` or `2023`.
    pub fn year_label(&self) -> String {
        match self.end_year {
            Some(end) if end != self.start_year => format!("{}–{}", self.start_year, end),
            _ => self.start_year.to_string(),
        }
    }

    fn normalize(&mut self) {
        self.title = self.title.trim().to_string();
        self.institution = normalize_optional_text(self.institution.take());
        self.description = normalize_optional_text(self.description.take());
        if self.is_current {
            self.end_year = None;
        }
    }
}

/// Draft for an explicit event add; the store assigns the ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub kind: EventKind,
    pub title: String,
    pub institution: Option<String>,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub is_current: bool,
    pub description: Option<String>,
}

impl NewEvent {
    pub fn new(kind: EventKind, title: impl Into<String>, start_year: i32) -> Self {
        Self {
            kind,
            title: title.into(),
            institution: None,
            start_year,
            end_year: None,
            is_current: false,
            description: None,
        }
    }

    pub fn institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = Some(institution.into());
        self
    }

    pub fn ending(mut self, end_year: i32) -> Self {
        self.end_year = Some(end_year);
        self
    }

    pub fn current(mut self) -> Self {
        self.is_current = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update for an existing event.
///
/// `None` leaves a field untouched. For optional fields, `Some(None)` clears
/// the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub kind: Option<EventKind>,
    pub title: Option<String>,
    pub institution: Option<Option<String>>,
    pub start_year: Option<i32>,
    pub end_year: Option<Option<i32>>,
    pub is_current: Option<bool>,
    pub description: Option<Option<String>>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns a patched copy of `event`, validated. The input is untouched.
    pub fn apply_to(&self, event: &CareerEvent) -> Result<CareerEvent, EventValidationError> {
        let mut next = event.clone();
        if let Some(kind) = self.kind {
            next.kind = kind;
        }
        if let Some(title) = &self.title {
            next.title = title.clone();
        }
        if let Some(institution) = &self.institution {
            next.institution = institution.clone();
        }
        if let Some(start_year) = self.start_year {
            next.start_year = start_year;
        }
        if let Some(end_year) = self.end_year {
            next.end_year = end_year;
        }
        if let Some(is_current) = self.is_current {
            next.is_current = is_current;
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        next.normalize();
        next.validate()?;
        Ok(next)
    }
}

fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{CareerEvent, EventKind, EventPatch, EventValidationError, NewEvent};

    #[test]
    fn draft_is_trimmed_and_current_clears_end_year() {
        let event = CareerEvent::from_draft(
            NewEvent::new(EventKind::Work, "  Backend engineer ", 2021)
                .institution("   ")
                .ending(2024)
                .current(),
        )
        .unwrap();

        assert_eq!(event.title, "Backend engineer");
        assert_eq!(event.institution, None);
        assert_eq!(event.end_year, None);
        assert!(event.is_current);
    }

    #[test]
    fn reversed_years_are_rejected() {
        let err = CareerEvent::from_draft(NewEvent::new(EventKind::Study, "BSc", 2020).ending(2018))
            .unwrap_err();
        assert_eq!(
            err,
            EventValidationError::InvalidYearRange {
                start: 2020,
                end: 2018
            }
        );
    }

    #[test]
    fn patch_keeps_original_on_validation_failure() {
        let event = CareerEvent::from_draft(NewEvent::new(EventKind::Study, "BSc", 2015)).unwrap();
        let patch = EventPatch {
            title: Some("   ".to_string()),
            ..EventPatch::default()
        };

        assert_eq!(patch.apply_to(&event), Err(EventValidationError::BlankTitle));
        assert_eq!(event.title, "BSc");
    }

    #[test]
    fn year_label_collapses_single_year() {
        let single = CareerEvent::from_draft(NewEvent::new(EventKind::Other, "Trip", 2019).ending(2019))
            .unwrap();
        let range = CareerEvent::from_draft(NewEvent::new(EventKind::Work, "Job", 2019).ending(2022))
            .unwrap();
        assert_eq!(single.year_label(), "2019");
        assert_eq!(range.year_label(), "2019–2022");
    }
}
