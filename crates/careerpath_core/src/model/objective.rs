//! Objective model: a future goal with an externally generated step path.
//!
//! # Responsibility
//! - Define objectives, their generated paths and individual path steps.
//! - Derive the short captions shown next to step nodes.
//!
//! # Invariants
//! - `color` is assigned once at creation and never recomputed.
//! - `confidence_score` is within `[0, 1]`.
//! - `is_loading` is session-only and never persisted.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for an objective.
pub type ObjectiveId = Uuid;

/// Kind of one generated path step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Job,
    Formation,
}

/// Validation errors for objective input and generated paths.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectiveValidationError {
    BlankTitle,
    BlankLocation,
    ConfidenceOutOfRange(f64),
}

impl Display for ObjectiveValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "objective title must not be blank"),
            Self::BlankLocation => write!(f, "objective location must not be blank"),
            Self::ConfidenceOutOfRange(value) => {
                write!(f, "confidence score {value} is outside [0, 1]")
            }
        }
    }
}

impl Error for ObjectiveValidationError {}

/// One step of a generated path. Wire names follow the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default)]
    pub duration_months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_estimate: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PathStep {
    pub fn new(kind: StepKind, title: impl Into<String>, duration_months: u32) -> Self {
        Self {
            kind,
            title: title.into(),
            provider: None,
            duration_months,
            salary_min: None,
            salary_max: None,
            cost: None,
            year_estimate: None,
            description: None,
        }
    }

    /// Short caption: salary range, else training cost, else duration.
    pub fn caption(&self) -> String {
        if let Some(min) = self.salary_min.filter(|value| *value > 0) {
            let max = self.salary_max.unwrap_or(min);
            return format!("{}k–{}k€", round_thousands(min), round_thousands(max));
        }
        if let Some(cost) = self.cost.filter(|value| *value > 0) {
            return format!("~{}k€ formation", round_thousands(cost));
        }
        format!("~{} mois", self.duration_months)
    }
}

fn round_thousands(value: u32) -> u32 {
    (f64::from(value) / 1000.0).round() as u32
}

/// Generated path toward an objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPath {
    pub steps: Vec<PathStep>,
    #[serde(default)]
    pub market_insights: String,
    pub confidence_score: f64,
}

impl CareerPath {
    pub fn validate(&self) -> Result<(), ObjectiveValidationError> {
        if !(0.0..=1.0).contains(&self.confidence_score) {
            return Err(ObjectiveValidationError::ConfidenceOutOfRange(
                self.confidence_score,
            ));
        }
        Ok(())
    }
}

/// A user-declared career goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub id: ObjectiveId,
    pub title: String,
    pub location: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<CareerPath>,
    #[serde(skip)]
    pub is_loading: bool,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Objective {
    /// Creates a visible, idle objective with a fresh ID.
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<Self, ObjectiveValidationError> {
        let objective = Self {
            id: Uuid::new_v4(),
            title: title.into().trim().to_string(),
            location: location.into().trim().to_string(),
            color: color.into(),
            path: None,
            is_loading: false,
            is_visible: true,
        };
        objective.validate()?;
        Ok(objective)
    }

    pub fn validate(&self) -> Result<(), ObjectiveValidationError> {
        if self.title.trim().is_empty() {
            return Err(ObjectiveValidationError::BlankTitle);
        }
        if self.location.trim().is_empty() {
            return Err(ObjectiveValidationError::BlankLocation);
        }
        if let Some(path) = &self.path {
            path.validate()?;
        }
        Ok(())
    }

    /// Number of laid-out steps; zero until a path has arrived.
    pub fn step_count(&self) -> usize {
        self.path.as_ref().map_or(0, |path| path.steps.len())
    }

    pub fn step(&self, step_index: usize) -> Option<&PathStep> {
        // Waypoint index 0 is the anchor; steps start at 1.
        let steps = &self.path.as_ref()?.steps;
        step_index.checked_sub(1).and_then(|index| steps.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::{CareerPath, Objective, ObjectiveValidationError, PathStep, StepKind};

    #[test]
    fn caption_prefers_salary_then_cost_then_duration() {
        let mut step = PathStep::new(StepKind::Job, "Senior", 24);
        step.salary_min = Some(48_000);
        step.salary_max = Some(62_000);
        assert_eq!(step.caption(), "48k–62k€");

        let mut training = PathStep::new(StepKind::Formation, "Cert", 6);
        training.cost = Some(4_000);
        assert_eq!(training.caption(), "~4k€ formation");

        assert_eq!(PathStep::new(StepKind::Job, "Bare", 18).caption(), "~18 mois");
    }

    #[test]
    fn new_objective_is_visible_and_trimmed() {
        let objective = Objective::new(" CTO ", "Paris", "#34d399").unwrap();
        assert_eq!(objective.title, "CTO");
        assert!(objective.is_visible);
        assert!(!objective.is_loading);
        assert_eq!(objective.step_count(), 0);
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = Objective::new("  ", "Paris", "#34d399").unwrap_err();
        assert_eq!(err, ObjectiveValidationError::BlankTitle);
    }

    #[test]
    fn step_lookup_skips_anchor_index() {
        let mut objective = Objective::new("CTO", "Lyon", "#a78bfa").unwrap();
        objective.path = Some(CareerPath {
            steps: vec![PathStep::new(StepKind::Job, "Lead", 12)],
            market_insights: String::new(),
            confidence_score: 0.5,
        });
        assert!(objective.step(0).is_none());
        assert_eq!(objective.step(1).map(|step| step.title.as_str()), Some("Lead"));
        assert!(objective.step(2).is_none());
    }
}
