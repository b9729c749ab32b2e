//! Request and response shapes exchanged with the generation services.
//!
//! The host performs the actual network calls; the core only builds
//! requests from state and applies responses.

use crate::model::event::CareerEvent;
use crate::model::insight::MarketInsight;
use crate::model::objective::{CareerPath, PathStep};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Snake-case body; the nested events keep their camelCase record shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathGenerationRequest {
    pub career_history: Vec<CareerEvent>,
    pub objective_title: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathGenerationResponse {
    pub steps: Vec<PathStep>,
    #[serde(default)]
    pub market_insights: String,
    #[serde(default)]
    pub confidence_score: f64,
}

impl PathGenerationResponse {
    /// Converts into a stored path, clamping the confidence into `[0, 1]`.
    pub fn into_path(self) -> CareerPath {
        let confidence_score = if self.confidence_score.is_finite() {
            self.confidence_score.clamp(0.0, 1.0)
        } else {
            0.0
        };
        CareerPath {
            steps: self.steps,
            market_insights: self.market_insights,
            confidence_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveBrief {
    pub title: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInsightRequest {
    pub career_history: Vec<CareerEvent>,
    pub objectives: Vec<ObjectiveBrief>,
}

pub type MarketInsightResponse = MarketInsight;

/// Failure reported by the host for a generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationFailure {
    /// Service-provided detail, when the error body carried one.
    pub detail: Option<String>,
}

impl GenerationFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }

    /// Failure without a usable detail.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Detail when non-blank, else `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        self.detail
            .as_deref()
            .map(str::trim)
            .filter(|detail| !detail.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

impl Display for GenerationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.detail.as_deref() {
            Some(detail) => write!(f, "{detail}"),
            None => write!(f, "unknown generation failure"),
        }
    }
}
