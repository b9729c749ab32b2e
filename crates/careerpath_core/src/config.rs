//! Layout configuration.
//!
//! # Responsibility
//! - Hold every tunable constant of the layout and interaction engine.
//! - Load overrides from JSON while keeping unspecified fields at defaults.
//!
//! # Invariants
//! - A validated config has positive dimensions and a non-empty palette of
//!   `#rrggbb` colors.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex color regex"));

/// Objective colors, cycled by creation index.
pub const DEFAULT_PALETTE: [&str; 5] = ["#34d399", "#a78bfa", "#fb923c", "#f472b6", "#38bdf8"];

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    NonPositive { field: &'static str, value: f64 },
    EmptyPalette,
    InvalidColor(String),
    ZeroObjectiveCap,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read layout config: {err}"),
            Self::Parse(err) => write!(f, "invalid layout config: {err}"),
            Self::NonPositive { field, value } => {
                write!(f, "layout config `{field}` must be positive, got {value}")
            }
            Self::EmptyPalette => write!(f, "layout config palette must not be empty"),
            Self::InvalidColor(value) => {
                write!(f, "palette color `{value}` is not a #rrggbb value")
            }
            Self::ZeroObjectiveCap => write!(f, "layout config max_objectives must be >= 1"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Constants driving waypoint synthesis, node sizing and hit testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Fixed canvas height in pixels.
    pub canvas_height: f64,
    /// Width used until the host container has been measured.
    pub initial_canvas_width: f64,
    /// Horizontal padding on both sides of the event timeline.
    pub event_padding_x: f64,
    /// Vertical amplitude of the event timeline wave.
    pub event_amplitude: f64,
    /// Horizontal distance between consecutive objective steps.
    pub step_spacing: f64,
    /// Vertical distance between objective lanes.
    pub lane_spacing: f64,
    /// Vertical amplitude of objective paths.
    pub objective_amplitude: f64,
    /// Extra grab radius around every node.
    pub hit_slop: f64,
    pub event_radius: f64,
    pub current_event_radius: f64,
    pub step_radius: f64,
    pub final_step_radius: f64,
    /// Vertical distance from a node to its label anchor.
    pub label_offset: f64,
    /// Margin kept right of the farthest objective node.
    pub extent_margin: f64,
    pub max_objectives: usize,
    pub palette: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_height: 340.0,
            initial_canvas_width: 1000.0,
            event_padding_x: 80.0,
            event_amplitude: 80.0,
            step_spacing: 160.0,
            lane_spacing: 70.0,
            objective_amplitude: 60.0,
            hit_slop: 10.0,
            event_radius: 10.0,
            current_event_radius: 14.0,
            step_radius: 9.0,
            final_step_radius: 13.0,
            label_offset: 36.0,
            extent_margin: 80.0,
            max_objectives: 5,
            palette: DEFAULT_PALETTE.iter().map(|color| color.to_string()).collect(),
        }
    }
}

impl LayoutConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive_fields = [
            ("canvas_height", self.canvas_height),
            ("initial_canvas_width", self.initial_canvas_width),
            ("step_spacing", self.step_spacing),
            ("event_radius", self.event_radius),
            ("current_event_radius", self.current_event_radius),
            ("step_radius", self.step_radius),
            ("final_step_radius", self.final_step_radius),
        ];
        for (field, value) in positive_fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.max_objectives == 0 {
            return Err(ConfigError::ZeroObjectiveCap);
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if let Some(bad) = self
            .palette
            .iter()
            .find(|color| !HEX_COLOR_RE.is_match(color))
        {
            return Err(ConfigError::InvalidColor(bad.clone()));
        }
        Ok(())
    }

    /// Palette color for the n-th objective ever created.
    pub fn color_for(&self, creation_index: u64) -> String {
        cycle_color(&self.palette, creation_index)
    }
}

/// Picks a palette entry by creation index, falling back to the defaults.
pub fn cycle_color(palette: &[String], creation_index: u64) -> String {
    if palette.is_empty() {
        let slot = (creation_index % DEFAULT_PALETTE.len() as u64) as usize;
        return DEFAULT_PALETTE[slot].to_string();
    }
    let slot = (creation_index % palette.len() as u64) as usize;
    palette[slot].clone()
}
