//! Market insight payload returned by the insight service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDemand {
    pub title: String,
    pub demand: String,
    pub growth: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySalary {
    pub city: String,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingFormation {
    pub title: String,
    pub provider: String,
    pub relevance: String,
}

/// Session-only market analysis for the current history and objectives.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsight {
    #[serde(default)]
    pub top_jobs: Vec<JobDemand>,
    #[serde(default)]
    pub salary_by_city: Vec<CitySalary>,
    #[serde(default)]
    pub trending_formations: Vec<TrendingFormation>,
    #[serde(default)]
    pub summary: String,
}
