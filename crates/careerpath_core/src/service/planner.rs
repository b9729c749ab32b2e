//! Career planner use-case service.
//!
//! # Responsibility
//! - Load and save the board state through a `StateRepository`.
//! - Run the objective path generation flow: add, mark loading, apply result.
//! - Run the market analysis flow over the current history and objectives.
//!
//! # Invariants
//! - A failed generation keeps the objective, anchor-only, with loading cleared.
//! - A completion for an objective deleted meanwhile is dropped.
//! - A failed market analysis keeps the previous insight.
//! - Layout overrides never reach the repository.

use crate::board::CareerBoard;
use crate::config::LayoutConfig;
use crate::model::insight::MarketInsight;
use crate::model::objective::ObjectiveId;
use crate::repo::state_repo::{RepoError, StateRepository, DEFAULT_NAMESPACE};
use crate::service::contracts::{
    GenerationFailure, MarketInsightRequest, ObjectiveBrief, PathGenerationRequest,
    PathGenerationResponse,
};
use crate::store::{CareerState, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Message surfaced when a path generation failure carries no detail.
pub const PATH_GENERATION_FALLBACK: &str = "Path generation failed";
/// Message surfaced when a market analysis failure carries no detail.
pub const MARKET_ANALYSIS_FALLBACK: &str = "Market analysis failed";

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    Repo(RepoError),
    /// User-facing generation failure message.
    Generation { message: String },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Generation { message } => write!(f, "{message}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Generation { .. } => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Produces a career path for one objective.
pub trait PathGenerator {
    fn generate(
        &self,
        request: &PathGenerationRequest,
    ) -> Result<PathGenerationResponse, GenerationFailure>;
}

/// Produces a market analysis for the current history and objectives.
pub trait MarketInsightProvider {
    fn analyze(&self, request: &MarketInsightRequest) -> Result<MarketInsight, GenerationFailure>;
}

/// Use-case service owning one board and its persistence.
pub struct CareerService<R: StateRepository> {
    repo: R,
    namespace: String,
    board: CareerBoard,
}

impl<R: StateRepository> CareerService<R> {
    /// Creates a service on the default record namespace.
    pub fn new(repo: R, config: LayoutConfig) -> Self {
        Self::with_namespace(repo, DEFAULT_NAMESPACE, config)
    }

    pub fn with_namespace(repo: R, namespace: impl Into<String>, config: LayoutConfig) -> Self {
        Self {
            repo,
            namespace: namespace.into(),
            board: CareerBoard::new(config),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn board(&self) -> &CareerBoard {
        &self.board
    }

    /// Board access for pointer input and direct data mutations.
    pub fn board_mut(&mut self) -> &mut CareerBoard {
        &mut self.board
    }

    /// Replaces the board state with the stored record.
    ///
    /// Returns `false` when no record exists; the board is then reset to an
    /// empty state.
    ///
    /// # Errors
    /// - Repository failures, including undecodable payloads.
    /// - `RepoError::InvalidData` when the stored records fail validation.
    pub fn load(&mut self) -> ServiceResult<bool> {
        let snapshot = self.repo.load(&self.namespace)?;
        let found = snapshot.is_some();
        let state = match snapshot {
            Some(snapshot) => CareerState::from_snapshot(snapshot, self.board.config())
                .map_err(|err| {
                    warn!(
                        "event=state_restore module=service status=error namespace={} error_code=invalid_record",
                        self.namespace
                    );
                    RepoError::InvalidData(err.to_string())
                })?,
            None => CareerState::new(self.board.config()),
        };
        self.board.replace_state(state);
        Ok(found)
    }

    /// Persists events and objectives.
    pub fn save(&self) -> ServiceResult<()> {
        self.repo
            .save(&self.namespace, &self.board.state().snapshot())?;
        Ok(())
    }

    /// Deletes the stored record and resets the board.
    pub fn clear(&mut self) -> ServiceResult<bool> {
        let existed = self.repo.clear(&self.namespace)?;
        let empty = CareerState::new(self.board.config());
        self.board.replace_state(empty);
        self.board.reset_layout();
        Ok(existed)
    }

    /// Adds an objective in loading state and returns its generation request.
    ///
    /// # Errors
    /// - `StoreError::ObjectiveCapReached` when the cap is met; no request made.
    /// - `StoreError::InvalidObjective` for blank title or location.
    pub fn begin_objective(
        &mut self,
        title: &str,
        location: &str,
    ) -> ServiceResult<(ObjectiveId, PathGenerationRequest)> {
        let id = self.board.add_objective(title, location)?;
        self.board.set_objective_loading(id, true)?;

        let objective = self
            .board
            .state()
            .objective(id)
            .ok_or(StoreError::ObjectiveNotFound(id))?;
        let request = PathGenerationRequest {
            career_history: self.board.state().events().to_vec(),
            objective_title: objective.title.clone(),
            location: objective.location.clone(),
        };
        info!(
            "event=path_generation module=service status=start objective_id={} history={}",
            id,
            request.career_history.len()
        );
        Ok((id, request))
    }

    /// Applies a generation result to the objective it was requested for.
    ///
    /// # Errors
    /// - `ServiceError::Generation` on failure, carrying the service detail
    ///   or [`PATH_GENERATION_FALLBACK`]. The objective stays, anchor-only.
    pub fn complete_path_generation(
        &mut self,
        id: ObjectiveId,
        result: Result<PathGenerationResponse, GenerationFailure>,
    ) -> ServiceResult<()> {
        if self.board.state().objective(id).is_none() {
            warn!(
                "event=path_generation module=service status=dropped objective_id={id} reason=objective_removed"
            );
            return Ok(());
        }

        self.board.set_objective_loading(id, false)?;
        match result {
            Ok(response) => {
                let path = response.into_path();
                let steps = path.steps.len();
                self.board.set_objective_path(id, path)?;
                info!(
                    "event=path_generation module=service status=ok objective_id={id} steps={steps}"
                );
                Ok(())
            }
            Err(failure) => {
                warn!(
                    "event=path_generation module=service status=error objective_id={} has_detail={}",
                    id,
                    failure.detail.is_some()
                );
                Err(ServiceError::Generation {
                    message: failure.message_or(PATH_GENERATION_FALLBACK),
                })
            }
        }
    }

    /// Runs the whole generation flow against a synchronous generator.
    ///
    /// On generation failure the objective id is lost to the caller but the
    /// objective remains on the board.
    pub fn generate_objective<G: PathGenerator + ?Sized>(
        &mut self,
        generator: &G,
        title: &str,
        location: &str,
    ) -> ServiceResult<ObjectiveId> {
        let (id, request) = self.begin_objective(title, location)?;
        let result = generator.generate(&request);
        self.complete_path_generation(id, result)?;
        Ok(id)
    }

    /// Marks the market panel loading and returns its request.
    pub fn begin_market_analysis(&mut self) -> MarketInsightRequest {
        self.board.set_market_loading(true);
        let state = self.board.state();
        MarketInsightRequest {
            career_history: state.events().to_vec(),
            objectives: state
                .objectives()
                .iter()
                .map(|objective| ObjectiveBrief {
                    title: objective.title.clone(),
                    location: objective.location.clone(),
                })
                .collect(),
        }
    }

    /// Applies a market analysis result; failures keep the previous insight.
    pub fn complete_market_analysis(
        &mut self,
        result: Result<MarketInsight, GenerationFailure>,
    ) -> ServiceResult<()> {
        self.board.set_market_loading(false);
        match result {
            Ok(insight) => {
                info!(
                    "event=market_analysis module=service status=ok top_jobs={} cities={}",
                    insight.top_jobs.len(),
                    insight.salary_by_city.len()
                );
                self.board.set_market_insight(Some(insight));
                Ok(())
            }
            Err(failure) => {
                warn!(
                    "event=market_analysis module=service status=error has_detail={} kept_previous={}",
                    failure.detail.is_some(),
                    self.board.state().market_insight().is_some()
                );
                Err(ServiceError::Generation {
                    message: failure.message_or(MARKET_ANALYSIS_FALLBACK),
                })
            }
        }
    }

    pub fn analyze_market<P: MarketInsightProvider + ?Sized>(
        &mut self,
        provider: &P,
    ) -> ServiceResult<()> {
        let request = self.begin_market_analysis();
        let result = provider.analyze(&request);
        self.complete_market_analysis(result)
    }
}
