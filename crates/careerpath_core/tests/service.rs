use careerpath_core::db::open_db_in_memory;
use careerpath_core::model::insight::{JobDemand, MarketInsight};
use careerpath_core::service::contracts::{
    GenerationFailure, MarketInsightRequest, PathGenerationRequest, PathGenerationResponse,
};
use careerpath_core::service::planner::{
    MarketInsightProvider, PathGenerator, PATH_GENERATION_FALLBACK,
};
use careerpath_core::{
    CareerService, EventKind, LayoutConfig, NewEvent, PathStep, ServiceError,
    SqliteStateRepository, StepKind, StoreError,
};
use std::cell::RefCell;

struct FixedGenerator {
    seen: RefCell<Vec<PathGenerationRequest>>,
    result: Result<PathGenerationResponse, GenerationFailure>,
}

impl FixedGenerator {
    fn new(result: Result<PathGenerationResponse, GenerationFailure>) -> Self {
        Self {
            seen: RefCell::new(Vec::new()),
            result,
        }
    }
}

impl PathGenerator for FixedGenerator {
    fn generate(
        &self,
        request: &PathGenerationRequest,
    ) -> Result<PathGenerationResponse, GenerationFailure> {
        self.seen.borrow_mut().push(request.clone());
        self.result.clone()
    }
}

struct FixedMarket(Result<MarketInsight, GenerationFailure>);

impl MarketInsightProvider for FixedMarket {
    fn analyze(&self, _request: &MarketInsightRequest) -> Result<MarketInsight, GenerationFailure> {
        self.0.clone()
    }
}

fn three_steps() -> PathGenerationResponse {
    PathGenerationResponse {
        steps: vec![
            PathStep::new(StepKind::Formation, "Kubernetes course", 3),
            PathStep::new(StepKind::Job, "DevOps engineer", 24),
            PathStep::new(StepKind::Job, "SRE lead", 36),
        ],
        market_insights: "Strong demand".to_string(),
        confidence_score: 0.82,
    }
}

fn insight(summary: &str) -> MarketInsight {
    MarketInsight {
        top_jobs: vec![JobDemand {
            title: "Data engineer".to_string(),
            demand: "high".to_string(),
            growth: "+12%".to_string(),
        }],
        summary: summary.to_string(),
        ..MarketInsight::default()
    }
}

#[test]
fn generation_sends_history_and_lays_out_steps() {
    let conn = open_db_in_memory().unwrap();
    let mut service = CareerService::new(SqliteStateRepository::new(&conn), LayoutConfig::default());
    service
        .board_mut()
        .add_event(NewEvent::new(EventKind::Work, "Sysadmin", 2016).current())
        .unwrap();

    let generator = FixedGenerator::new(Ok(three_steps()));
    let id = service
        .generate_objective(&generator, " SRE lead ", "Montreal")
        .unwrap();

    let seen = generator.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].objective_title, "SRE lead");
    assert_eq!(seen[0].career_history.len(), 1);

    let objective = service.board().state().objective(id).unwrap();
    assert!(!objective.is_loading);
    assert_eq!(objective.step_count(), 3);
    assert_eq!(service.board().state().generated_path_count(), 1);

    let scene = service.board().scene();
    let layout = scene.objective(id).unwrap();
    assert_eq!(layout.waypoints.len(), 4);
    assert!(layout.steps[2].is_final);
}

#[test]
fn begin_marks_loading_and_layout_stays_anchor_only() {
    let conn = open_db_in_memory().unwrap();
    let mut service = CareerService::new(SqliteStateRepository::new(&conn), LayoutConfig::default());
    let (id, request) = service.begin_objective("Product owner", "Rennes").unwrap();

    assert_eq!(request.location, "Rennes");
    assert!(service.board().state().objective(id).unwrap().is_loading);
    let scene = service.board().scene();
    assert_eq!(scene.objective(id).unwrap().waypoints.len(), 1);
}

#[test]
fn failure_without_detail_uses_generic_message_and_keeps_objective() {
    let conn = open_db_in_memory().unwrap();
    let mut service = CareerService::new(SqliteStateRepository::new(&conn), LayoutConfig::default());
    let (id, _) = service.begin_objective("Researcher", "Grenoble").unwrap();

    let err = service
        .complete_path_generation(id, Err(GenerationFailure::unknown()))
        .unwrap_err();
    match err {
        ServiceError::Generation { message } => assert_eq!(message, PATH_GENERATION_FALLBACK),
        other => panic!("unexpected error: {other}"),
    }

    let objective = service.board().state().objective(id).unwrap();
    assert!(!objective.is_loading);
    assert!(objective.path.is_none());
}

#[test]
fn failure_detail_is_surfaced() {
    let conn = open_db_in_memory().unwrap();
    let mut service = CareerService::new(SqliteStateRepository::new(&conn), LayoutConfig::default());
    let generator = FixedGenerator::new(Err(GenerationFailure::new("quota exceeded")));

    let err = service
        .generate_objective(&generator, "Analyst", "Lyon")
        .unwrap_err();
    assert_eq!(err.to_string(), "quota exceeded");
    assert_eq!(service.board().state().objectives().len(), 1);
}

#[test]
fn completion_for_removed_objective_is_dropped() {
    let conn = open_db_in_memory().unwrap();
    let mut service = CareerService::new(SqliteStateRepository::new(&conn), LayoutConfig::default());
    let (id, _) = service.begin_objective("Founder", "Paris").unwrap();
    service.board_mut().remove_objective(id).unwrap();

    service
        .complete_path_generation(id, Ok(three_steps()))
        .unwrap();
    assert!(service.board().state().objectives().is_empty());
}

#[test]
fn cap_rejects_generation_before_any_request() {
    let conn = open_db_in_memory().unwrap();
    let mut service = CareerService::new(SqliteStateRepository::new(&conn), LayoutConfig::default());
    for index in 0..5 {
        service
            .begin_objective(&format!("Goal {index}"), "Paris")
            .unwrap();
    }

    let generator = FixedGenerator::new(Ok(three_steps()));
    let err = service
        .generate_objective(&generator, "Goal 5", "Paris")
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Store(StoreError::ObjectiveCapReached { cap: 5 })
    ));
    assert!(generator.seen.borrow().is_empty());
    assert_eq!(service.board().state().objectives().len(), 5);
}

#[test]
fn market_failure_keeps_previous_insight() {
    let conn = open_db_in_memory().unwrap();
    let mut service = CareerService::new(SqliteStateRepository::new(&conn), LayoutConfig::default());

    service
        .analyze_market(&FixedMarket(Ok(insight("first"))))
        .unwrap();
    assert!(service
        .analyze_market(&FixedMarket(Err(GenerationFailure::unknown())))
        .is_err());

    let state = service.board().state();
    assert!(!state.is_market_loading());
    assert_eq!(state.market_insight().unwrap().summary, "first");
}

#[test]
fn market_request_lists_objectives() {
    let conn = open_db_in_memory().unwrap();
    let mut service = CareerService::new(SqliteStateRepository::new(&conn), LayoutConfig::default());
    service.begin_objective("Head of data", "Lisbon").unwrap();

    let request = service.begin_market_analysis();
    assert!(service.board().state().is_market_loading());
    assert_eq!(request.objectives.len(), 1);
    assert_eq!(request.objectives[0].title, "Head of data");
}

#[test]
fn clear_removes_record_and_resets_board() {
    let conn = open_db_in_memory().unwrap();
    let mut service = CareerService::new(SqliteStateRepository::new(&conn), LayoutConfig::default());
    service
        .board_mut()
        .add_event(NewEvent::new(EventKind::Training, "Bootcamp", 2020))
        .unwrap();
    service.save().unwrap();

    assert!(service.clear().unwrap());
    assert!(service.board().state().events().is_empty());
    assert!(!service.load().unwrap());
}

#[test]
fn generation_requests_use_snake_case_bodies_with_camel_case_events() {
    let conn = open_db_in_memory().unwrap();
    let mut service = CareerService::new(SqliteStateRepository::new(&conn), LayoutConfig::default());
    service
        .board_mut()
        .add_event(NewEvent::new(EventKind::Work, "Support", 2018).current())
        .unwrap();

    let (_, path_request) = service.begin_objective("SRE", "Paris").unwrap();
    let value = serde_json::to_value(&path_request).unwrap();
    assert_eq!(value["objective_title"], "SRE");
    assert_eq!(value["location"], "Paris");
    assert_eq!(value["career_history"][0]["startYear"], 2018);
    assert_eq!(value["career_history"][0]["type"], "work");
    assert!(value.get("careerHistory").is_none());
    assert!(value.get("objectiveTitle").is_none());

    let market_request = service.begin_market_analysis();
    let value = serde_json::to_value(&market_request).unwrap();
    assert_eq!(value["career_history"].as_array().unwrap().len(), 1);
    assert_eq!(value["objectives"][0]["title"], "SRE");
    assert_eq!(value["objectives"][0]["location"], "Paris");
    assert!(value.get("careerHistory").is_none());
}
