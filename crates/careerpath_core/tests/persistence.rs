use careerpath_core::db::migrations::latest_version;
use careerpath_core::db::{open_db, open_db_in_memory, DbError};
use careerpath_core::{
    CareerService, CareerState, EventKind, LayoutConfig, NewEvent, NodeKey, Point, RepoError,
    ServiceError, SqliteStateRepository, StateRepository, DEFAULT_NAMESPACE,
};
use rusqlite::Connection;

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn), latest_version());

    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'state_records');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_record_loads_as_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStateRepository::new(&conn);
    assert!(repo.load(DEFAULT_NAMESPACE).unwrap().is_none());
    assert!(!repo.clear(DEFAULT_NAMESPACE).unwrap());
}

#[test]
fn save_then_load_on_disk_preserves_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("career.db");
    let config = LayoutConfig::default();

    let mut state = CareerState::new(&config);
    state
        .add_event(NewEvent::new(EventKind::Study, "Engineering school", 2014).ending(2017))
        .unwrap();
    let objective = state.add_objective("CTO", "Toulouse").unwrap();
    state.set_objective_loading(objective, true).unwrap();

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteStateRepository::new(&conn);
        repo.save(DEFAULT_NAMESPACE, &state.snapshot()).unwrap();
        // Saving again replaces the record in place.
        repo.save(DEFAULT_NAMESPACE, &state.snapshot()).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteStateRepository::new(&conn);
    let snapshot = repo.load(DEFAULT_NAMESPACE).unwrap().unwrap();
    assert_eq!(snapshot.events, state.events());
    assert_eq!(snapshot.objectives.len(), 1);
    assert!(!snapshot.objectives[0].is_loading);

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM state_records;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn payload_uses_host_wire_names_and_omits_session_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStateRepository::new(&conn);
    let mut state = CareerState::default();
    state
        .add_event(NewEvent::new(EventKind::Work, "Consultant", 2019).current())
        .unwrap();
    let objective = state.add_objective("Partner", "Geneva").unwrap();
    state.set_objective_loading(objective, true).unwrap();
    repo.save("career-path-store", &state.snapshot()).unwrap();

    let payload: String = conn
        .query_row(
            "SELECT payload FROM state_records WHERE namespace = 'career-path-store';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();

    let event = &value["events"][0];
    assert_eq!(event["type"], "work");
    assert_eq!(event["startYear"], 2019);
    assert_eq!(event["isCurrent"], true);
    let stored_objective = &value["objectives"][0];
    assert_eq!(stored_objective["isVisible"], true);
    assert!(stored_objective.get("isLoading").is_none());
    assert!(value.get("overrides").is_none());
    assert!(value.get("marketInsight").is_none());
}

#[test]
fn undecodable_payload_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO state_records (namespace, payload, schema_version) VALUES (?1, ?2, 1);",
        [DEFAULT_NAMESPACE, "{not json"],
    )
    .unwrap();

    let repo = SqliteStateRepository::new(&conn);
    assert!(matches!(
        repo.load(DEFAULT_NAMESPACE),
        Err(RepoError::InvalidData(_))
    ));
}

#[test]
fn invalid_namespace_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStateRepository::new(&conn);
    assert!(matches!(
        repo.save("Bad Namespace", &CareerState::default().snapshot()),
        Err(RepoError::InvalidNamespace(_))
    ));
}

#[test]
fn service_load_rejects_records_failing_validation() {
    let conn = open_db_in_memory().unwrap();
    let payload = r#"{"version":1,"events":[{"id":"7d7a4f8e-0d52-4c1e-9d47-1b1f1a2b3c4d","type":"work","title":"  ","startYear":2020}],"objectives":[]}"#;
    conn.execute(
        "INSERT INTO state_records (namespace, payload, schema_version) VALUES (?1, ?2, 1);",
        [DEFAULT_NAMESPACE, payload],
    )
    .unwrap();

    let mut service = CareerService::new(SqliteStateRepository::new(&conn), LayoutConfig::default());
    assert!(matches!(
        service.load(),
        Err(ServiceError::Repo(RepoError::InvalidData(_)))
    ));
}

#[test]
fn overrides_are_session_only() {
    let conn = open_db_in_memory().unwrap();
    let mut service = CareerService::new(SqliteStateRepository::new(&conn), LayoutConfig::default());
    let id = service
        .board_mut()
        .add_event(NewEvent::new(EventKind::Work, "Freelance", 2021))
        .unwrap();

    let board = service.board_mut();
    board.pointer_down(Point::new(500.0, 170.0)).unwrap();
    board.pointer_move(Point::new(300.0, 100.0)).unwrap();
    board.pointer_up();
    assert!(board.overrides().get(NodeKey::Event(id)).is_some());
    service.save().unwrap();

    let mut reopened =
        CareerService::new(SqliteStateRepository::new(&conn), LayoutConfig::default());
    assert!(reopened.load().unwrap());
    assert!(reopened.board().overrides().is_empty());
    assert_eq!(
        reopened.board().scene().timeline.nodes[0].position,
        Point::new(500.0, 170.0)
    );
}
