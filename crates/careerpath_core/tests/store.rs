use careerpath_core::config::DEFAULT_PALETTE;
use careerpath_core::model::event::EventValidationError;
use careerpath_core::model::objective::ObjectiveValidationError;
use careerpath_core::store::{SpanEnd, SNAPSHOT_VERSION};
use careerpath_core::{
    CareerState, EventKind, EventPatch, LayoutConfig, NewEvent, StoreError,
};

fn years(state: &CareerState) -> Vec<i32> {
    state.events().iter().map(|event| event.start_year).collect()
}

#[test]
fn events_stay_sorted_after_any_insertion_order() {
    let mut state = CareerState::default();
    for year in [2019, 2008, 2022, 2011, 2015] {
        state
            .add_event(NewEvent::new(EventKind::Work, format!("Role {year}"), year))
            .unwrap();
    }
    assert_eq!(years(&state), vec![2008, 2011, 2015, 2019, 2022]);
}

#[test]
fn equal_start_years_keep_insertion_order() {
    let mut state = CareerState::default();
    let first = state
        .add_event(NewEvent::new(EventKind::Study, "Evening school", 2016))
        .unwrap();
    let later = state
        .add_event(NewEvent::new(EventKind::Work, "Earlier job", 2010))
        .unwrap();
    let second = state
        .add_event(NewEvent::new(EventKind::Work, "Day job", 2016))
        .unwrap();

    let order = state.events().iter().map(|event| event.id).collect::<Vec<_>>();
    assert_eq!(order, vec![later, first, second]);
}

#[test]
fn update_moving_start_year_reorders_timeline() {
    let mut state = CareerState::default();
    let a = state
        .add_event(NewEvent::new(EventKind::Study, "A", 2010))
        .unwrap();
    state
        .add_event(NewEvent::new(EventKind::Work, "B", 2014))
        .unwrap();

    let patch = EventPatch {
        start_year: Some(2018),
        ..EventPatch::default()
    };
    state.update_event(a, &patch).unwrap();
    assert_eq!(years(&state), vec![2014, 2018]);
    assert_eq!(state.tail_event().unwrap().id, a);
}

#[test]
fn invalid_event_is_rejected_without_mutation() {
    let mut state = CareerState::default();
    let err = state
        .add_event(NewEvent::new(EventKind::Work, "Backwards", 2020).ending(2018))
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidEvent(EventValidationError::InvalidYearRange {
            start: 2020,
            end: 2018
        })
    );
    assert!(state.events().is_empty());
}

#[test]
fn sixth_objective_is_rejected_and_count_stays_at_five() {
    let mut state = CareerState::default();
    for index in 0..5 {
        state
            .add_objective(&format!("Goal {index}"), "Paris")
            .unwrap();
    }

    let err = state.add_objective("Goal 5", "Paris").unwrap_err();
    assert_eq!(err, StoreError::ObjectiveCapReached { cap: 5 });
    assert_eq!(state.objectives().len(), 5);
}

#[test]
fn objective_colors_cycle_by_creation_order() {
    let mut state = CareerState::default();
    let ids = (0..5)
        .map(|index| state.add_objective(&format!("Goal {index}"), "Lille").unwrap())
        .collect::<Vec<_>>();

    let colors = state
        .objectives()
        .iter()
        .map(|objective| objective.color.as_str())
        .collect::<Vec<_>>();
    assert_eq!(colors, DEFAULT_PALETTE.to_vec());

    state.remove_objective(ids[1]).unwrap();
    let replacement = state.add_objective("Goal 6", "Lille").unwrap();
    assert_eq!(state.objective(replacement).unwrap().color, DEFAULT_PALETTE[0]);
}

#[test]
fn blank_objective_fields_are_rejected() {
    let mut state = CareerState::default();
    assert_eq!(
        state.add_objective("  ", "Paris").unwrap_err(),
        StoreError::InvalidObjective(ObjectiveValidationError::BlankTitle)
    );
    assert_eq!(
        state.add_objective("Lead", "").unwrap_err(),
        StoreError::InvalidObjective(ObjectiveValidationError::BlankLocation)
    );
    assert!(state.objectives().is_empty());
}

#[test]
fn independent_states_do_not_share_data() {
    let mut left = CareerState::default();
    let right = CareerState::default();
    left.add_event(NewEvent::new(EventKind::Work, "Only left", 2020))
        .unwrap();
    assert_eq!(left.events().len(), 1);
    assert!(right.events().is_empty());
}

#[test]
fn timeline_span_reflects_first_and_tail_events() {
    let mut state = CareerState::default();
    assert!(state.timeline_span().is_none());

    state
        .add_event(NewEvent::new(EventKind::Study, "School", 2009).ending(2012))
        .unwrap();
    state
        .add_event(NewEvent::new(EventKind::Work, "Agency", 2013).ending(2017))
        .unwrap();
    let span = state.timeline_span().unwrap();
    assert_eq!(span.first_year, 2009);
    assert_eq!(span.end, SpanEnd::Year(2017));
}

#[test]
fn snapshot_round_trip_restores_records_but_not_loading() {
    let config = LayoutConfig::default();
    let mut state = CareerState::new(&config);
    state
        .add_event(NewEvent::new(EventKind::Work, "Analyst", 2018).current())
        .unwrap();
    let objective = state.add_objective("Manager", "Bordeaux").unwrap();
    state.set_objective_loading(objective, true).unwrap();

    let snapshot = state.snapshot();
    assert_eq!(snapshot.version, SNAPSHOT_VERSION);
    assert_eq!(snapshot.objective_serial, 1);

    let restored = CareerState::from_snapshot(snapshot, &config).unwrap();
    assert_eq!(restored.events(), state.events());
    assert!(!restored.objective(objective).unwrap().is_loading);
    assert!(restored.market_insight().is_none());
}

#[test]
fn snapshot_over_cap_is_rejected() {
    let mut state = CareerState::default();
    for index in 0..3 {
        state.add_objective(&format!("Goal {index}"), "Nice").unwrap();
    }
    let snapshot = state.snapshot();

    let tight = LayoutConfig {
        max_objectives: 2,
        ..LayoutConfig::default()
    };
    assert_eq!(
        CareerState::from_snapshot(snapshot, &tight).unwrap_err(),
        StoreError::ObjectiveCapReached { cap: 2 }
    );
}
