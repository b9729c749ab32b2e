//! Ordered timeline event collection.
//!
//! # Invariants
//! - Events are sorted ascending by `start_year` at all times.
//! - Ties keep insertion order (stable sort after every insert/update).
//! - Removal never reorders survivors.

use crate::model::event::{CareerEvent, EventId, EventPatch, EventValidationError, NewEvent};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSequence {
    events: Vec<CareerEvent>,
}

impl EventSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sequence from arbitrary input order.
    pub fn from_events(events: Vec<CareerEvent>) -> Self {
        let mut sequence = Self { events };
        sequence.restore_order();
        sequence
    }

    /// Validates a draft, assigns an ID and inserts it in order.
    pub fn add(&mut self, draft: NewEvent) -> Result<EventId, EventValidationError> {
        let event = CareerEvent::from_draft(draft)?;
        Ok(self.insert(event))
    }

    /// Inserts an already materialized event.
    pub fn insert(&mut self, event: CareerEvent) -> EventId {
        let id = event.id;
        self.events.push(event);
        self.restore_order();
        id
    }

    pub fn remove(&mut self, id: EventId) -> Option<CareerEvent> {
        let index = self.position(id)?;
        Some(self.events.remove(index))
    }

    /// Applies a partial update. Returns `Ok(None)` when `id` is unknown.
    pub fn update(
        &mut self,
        id: EventId,
        patch: &EventPatch,
    ) -> Result<Option<&CareerEvent>, EventValidationError> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };
        let next = patch.apply_to(&self.events[index])?;
        let reorder = next.start_year != self.events[index].start_year;
        self.events[index] = next;
        if reorder {
            self.restore_order();
        }
        Ok(self.get(id))
    }

    pub fn get(&self, id: EventId) -> Option<&CareerEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn position(&self, id: EventId) -> Option<usize> {
        self.events.iter().position(|event| event.id == id)
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.position(id).is_some()
    }

    /// Last event in timeline order; its waypoint anchors objective paths.
    pub fn tail(&self) -> Option<&CareerEvent> {
        self.events.last()
    }

    pub fn as_slice(&self) -> &[CareerEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &CareerEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn restore_order(&mut self) {
        // `sort_by_key` is stable, so equal years keep insertion order.
        self.events.sort_by_key(|event| event.start_year);
    }
}

#[cfg(test)]
mod tests {
    use super::EventSequence;
    use crate::model::event::{EventKind, EventPatch, NewEvent};

    #[test]
    fn update_of_start_year_reorders() {
        let mut sequence = EventSequence::new();
        let a = sequence.add(NewEvent::new(EventKind::Study, "A", 2010)).unwrap();
        let b = sequence.add(NewEvent::new(EventKind::Work, "B", 2015)).unwrap();

        let patch = EventPatch {
            start_year: Some(2020),
            ..EventPatch::default()
        };
        sequence.update(a, &patch).unwrap().unwrap();

        let order = sequence.iter().map(|event| event.id).collect::<Vec<_>>();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn update_of_unknown_id_is_none() {
        let mut sequence = EventSequence::new();
        let result = sequence
            .update(uuid::Uuid::new_v4(), &EventPatch::default())
            .unwrap();
        assert!(result.is_none());
    }
}
