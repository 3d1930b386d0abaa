use crate::collection::{contains_ignore_case, Collection, RecordKind};
use crate::models::{Event, RecordId};
use crate::store::EVENTS_KEY;

pub struct EventKind;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub name: String,
    pub venue: String,
    pub date: String,
}

impl EventDraft {
    pub fn new(name: impl Into<String>, venue: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            venue: venue.into(),
            date: date.into(),
        }
    }
}

impl RecordKind for EventKind {
    type Record = Event;
    type Draft = EventDraft;

    const STORAGE_KEY: &'static str = EVENTS_KEY;

    fn is_complete(draft: &EventDraft) -> bool {
        !draft.name.is_empty() && !draft.venue.is_empty() && !draft.date.is_empty()
    }

    fn build(draft: &EventDraft, id: RecordId) -> Event {
        Event {
            id,
            name: draft.name.clone(),
            venue: draft.venue.clone(),
            date: draft.date.clone(),
        }
    }

    fn clear_draft(draft: &mut EventDraft) {
        *draft = EventDraft::default();
    }

    fn id(record: &Event) -> RecordId {
        record.id
    }

    fn date(record: &Event) -> &str {
        &record.date
    }

    fn name(record: &Event) -> &str {
        &record.name
    }

    fn matches(record: &Event, needle: &str) -> bool {
        contains_ignore_case(&record.name, needle) || contains_ignore_case(&record.venue, needle)
    }
}

pub type EventCollection = Collection<EventKind>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortDirection;
    use crate::store::RecordStore;

    fn boiler_room() -> EventDraft {
        EventDraft::new("Boiler Room", "Warehouse", "2023-03-01")
    }

    #[test]
    fn query_matches_venue_or_name() {
        let mut events = EventCollection::open(RecordStore::in_memory());
        events.create_from(boiler_room());

        events.set_query("warehouse");
        let hits: Vec<&str> = events.view().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(hits, vec!["Boiler Room"]);

        events.set_query("BOILER");
        assert_eq!(events.view().len(), 1);

        events.set_query("nonexistent");
        assert!(events.view().is_empty());
    }

    #[test]
    fn every_field_is_required() {
        let mut events = EventCollection::open(RecordStore::in_memory());
        assert!(events
            .create_from(EventDraft::new("Boiler Room", "", "2023-03-01"))
            .is_none());
        assert!(events
            .create_from(EventDraft::new("", "Warehouse", "2023-03-01"))
            .is_none());
        assert!(events
            .create_from(EventDraft::new("Boiler Room", "Warehouse", ""))
            .is_none());
        assert!(events.is_empty());
        assert_eq!(
            events.draft(),
            &EventDraft::new("Boiler Room", "Warehouse", "")
        );

        assert!(events.create().is_none());
        events.draft_mut().date = "2023-03-01".into();
        assert!(events.create().is_some());
        assert_eq!(events.len(), 1);
        assert_eq!(events.draft(), &EventDraft::default());
    }

    #[test]
    fn reopen_restores_records_and_order() {
        let store = RecordStore::in_memory();
        {
            let mut events = EventCollection::open(store.clone());
            events.create_from(boiler_room());
            events.create_from(EventDraft::new("Dekmantel", "Amsterdamse Bos", "2023-08-02"));
            events.create_from(EventDraft::new("Printworks", "London", "not a date"));
        }

        let mut events = EventCollection::open(store).with_sort(SortDirection::Ascending);
        assert_eq!(events.len(), 3);
        let order: Vec<&str> = events.view().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, vec!["Boiler Room", "Dekmantel", "Printworks"]);

        events.toggle_sort();
        let order: Vec<&str> = events.view().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, vec!["Printworks", "Dekmantel", "Boiler Room"]);
    }
}
