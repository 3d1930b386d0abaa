use crate::collection::{contains_ignore_case, Collection, RecordKind};
use crate::logo::{LogoInputMode, LogoSlot, LogoSource, LogoTicket};
use crate::models::{Dj, RecordId};
use crate::store::DJS_KEY;

pub struct DjKind;

#[derive(Clone, Debug, Default)]
pub struct DjDraft {
    pub name: String,
    pub date: String,
    pub logo: LogoSlot,
}

impl DjDraft {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            logo: LogoSlot::default(),
        }
    }

    pub fn with_logo(mut self, source: LogoSource) -> Self {
        self.logo.set(source);
        self
    }
}

impl RecordKind for DjKind {
    type Record = Dj;
    type Draft = DjDraft;

    const STORAGE_KEY: &'static str = DJS_KEY;

    fn is_complete(draft: &DjDraft) -> bool {
        !draft.name.is_empty() && !draft.date.is_empty()
    }

    fn build(draft: &DjDraft, id: RecordId) -> Dj {
        Dj {
            id,
            name: draft.name.clone(),
            date: draft.date.clone(),
            logo: draft.logo.pending().map(str::to_string),
        }
    }

    // The logo input mode survives a submit.
    fn clear_draft(draft: &mut DjDraft) {
        draft.name.clear();
        draft.date.clear();
        draft.logo.clear();
    }

    fn id(record: &Dj) -> RecordId {
        record.id
    }

    fn date(record: &Dj) -> &str {
        &record.date
    }

    fn name(record: &Dj) -> &str {
        &record.name
    }

    fn matches(record: &Dj, needle: &str) -> bool {
        contains_ignore_case(&record.name, needle)
    }
}

pub type DjCollection = Collection<DjKind>;

impl Collection<DjKind> {
    pub fn set_logo(&mut self, source: LogoSource) {
        self.draft_mut().logo.set(source);
    }

    pub fn set_logo_url(&mut self, url: impl Into<String>) {
        self.draft_mut().logo.set_url(url);
    }

    pub fn toggle_logo_input(&mut self) {
        self.draft_mut().logo.toggle_mode();
    }

    pub fn logo_input_mode(&self) -> LogoInputMode {
        self.draft().logo.mode()
    }

    pub fn begin_logo_read(&mut self) -> LogoTicket {
        self.draft_mut().logo.begin_read()
    }

    pub fn finish_logo_read<E: std::fmt::Display>(
        &mut self,
        ticket: LogoTicket,
        result: Result<String, E>,
    ) -> bool {
        self.draft_mut().logo.finish_read(ticket, result)
    }

    pub fn logo_preview(&self) -> Option<&str> {
        self.draft().logo.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortDirection;
    use crate::store::RecordStore;

    fn frozen_clock() -> i64 {
        1_700_000_000_000
    }

    fn names(collection: &DjCollection) -> Vec<&str> {
        collection.view().iter().map(|dj| dj.name.as_str()).collect()
    }

    #[test]
    fn create_appends_and_persists() {
        let store = RecordStore::in_memory();
        let mut djs = DjCollection::open(store.clone());

        let created = djs
            .create_from(DjDraft::new("Nina", "2023-05-01"))
            .cloned()
            .expect("complete draft creates a record");
        assert_eq!(djs.len(), 1);
        assert_eq!(created.logo, None);

        let persisted: Vec<Dj> = store.load(DJS_KEY);
        assert_eq!(persisted, vec![created]);
    }

    #[test]
    fn incomplete_draft_is_ignored_and_kept() {
        let mut djs = DjCollection::open(RecordStore::in_memory());
        djs.draft_mut().name = "Nina".into();

        assert!(djs.create().is_none());
        assert!(djs.is_empty());
        assert_eq!(djs.draft().name, "Nina");
    }

    #[test]
    fn whitespace_counts_as_present() {
        let mut djs = DjCollection::open(RecordStore::in_memory());
        assert!(djs.create_from(DjDraft::new(" ", " ")).is_some());
        assert_eq!(djs.len(), 1);
    }

    #[test]
    fn ids_increase_within_one_clock_tick() {
        let mut djs = DjCollection::open(RecordStore::in_memory()).with_clock(frozen_clock);
        let first = djs.create_from(DjDraft::new("A", "2023-01-01")).map(|dj| dj.id);
        let second = djs.create_from(DjDraft::new("B", "2023-01-01")).map(|dj| dj.id);

        assert_eq!(first, Some(frozen_clock()));
        assert_eq!(second, Some(frozen_clock() + 1));
    }

    #[test]
    fn ids_continue_past_loaded_records() {
        let store = RecordStore::in_memory();
        {
            let mut djs = DjCollection::open(store.clone()).with_clock(frozen_clock);
            djs.create_from(DjDraft::new("A", "2023-01-01"));
        }

        let mut reopened = DjCollection::open(store).with_clock(frozen_clock);
        let id = reopened
            .create_from(DjDraft::new("B", "2023-01-02"))
            .map(|dj| dj.id);
        assert_eq!(id, Some(frozen_clock() + 1));
        assert_eq!(reopened.len(), 2);
    }

    #[test]
    fn query_matches_names_case_insensitively() {
        let mut djs = DjCollection::open(RecordStore::in_memory());
        djs.create_from(DjDraft::new("Nina", "2023-05-01"));
        djs.create_from(DjDraft::new("Nina Kraviz", "2023-01-01"));
        djs.create_from(DjDraft::new("Ben UFO", "2023-02-01"));

        djs.set_query("nina");
        assert_eq!(names(&djs), vec!["Nina", "Nina Kraviz"]);

        djs.set_query("");
        assert_eq!(djs.view().len(), djs.len());
    }

    #[test]
    fn toggling_sort_twice_restores_order() {
        let mut djs = DjCollection::open(RecordStore::in_memory());
        djs.create_from(DjDraft::new("Nina", "2023-05-01"));
        djs.create_from(DjDraft::new("Nina Kraviz", "2023-01-01"));
        djs.create_from(DjDraft::new("Ben UFO", "2023-02-01"));
        let original: Vec<String> = names(&djs).into_iter().map(String::from).collect();

        djs.toggle_sort();
        assert_eq!(djs.sort(), SortDirection::Ascending);
        assert_eq!(names(&djs), vec!["Nina Kraviz", "Ben UFO", "Nina"]);

        djs.toggle_sort();
        assert_eq!(names(&djs), original);
    }

    #[test]
    fn equal_dates_keep_insertion_order() {
        let mut djs = DjCollection::open(RecordStore::in_memory());
        djs.create_from(DjDraft::new("First", "2023-05-01"));
        djs.create_from(DjDraft::new("Second", "2023-05-01"));
        djs.create_from(DjDraft::new("Earlier", "2023-04-01"));

        assert_eq!(names(&djs), vec!["First", "Second", "Earlier"]);
        djs.toggle_sort();
        assert_eq!(names(&djs), vec!["Earlier", "First", "Second"]);
    }

    #[test]
    fn logo_is_stored_and_cleared_after_submit() {
        let mut djs = DjCollection::open(RecordStore::in_memory());
        djs.toggle_logo_input();
        assert_eq!(djs.logo_input_mode(), LogoInputMode::Url);

        djs.set_logo_url("https://img.example.com/nina.png");
        djs.draft_mut().name = "Nina".into();
        djs.draft_mut().date = "2023-05-01".into();
        assert_eq!(djs.logo_preview(), Some("https://img.example.com/nina.png"));

        let logo = djs.create().and_then(|dj| dj.logo.clone());
        assert_eq!(logo.as_deref(), Some("https://img.example.com/nina.png"));
        assert_eq!(djs.logo_preview(), None);
        assert_eq!(djs.logo_input_mode(), LogoInputMode::Url);
    }

    #[test]
    fn stale_logo_read_after_submit_is_dropped() {
        let mut djs = DjCollection::open(RecordStore::in_memory());
        let ticket = djs.begin_logo_read();
        djs.create_from(DjDraft::new("Nina", "2023-05-01"));

        assert!(!djs.finish_logo_read::<String>(ticket, Ok("data:image/png;base64,AAAA".into())));
        assert_eq!(djs.logo_preview(), None);
    }

    #[test]
    fn embedded_logo_round_trips_through_store() {
        let store = RecordStore::in_memory();
        let mut djs = DjCollection::open(store.clone());
        djs.create_from(
            DjDraft::new("Nina", "2023-05-01")
                .with_logo(LogoSource::Embedded("data:image/png;base64,cG5n".into())),
        );

        let reopened = DjCollection::open(store);
        assert!(reopened.records()[0].has_embedded_logo());
    }
}
