use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::models::{parse_record_date, RecordId, SortDirection};
use crate::store::RecordStore;
use crate::utils;

/// What a collection needs to know about one kind of record.
pub trait RecordKind {
    type Record: Serialize + DeserializeOwned + Clone;
    type Draft: Default;

    const STORAGE_KEY: &'static str;

    /// Presence check only: no trimming, whitespace counts as a value.
    fn is_complete(draft: &Self::Draft) -> bool;
    fn build(draft: &Self::Draft, id: RecordId) -> Self::Record;
    fn clear_draft(draft: &mut Self::Draft);

    fn id(record: &Self::Record) -> RecordId;
    fn date(record: &Self::Record) -> &str;
    fn name(record: &Self::Record) -> &str;
    /// `needle` is already lowercased.
    fn matches(record: &Self::Record, needle: &str) -> bool;
}

pub struct Collection<K: RecordKind> {
    store: RecordStore,
    records: Vec<K::Record>,
    sort: SortDirection,
    query: String,
    draft: K::Draft,
    last_id: RecordId,
    clock: fn() -> i64,
}

impl<K: RecordKind> Collection<K> {
    pub fn open(store: RecordStore) -> Self {
        let records: Vec<K::Record> = store.load(K::STORAGE_KEY);
        let last_id = records.iter().map(K::id).max().unwrap_or(0);
        debug!("loaded {} records from {}", records.len(), K::STORAGE_KEY);
        Self {
            store,
            records,
            sort: SortDirection::default(),
            query: String::new(),
            draft: K::Draft::default(),
            last_id,
            clock: utils::now_millis,
        }
    }

    pub fn with_sort(mut self, sort: SortDirection) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn draft(&self) -> &K::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut K::Draft {
        &mut self.draft
    }

    /// Submits the pending draft. An incomplete draft is ignored and kept
    /// as entered.
    pub fn create(&mut self) -> Option<&K::Record> {
        if !K::is_complete(&self.draft) {
            debug!("ignoring incomplete {} draft", K::STORAGE_KEY);
            return None;
        }

        let Some(id) = self.next_id() else {
            warn!("{} ids exhausted; ignoring draft", K::STORAGE_KEY);
            return None;
        };
        let record = K::build(&self.draft, id);
        info!("created {} record {id}: {}", K::STORAGE_KEY, K::name(&record));
        self.records.push(record);
        K::clear_draft(&mut self.draft);
        self.persist();
        self.records.last()
    }

    pub fn create_from(&mut self, draft: K::Draft) -> Option<&K::Record> {
        self.draft = draft;
        self.create()
    }

    // Wall-clock millis, bumped past the last id when the clock hasn't moved.
    // None once the last id is i64::MAX.
    fn next_id(&mut self) -> Option<RecordId> {
        let id = (self.clock)().max(self.last_id.checked_add(1)?);
        self.last_id = id;
        Some(id)
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(K::STORAGE_KEY, &self.records) {
            warn!("failed to persist {}: {err}", K::STORAGE_KEY);
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Back to a freshly opened list: given sort and an empty draft.
    /// Records and query are kept.
    pub fn reset_view(&mut self, sort: SortDirection) {
        self.sort = sort;
        self.draft = K::Draft::default();
    }

    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.flipped();
    }

    pub fn sort(&self) -> SortDirection {
        self.sort
    }

    pub fn records(&self) -> &[K::Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records matching the current query, ordered by date.
    pub fn view(&self) -> Vec<&K::Record> {
        let needle = self.query.to_lowercase();
        let mut rows: Vec<(Option<NaiveDate>, &K::Record)> = self
            .records
            .iter()
            .filter(|record| K::matches(record, &needle))
            .map(|record| (parse_record_date(K::date(record)), record))
            .collect();

        // sort_by is stable, equal dates stay in insertion order.
        rows.sort_by(|(a, _), (b, _)| match self.sort {
            SortDirection::Ascending => compare_dates(*a, *b),
            SortDirection::Descending => compare_dates(*b, *a),
        });

        rows.into_iter().map(|(_, record)| record).collect()
    }
}

// Undated records compare greater than any dated one.
fn compare_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
