use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AppConfig;
use crate::djs::DjCollection;
use crate::events::EventCollection;
use crate::models::{Dj, Event, SortDirection};
use crate::store::RecordStore;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Djs,
    Events,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DashboardView<'a> {
    Djs(Vec<&'a Dj>),
    Events(Vec<&'a Event>),
}

impl DashboardView<'_> {
    pub fn len(&self) -> usize {
        match self {
            DashboardView::Djs(rows) => rows.len(),
            DashboardView::Events(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Both collections behind one search box and a tab selector.
pub struct Dashboard {
    djs: DjCollection,
    events: EventCollection,
    active: Tab,
    query: String,
    default_sort: SortDirection,
}

impl Dashboard {
    pub fn open(store: RecordStore) -> Self {
        Self::with_config(store, &AppConfig::default())
    }

    pub fn with_config(store: RecordStore, config: &AppConfig) -> Self {
        Self {
            djs: DjCollection::open(store.clone()).with_sort(config.default_sort),
            events: EventCollection::open(store).with_sort(config.default_sort),
            active: config.default_tab,
            query: String::new(),
            default_sort: config.default_sort,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active
    }

    /// Switching tabs reopens the incoming list: its sort goes back to the
    /// default and its unsubmitted draft is dropped. The query carries over.
    pub fn select_tab(&mut self, tab: Tab) {
        if tab == self.active {
            return;
        }
        debug!("switching to {:?}", tab);
        self.active = tab;
        match tab {
            Tab::Djs => self.djs.reset_view(self.default_sort),
            Tab::Events => self.events.reset_view(self.default_sort),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    // Both lists see the same search term, so switching tabs keeps the filter.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.djs.set_query(self.query.clone());
        self.events.set_query(self.query.clone());
    }

    pub fn djs(&self) -> &DjCollection {
        &self.djs
    }

    pub fn djs_mut(&mut self) -> &mut DjCollection {
        &mut self.djs
    }

    pub fn events(&self) -> &EventCollection {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventCollection {
        &mut self.events
    }

    /// Toggles the sort direction of the active list.
    pub fn toggle_sort(&mut self) {
        match self.active {
            Tab::Djs => self.djs.toggle_sort(),
            Tab::Events => self.events.toggle_sort(),
        }
    }

    pub fn sort(&self) -> SortDirection {
        match self.active {
            Tab::Djs => self.djs.sort(),
            Tab::Events => self.events.sort(),
        }
    }

    pub fn view(&self) -> DashboardView<'_> {
        match self.active {
            Tab::Djs => DashboardView::Djs(self.djs.view()),
            Tab::Events => DashboardView::Events(self.events.view()),
        }
    }
}
