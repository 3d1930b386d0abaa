mod cli;
pub mod collection;
pub mod config;
pub mod dashboard;
pub mod djs;
pub mod error;
pub mod events;
pub mod logo;
pub mod models;
pub mod store;
mod utils;

pub use cli::{execute, run, Cli};
pub use collection::{Collection, RecordKind};
pub use config::{AppConfig, ConfigStore};
pub use dashboard::{Dashboard, DashboardView, Tab};
pub use djs::{DjCollection, DjDraft, DjKind};
pub use error::{StoreError, StoreResult};
pub use events::{EventCollection, EventDraft, EventKind};
pub use logo::{LogoInputMode, LogoSource, LogoTicket};
pub use models::{Dj, Event, RecordId, SortDirection};
pub use store::{KeyValueStore, MemoryStore, RecordStore, SqliteStore, DJS_KEY, EVENTS_KEY};
