use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

pub type RecordId = i64;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Dj {
    pub id: RecordId,
    pub name: String,
    pub date: String, // YYYY-MM-DD
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub logo: Option<String>, // data: URI or external URL
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub id: RecordId,
    pub name: String,
    pub venue: String,
    pub date: String, // YYYY-MM-DD
}

impl Dj {
    pub fn has_embedded_logo(&self) -> bool {
        self.logo
            .as_deref()
            .map(|logo| logo.starts_with("data:"))
            .unwrap_or(false)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "earliest first",
            SortDirection::Descending => "latest first",
        }
    }
}

// Older logs store "" for a DJ without a logo.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|logo| !logo.is_empty()))
}

/// Parses the calendar date of a record. Accepts `YYYY-MM-DD` and full
/// RFC 3339 timestamps; anything else is `None`.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
