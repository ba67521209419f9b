//! Template catalog: keyword → shift template, grouped per calendar.
//!
//! The catalog is a human-edited YAML document loaded once at start-up:
//!
//! ```yaml
//! calendars:
//!   practice:
//!     calendar_id: "club.example_123@resource.calendar.google.com"
//!     queries: ["scrimmage", "officials"]
//!     templates:
//!       "petals":
//!         description: Petals practice
//!         group: juniors
//!         initiative: Junior Derby
//!         type: practice
//!         need_ids:
//!           - id: "874512"
//!             description: Coaches
//!             slots: 2
//!             max_length: 165
//!             offset_start: -15
//!             offset_end: 0
//!       "default":
//!         ...
//! ```
//!
//! Keyword order in the document is kept: the matcher breaks score ties in
//! favour of the keyword declared first.

mod starter;

pub use starter::STARTER_CATALOG;

use crate::core::validate::MAX_DURATION;
use crate::errors::{AppError, AppResult};
use crate::models::EventType;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Reserved keyword used when no other keyword matches well enough.
pub const DEFAULT_KEYWORD: &str = "default";

/// Offsets may move a shift by at most one week either way.
pub const MAX_OFFSET_MINUTES: i64 = 7 * 24 * 60;

/// How to derive one shift for one volunteer need from an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NeedSpec {
    /// Empty for placeholder entries that must not be submitted.
    #[serde(default, deserialize_with = "need_id_string")]
    pub id: String,
    pub description: String,
    pub slots: u32,
    /// Minutes; `None` = unbounded.
    #[serde(default)]
    pub max_length: Option<i64>,
    #[serde(default)]
    pub offset_start: i64,
    #[serde(default)]
    pub offset_end: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateEntry {
    pub description: String,
    #[serde(default)]
    pub group: Option<String>,
    pub initiative: String,
    #[serde(rename = "type")]
    pub kind: EventType,
    pub need_ids: Vec<NeedSpec>,
}

/// Immutable keyword → template mapping for one calendar.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    name: String,
    calendar_id: Option<String>,
    queries: Vec<String>,
    entries: Vec<(String, TemplateEntry)>,
    default_index: usize,
}

impl TemplateCatalog {
    /// Build a catalog from ordered `(keyword, entry)` pairs.
    ///
    /// Keywords are trimmed and lowercased. Fails on duplicates, a missing
    /// `default` keyword, or a need spec with zero slots, an offset beyond
    /// [`MAX_OFFSET_MINUTES`] or a `max_length` outside 1..=[`MAX_DURATION`].
    pub fn new(name: &str, entries: Vec<(String, TemplateEntry)>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(entries.len());

        for (keyword, entry) in entries {
            let key = keyword.trim().to_lowercase();
            if key.is_empty() {
                return Err(AppError::Catalog(format!(
                    "calendar '{name}': empty keyword"
                )));
            }
            if !seen.insert(key.clone()) {
                return Err(AppError::Catalog(format!(
                    "calendar '{name}': duplicate keyword '{key}'"
                )));
            }
            for spec in &entry.need_ids {
                check_need_spec(spec).map_err(|reason| {
                    AppError::Catalog(format!(
                        "calendar '{name}', keyword '{key}': need '{}' {reason}",
                        spec.description
                    ))
                })?;
            }
            normalized.push((key, entry));
        }

        let default_index = normalized
            .iter()
            .position(|(k, _)| k == DEFAULT_KEYWORD)
            .ok_or_else(|| {
                AppError::Catalog(format!(
                    "calendar '{name}' has no '{DEFAULT_KEYWORD}' template"
                ))
            })?;

        Ok(Self {
            name: name.to_string(),
            calendar_id: None,
            queries: Vec::new(),
            entries: normalized,
            default_index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn calendar_id(&self) -> Option<&str> {
        self.calendar_id.as_deref()
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Keywords and templates in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplateEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn get(&self, keyword: &str) -> Option<&TemplateEntry> {
        let key = keyword.trim().to_lowercase();
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, e)| e)
    }

    pub fn default_entry(&self) -> &TemplateEntry {
        &self.entries[self.default_index].1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Deserialize)]
struct CatalogDocument {
    calendars: Mapping,
}

#[derive(Deserialize)]
struct CalendarDocument {
    #[serde(default)]
    calendar_id: Option<String>,
    #[serde(default)]
    queries: Vec<String>,
    templates: Mapping,
}

/// Every calendar described by one catalog document.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    calendars: Vec<TemplateCatalog>,
}

impl CatalogFile {
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Catalog(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let doc: CatalogDocument = serde_yaml::from_str(content)?;
        let mut calendars = Vec::with_capacity(doc.calendars.len());

        for (name, body) in doc.calendars {
            let name = mapping_key(&name)?;
            let cal: CalendarDocument = serde_yaml::from_value(body)
                .map_err(|e| AppError::Catalog(format!("calendar '{name}': {e}")))?;

            let mut entries = Vec::with_capacity(cal.templates.len());
            for (keyword, entry) in cal.templates {
                let keyword = mapping_key(&keyword)?;
                let entry: TemplateEntry = serde_yaml::from_value(entry).map_err(|e| {
                    AppError::Catalog(format!("calendar '{name}', keyword '{keyword}': {e}"))
                })?;
                entries.push((keyword, entry));
            }

            let mut catalog = TemplateCatalog::new(&name, entries)?;
            catalog.calendar_id = cal.calendar_id;
            catalog.queries = cal.queries;
            calendars.push(catalog);
        }

        if calendars.is_empty() {
            return Err(AppError::Catalog("no calendars defined".into()));
        }

        Ok(Self { calendars })
    }

    pub fn calendar(&self, name: &str) -> AppResult<&TemplateCatalog> {
        self.calendars
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| AppError::UnknownCalendar(name.to_string()))
    }

    /// The named calendar, or the only one when the document has exactly one.
    pub fn resolve(&self, name: Option<&str>) -> AppResult<&TemplateCatalog> {
        match (name, self.calendars.as_slice()) {
            (Some(n), _) => self.calendar(n),
            (None, [only]) => Ok(only),
            (None, _) => Err(AppError::Catalog(format!(
                "several calendars defined ({}); pick one with --calendar",
                self.names().join(", ")
            ))),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.calendars.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn calendars(&self) -> &[TemplateCatalog] {
        &self.calendars
    }
}

fn check_need_spec(spec: &NeedSpec) -> Result<(), String> {
    if spec.slots == 0 {
        return Err("must have at least one slot".into());
    }
    for (field, value) in [
        ("offset_start", spec.offset_start),
        ("offset_end", spec.offset_end),
    ] {
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&value) {
            return Err(format!(
                "{field} {value} is beyond ±{MAX_OFFSET_MINUTES} minutes"
            ));
        }
    }
    if let Some(max) = spec.max_length
        && !(1..=MAX_DURATION).contains(&max)
    {
        return Err(format!(
            "max_length {max} is not between 1 and {MAX_DURATION} minutes"
        ));
    }
    Ok(())
}

fn mapping_key(value: &Value) -> AppResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(AppError::Catalog(format!(
            "mapping keys must be strings, got {other:?}"
        ))),
    }
}

/// Need ids are written both quoted and bare in hand-edited catalogs.
fn need_id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "need id must be a string or number, got {other:?}"
        ))),
    }
}
