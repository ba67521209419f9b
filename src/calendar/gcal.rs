use super::{CalendarSource, keep_well_formed};
use crate::catalog::TemplateCatalog;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::RawEvent;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Deserialize)]
struct EventsPage {
    #[serde(default)]
    items: Vec<EventItem>,
    #[serde(default, rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct EventItem {
    #[serde(default)]
    summary: String,
    start: EventTime,
    end: EventTime,
}

#[derive(Deserialize)]
struct EventTime {
    #[serde(default, rename = "dateTime")]
    date_time: Option<DateTime<FixedOffset>>,
}

/// Google Calendar v3 `events.list` for one calendar.
///
/// One listing per query string; results are concatenated in query order.
pub struct GoogleCalendar {
    client: Client,
    events_url: String,
    api_key: String,
    queries: Vec<String>,
}

impl GoogleCalendar {
    pub fn new(
        base_url: &str,
        calendar_id: &str,
        api_key: &str,
        queries: Vec<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        Ok(Self {
            client,
            events_url: format!("{base}{}/events", calendar_id.replace('@', "%40")),
            api_key: api_key.to_string(),
            queries,
        })
    }

    pub fn for_catalog(cfg: &Config, catalog: &TemplateCatalog) -> AppResult<Self> {
        let calendar_id = catalog
            .calendar_id()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                AppError::Catalog(format!(
                    "calendar '{}' has no calendar_id",
                    catalog.name()
                ))
            })?;

        Self::new(
            &cfg.gcal_base_url,
            calendar_id,
            cfg.require_gcal_token()?,
            catalog.queries().to_vec(),
            Duration::from_secs(cfg.http_timeout),
        )
    }

    fn list(
        &self,
        query: Option<&str>,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> AppResult<Vec<RawEvent>> {
        // The window is given in wall-clock time and sent as UTC.
        let time_min = from.and_utc().to_rfc3339();
        let time_max = to.and_utc().to_rfc3339();
        let mut page_token: Option<String> = None;
        let mut events = Vec::new();

        loop {
            let mut params: Vec<(&str, String)> = vec![
                ("singleEvents", "true".into()),
                ("orderBy", "startTime".into()),
                ("showDeleted", "false".into()),
                ("timeMin", time_min.clone()),
                ("timeMax", time_max.clone()),
                ("key", self.api_key.clone()),
            ];
            if let Some(q) = query {
                params.push(("q", q.to_string()));
            }
            if let Some(token) = &page_token {
                params.push(("pageToken", token.clone()));
            }

            debug!(url = %self.events_url, ?query, "listing calendar events");
            let response = self.client.get(&self.events_url).query(&params).send()?;
            let status = response.status();
            if !status.is_success() {
                return Err(AppError::Calendar(format!(
                    "events listing failed: HTTP {status}"
                )));
            }

            let page: EventsPage = response.json()?;
            events.extend(page.items.into_iter().filter_map(to_raw_event));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(events)
    }
}

impl CalendarSource for GoogleCalendar {
    fn fetch(&self, from: NaiveDateTime, to: NaiveDateTime) -> AppResult<Vec<RawEvent>> {
        let mut events = Vec::new();

        if self.queries.is_empty() {
            events.extend(self.list(None, from, to)?);
        } else {
            for q in &self.queries {
                events.extend(self.list(Some(q.as_str()), from, to)?);
            }
        }

        info!(count = events.len(), "calendar events fetched");
        Ok(keep_well_formed(events))
    }
}

/// All-day events carry only a date and cannot become shifts.
fn to_raw_event(item: EventItem) -> Option<RawEvent> {
    match (item.start.date_time, item.end.date_time) {
        (Some(start), Some(end)) => Some(RawEvent::new(
            item.summary,
            start.naive_local(),
            end.naive_local(),
        )),
        _ => {
            warn!(title = %item.summary, "event skipped: no start/end time (all-day event?)");
            None
        }
    }
}
