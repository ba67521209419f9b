use serde::{Deserialize, Serialize};

/// Kind of activity a template describes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Practice,
    Scrimmage,
    Game,
}

impl EventType {
    pub fn et_as_str(&self) -> &'static str {
        match self {
            EventType::Practice => "practice",
            EventType::Scrimmage => "scrimmage",
            EventType::Game => "game",
        }
    }
}
