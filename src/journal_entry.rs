use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The five moods an entry can be tagged with. Stored as uppercase strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mood {
    Happy,
    Sad,
    Motivated,
    Stressed,
    Calm,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Motivated,
        Mood::Stressed,
        Mood::Calm,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "HAPPY",
            Mood::Sad => "SAD",
            Mood::Motivated => "MOTIVATED",
            Mood::Stressed => "STRESSED",
            Mood::Calm => "CALM",
        }
    }
}

/// Mood criterion for listing entries: everything, or one specific mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoodFilter {
    #[default]
    All,
    Mood(Mood),
}

impl MoodFilter {
    pub fn matches(&self, mood: Mood) -> bool {
        match self {
            MoodFilter::All => true,
            MoodFilter::Mood(wanted) => *wanted == mood,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoodFilter::All => "ALL",
            MoodFilter::Mood(mood) => mood.label(),
        }
    }

    /// Steps to the next filter, wrapping ALL -> moods -> ALL.
    pub fn cycle(&self) -> MoodFilter {
        match self {
            MoodFilter::All => MoodFilter::Mood(Mood::ALL[0]),
            MoodFilter::Mood(mood) => {
                let at = Mood::ALL.iter().position(|m| m == mood).unwrap_or(0);
                match Mood::ALL.get(at + 1) {
                    Some(next) => MoodFilter::Mood(*next),
                    None => MoodFilter::All,
                }
            }
        }
    }
}

/// Payload for creating or editing an entry; id and timestamp are stamped by
/// the store, never supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJournalEntry {
    pub title: String,
    pub content: String,
    pub mood: Mood,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    pub mood: Mood,
    #[serde(with = "ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(payload: NewJournalEntry) -> Self {
        JournalEntry {
            id: generate_id(),
            title: payload.title,
            content: payload.content,
            mood: payload.mood,
            timestamp: Utc::now(),
        }
    }
}

const ID_SUFFIX_LEN: usize = 9;
const ID_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Creation-time millis plus a random base-36 suffix. Not cryptographic;
/// collisions are negligible at interactive entry-creation rates.
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_CHARSET[rng.random_range(0..ID_CHARSET.len())] as char)
        .collect();
    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}
