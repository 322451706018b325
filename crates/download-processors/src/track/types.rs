use crate::catalog::TrackDescriptor;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecencyUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl RecencyUnit {
    fn from_word(word: &str) -> Option<Self> {
        let singular = word.strip_suffix('s').unwrap_or(word);

        Some(match singular {
            "second" => RecencyUnit::Second,
            "minute" => RecencyUnit::Minute,
            "hour" => RecencyUnit::Hour,
            "day" => RecencyUnit::Day,
            "week" => RecencyUnit::Week,
            "month" => RecencyUnit::Month,
            "year" => RecencyUnit::Year,
            _ => return None,
        })
    }

    /// Approximate calendar length in days.
    fn days(&self) -> f64 {
        match self {
            RecencyUnit::Second => 1.0 / 86_400.0,
            RecencyUnit::Minute => 1.0 / 1_440.0,
            RecencyUnit::Hour => 1.0 / 24.0,
            RecencyUnit::Day => 1.0,
            RecencyUnit::Week => 7.0,
            RecencyUnit::Month => 30.0,
            RecencyUnit::Year => 365.0,
        }
    }
}

/// How long ago a video was published, as the platform phrases it
/// ("3 weeks ago").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublishedRecency {
    pub amount: u32,
    pub unit: RecencyUnit,
}

impl PublishedRecency {
    pub fn new(amount: u32, unit: RecencyUnit) -> Self {
        Self { amount, unit }
    }

    /// Parses "2 years ago", "1 month ago" and the "Streamed"/"Premiered"
    /// prefixed variants of live uploads.
    pub fn parse(text: &str) -> Option<Self> {
        let normalized = text.trim().to_lowercase();
        let words = normalized
            .split_whitespace()
            .skip_while(|word| matches!(*word, "streamed" | "premiered"))
            .collect::<Vec<_>>();

        match words[..] {
            [amount, unit, "ago"] => Some(Self {
                amount: amount.parse().ok()?,
                unit: RecencyUnit::from_word(unit)?,
            }),
            _ => None,
        }
    }

    pub fn as_days(&self) -> f64 {
        self.amount as f64 * self.unit.days()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoCandidate {
    pub url: String,
    pub title: String,
    pub view_count: u64,
    pub duration_seconds: u64,
    pub published_recency: Option<PublishedRecency>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum OutcomeKind {
    Success,
    NotFound,
    FetchFailed,
    LookupFailed,
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OutcomeKind::Success => "downloaded",
            OutcomeKind::NotFound => "no video found",
            OutcomeKind::FetchFailed => "download failed",
            OutcomeKind::LookupFailed => "search failed",
        };

        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DownloadOutcome {
    Success { track: TrackDescriptor },
    NotFound { track: TrackDescriptor },
    FetchFailed { track: TrackDescriptor, cause: String },
    LookupFailed { track: TrackDescriptor, cause: String },
}

impl DownloadOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            DownloadOutcome::Success { .. } => OutcomeKind::Success,
            DownloadOutcome::NotFound { .. } => OutcomeKind::NotFound,
            DownloadOutcome::FetchFailed { .. } => OutcomeKind::FetchFailed,
            DownloadOutcome::LookupFailed { .. } => OutcomeKind::LookupFailed,
        }
    }

    pub fn track(&self) -> &TrackDescriptor {
        match self {
            DownloadOutcome::Success { track }
            | DownloadOutcome::NotFound { track }
            | DownloadOutcome::FetchFailed { track, .. }
            | DownloadOutcome::LookupFailed { track, .. } => track,
        }
    }

    pub fn cause(&self) -> Option<&str> {
        match self {
            DownloadOutcome::FetchFailed { cause, .. }
            | DownloadOutcome::LookupFailed { cause, .. } => Some(cause),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Success { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchQueryStyle {
    #[default]
    Plain,
    /// Appends a marker term, e.g. "lyrics", biasing results towards
    /// lyric-video uploads.
    WithMarker(String),
}

impl SearchQueryStyle {
    pub fn from_marker(marker: Option<String>) -> Self {
        match marker.map(|marker| marker.trim().to_string()) {
            Some(marker) if !marker.is_empty() => SearchQueryStyle::WithMarker(marker),
            _ => SearchQueryStyle::Plain,
        }
    }

    pub fn build_query(&self, track: &TrackDescriptor) -> String {
        let query = format!("{} - {}", track.title, track.primary_artist_name);

        match self {
            SearchQueryStyle::Plain => query,
            SearchQueryStyle::WithMarker(marker) => format!("{} {}", query, marker),
        }
    }
}
