use crate::catalog::{CollectionMeta, TrackDescriptor};
use crate::track::{DownloadOutcome, OutcomeKind};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Result of downloading one album or playlist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionReport {
    pub collection: CollectionMeta,
    pub destination: PathBuf,
    pub succeeded: Vec<TrackDescriptor>,
    pub failed: BTreeMap<OutcomeKind, Vec<DownloadOutcome>>,
    /// Scheduling stopped because the operator cancelled the run.
    pub cancelled: bool,
    /// Scheduling stopped because a later page could not be fetched.
    pub interrupted: Option<String>,
}

impl CollectionReport {
    pub fn new(collection: CollectionMeta, destination: PathBuf) -> Self {
        Self {
            collection,
            destination,
            succeeded: vec![],
            failed: BTreeMap::new(),
            cancelled: false,
            interrupted: None,
        }
    }

    pub fn record(&mut self, outcome: DownloadOutcome) {
        match outcome {
            DownloadOutcome::Success { track } => self.succeeded.push(track),
            outcome => self.failed.entry(outcome.kind()).or_default().push(outcome),
        }
    }

    pub fn failed_count(&self) -> usize {
        self.failed.values().map(Vec::len).sum()
    }

    pub fn processed_count(&self) -> usize {
        self.succeeded.len() + self.failed_count()
    }

    pub fn failures(&self, kind: OutcomeKind) -> &[DownloadOutcome] {
        self.failed.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every track was scheduled and every one of them succeeded.
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.interrupted.is_none() && self.failed.is_empty()
    }
}

/// Turns a collection name into a single path component that is valid on
/// every platform and fits the file name length limit.
pub fn sanitize_directory_name(name: &str) -> String {
    let trimmed = name.trim().trim_matches('.').trim();
    let sanitized = sanitize_filename::sanitize_with_options(
        trimmed,
        sanitize_filename::Options {
            windows: true,
            truncate: true,
            replacement: "_",
        },
    );

    if sanitized.trim().is_empty() {
        "Untitled".to_string()
    } else {
        sanitized
    }
}
