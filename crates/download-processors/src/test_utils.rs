use crate::{
    AudioFetcher, AudioFetcherError, CatalogApi, CatalogError, CatalogId, CatalogKind,
    CollectionItem, CollectionMeta, CollectionPage, PublishedRecency, TrackDescriptor,
    VideoCandidate, VideoSearch, VideoSearchError,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub(crate) fn track(n: u32) -> TrackDescriptor {
    TrackDescriptor {
        id: CatalogId(format!("track{:018}", n)),
        title: format!("Track Title {}", n),
        primary_artist_name: format!("Track Artist {}", n),
        href: format!("https://api.spotify.com/v1/tracks/track{:018}", n),
    }
}

pub(crate) fn candidate(
    url: &str,
    view_count: u64,
    duration_seconds: u64,
    published_recency: Option<PublishedRecency>,
) -> VideoCandidate {
    VideoCandidate {
        url: url.to_string(),
        title: format!("Video {}", url),
        view_count,
        duration_seconds,
        published_recency,
    }
}

pub(crate) fn temp_destination() -> PathBuf {
    std::env::temp_dir().join(format!("download-processors-{}", uuid::Uuid::new_v4()))
}

pub(crate) struct CatalogApiMock {
    tracks: HashMap<CatalogId, TrackDescriptor>,
    collections: HashMap<CatalogId, (CollectionMeta, Vec<CollectionItem>)>,
    failing_offsets: HashSet<u32>,
    offset_drift: u32,
    page_requests: Mutex<Vec<(u32, u32)>>,
}

impl CatalogApiMock {
    pub(crate) fn new() -> Self {
        Self {
            tracks: HashMap::new(),
            collections: HashMap::new(),
            failing_offsets: HashSet::new(),
            offset_drift: 0,
            page_requests: Mutex::new(vec![]),
        }
    }

    pub(crate) fn with_track(mut self, track: TrackDescriptor) -> Self {
        self.tracks.insert(track.id.clone(), track);
        self
    }

    pub(crate) fn with_collection(
        mut self,
        kind: CatalogKind,
        id: &str,
        name: &str,
        items: Vec<CollectionItem>,
    ) -> Self {
        let meta = CollectionMeta {
            id: id.into(),
            name: name.to_string(),
            kind,
            total_tracks: items.len() as u32,
        };
        self.collections.insert(id.into(), (meta, items));
        self
    }

    pub(crate) fn with_failing_page(mut self, offset: u32) -> Self {
        self.failing_offsets.insert(offset);
        self
    }

    /// Reports every page as if it started `drift` items later.
    pub(crate) fn with_offset_drift(mut self, drift: u32) -> Self {
        self.offset_drift = drift;
        self
    }

    pub(crate) fn page_requests(&self) -> Vec<(u32, u32)> {
        self.page_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogApi for CatalogApiMock {
    async fn get_track(&self, id: &CatalogId) -> Result<TrackDescriptor, CatalogError> {
        self.tracks.get(id).cloned().ok_or(CatalogError::NotFound)
    }

    async fn get_collection_meta(
        &self,
        _kind: CatalogKind,
        id: &CatalogId,
    ) -> Result<CollectionMeta, CatalogError> {
        self.collections
            .get(id)
            .map(|(meta, _)| meta.clone())
            .ok_or(CatalogError::NotFound)
    }

    async fn get_collection_page(
        &self,
        _kind: CatalogKind,
        id: &CatalogId,
        offset: u32,
        page_size: u32,
    ) -> Result<CollectionPage, CatalogError> {
        self.page_requests.lock().unwrap().push((offset, page_size));

        if self.failing_offsets.contains(&offset) {
            return Err(CatalogError::generic("Service unavailable"));
        }

        let (_, all_items) = self.collections.get(id).ok_or(CatalogError::NotFound)?;
        let items = all_items
            .iter()
            .skip(offset as usize)
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(CollectionPage {
            total: all_items.len() as u32,
            offset: offset + self.offset_drift,
            items,
        })
    }
}

pub(crate) struct VideoSearchMock {
    results: HashMap<String, Result<Vec<VideoCandidate>, String>>,
    queries: Mutex<Vec<String>>,
}

impl VideoSearchMock {
    pub(crate) fn new() -> Self {
        Self {
            results: HashMap::new(),
            queries: Mutex::new(vec![]),
        }
    }

    /// Every track produced by [`track`] gets a single candidate.
    pub(crate) fn for_tracks(range: std::ops::RangeInclusive<u32>) -> Self {
        range.fold(Self::new(), |mock, n| {
            let t = track(n);
            mock.with_results(
                &format!("{} - {}", t.title, t.primary_artist_name),
                vec![candidate(&format!("https://video/{}", n), 1000, 200, None)],
            )
        })
    }

    pub(crate) fn with_results(mut self, query: &str, candidates: Vec<VideoCandidate>) -> Self {
        self.results.insert(query.to_string(), Ok(candidates));
        self
    }

    pub(crate) fn with_failure(mut self, query: &str, message: &str) -> Self {
        self.results.insert(query.to_string(), Err(message.to_string()));
        self
    }

    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoSearch for VideoSearchMock {
    async fn search(&self, query: &str) -> Result<Vec<VideoCandidate>, VideoSearchError> {
        self.queries.lock().unwrap().push(query.to_string());

        match self.results.get(query) {
            Some(Ok(candidates)) => Ok(candidates.clone()),
            Some(Err(message)) => Err(VideoSearchError::new(message.clone())),
            None => Ok(vec![]),
        }
    }
}

pub(crate) struct AudioFetcherMock {
    failing_locators: HashSet<String>,
    panicking_locators: HashSet<String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, PathBuf)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl AudioFetcherMock {
    pub(crate) fn new() -> Self {
        Self {
            failing_locators: HashSet::new(),
            panicking_locators: HashSet::new(),
            delay: None,
            calls: Mutex::new(vec![]),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_failure(mut self, locator: &str) -> Self {
        self.failing_locators.insert(locator.to_string());
        self
    }

    pub(crate) fn with_panic(mut self, locator: &str) -> Self {
        self.panicking_locators.insert(locator.to_string());
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioFetcher for AudioFetcherMock {
    async fn fetch(&self, locator: &str, destination: &Path) -> Result<(), AudioFetcherError> {
        self.calls
            .lock()
            .unwrap()
            .push((locator.to_string(), destination.to_path_buf()));

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.panicking_locators.contains(locator) {
            panic!("fetcher crashed on {}", locator);
        }

        if self.failing_locators.contains(locator) {
            return Err(AudioFetcherError::new("yt-dlp exited with status 1"));
        }

        Ok(())
    }
}
