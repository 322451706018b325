use crate::CatalogId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Track,
    Album,
    Playlist,
    Artist,
    Unknown,
}

impl CatalogKind {
    pub fn from_segment(segment: &str) -> Self {
        match segment {
            "track" => CatalogKind::Track,
            "album" => CatalogKind::Album,
            "playlist" => CatalogKind::Playlist,
            "artist" => CatalogKind::Artist,
            _ => CatalogKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Track => "track",
            CatalogKind::Album => "album",
            CatalogKind::Playlist => "playlist",
            CatalogKind::Artist => "artist",
            CatalogKind::Unknown => "unknown",
        }
    }

    /// Albums and playlists are enumerated page by page.
    pub fn is_collection(&self) -> bool {
        matches!(self, CatalogKind::Album | CatalogKind::Playlist)
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogReference {
    pub kind: CatalogKind,
    pub id: CatalogId,
    pub source_url: String,
}

impl CatalogReference {
    pub fn unresolved(source_url: &str) -> Self {
        Self {
            kind: CatalogKind::Unknown,
            id: CatalogId::default(),
            source_url: source_url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    pub id: CatalogId,
    pub title: String,
    pub primary_artist_name: String,
    pub href: String,
}

impl std::fmt::Display for TrackDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.title, self.primary_artist_name)
    }
}

/// An entry of a collection page. Playlists may contain podcast episodes,
/// local files or entries that are no longer available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionItem {
    Track(TrackDescriptor),
    Other { item_type: String },
}

/// A page exactly as the catalog returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPage {
    pub total: u32,
    pub offset: u32,
    pub items: Vec<CollectionItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPage {
    pub total: u32,
    pub offset: u32,
    pub next_offset: Option<u32>,
    pub items: Vec<CollectionItem>,
}

impl TrackPage {
    /// `next_offset` is present iff `offset + page_size < total`.
    pub(crate) fn new(offset: u32, page_size: u32, page: CollectionPage) -> Self {
        let next = offset.saturating_add(page_size);
        let next_offset = if next < page.total { Some(next) } else { None };

        Self {
            total: page.total,
            offset,
            next_offset,
            items: page.items,
        }
    }

    pub fn tracks(&self) -> impl Iterator<Item = &TrackDescriptor> {
        self.items.iter().filter_map(|item| match item {
            CollectionItem::Track(track) => Some(track),
            CollectionItem::Other { .. } => None,
        })
    }

    pub fn into_tracks(self) -> Vec<TrackDescriptor> {
        self.items
            .into_iter()
            .filter_map(|item| match item {
                CollectionItem::Track(track) => Some(track),
                CollectionItem::Other { .. } => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMeta {
    pub id: CatalogId,
    pub name: String,
    pub kind: CatalogKind,
    pub total_tracks: u32,
}
