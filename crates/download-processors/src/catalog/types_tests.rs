use super::{CatalogError, CatalogKind, CollectionItem, CollectionPage, TrackPage};
use crate::test_utils::track;

fn page(total: u32, offset: u32, items: Vec<CollectionItem>) -> CollectionPage {
    CollectionPage {
        total,
        offset,
        items,
    }
}

#[test]
fn should_translate_not_found_status() {
    assert_eq!(
        CatalogError::from_status(404, "Resource not found"),
        CatalogError::NotFound
    );
    assert_eq!(
        CatalogError::from_status(404, "resource NOT FOUND"),
        CatalogError::NotFound
    );
}

#[test]
fn should_translate_invalid_id_status() {
    assert_eq!(
        CatalogError::from_status(400, "invalid id"),
        CatalogError::InvalidId
    );
    assert_eq!(
        CatalogError::from_status(400, "Invalid base62 id"),
        CatalogError::InvalidId
    );
}

#[test]
fn should_translate_other_statuses_into_generic_error() {
    assert_eq!(
        CatalogError::from_status(429, "API rate limit exceeded"),
        CatalogError::Generic {
            message: "API rate limit exceeded (429)".into()
        }
    );
    assert!(matches!(
        CatalogError::from_status(400, "Only valid bearer authentication supported"),
        CatalogError::Generic { .. }
    ));
    assert!(matches!(
        CatalogError::from_status(404, "Service temporarily gone"),
        CatalogError::Generic { .. }
    ));
}

#[test]
fn should_only_treat_albums_and_playlists_as_collections() {
    assert!(CatalogKind::Album.is_collection());
    assert!(CatalogKind::Playlist.is_collection());
    assert!(!CatalogKind::Track.is_collection());
    assert!(!CatalogKind::Artist.is_collection());
    assert!(!CatalogKind::Unknown.is_collection());
}

#[test]
fn should_have_next_offset_while_more_tracks_remain() {
    let page = TrackPage::new(10, 10, page(25, 10, vec![]));

    assert_eq!(page.next_offset, Some(20));
}

#[test]
fn should_not_have_next_offset_on_last_page() {
    assert_eq!(TrackPage::new(20, 10, page(25, 20, vec![])).next_offset, None);
    assert_eq!(TrackPage::new(10, 10, page(20, 10, vec![])).next_offset, None);
    assert_eq!(TrackPage::new(0, 10, page(0, 0, vec![])).next_offset, None);
}

#[test]
fn should_skip_non_track_items() {
    let page = TrackPage::new(
        0,
        10,
        page(
            3,
            0,
            vec![
                CollectionItem::Track(track(1)),
                CollectionItem::Other {
                    item_type: "episode".into(),
                },
                CollectionItem::Track(track(2)),
            ],
        ),
    );

    assert_eq!(page.tracks().count(), 2);
    assert_eq!(page.into_tracks(), vec![track(1), track(2)]);
}
