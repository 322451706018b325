use super::{resolve_url, CatalogKind, CatalogReference};
use crate::CatalogId;

const ID: &str = "4iV5W9uYEdYUVa79Axb7Rh";

fn assert_unresolved(input: &str) {
    assert_eq!(resolve_url(input), CatalogReference::unresolved(input));
}

#[test]
fn should_resolve_web_track_url() {
    let url = "https://open.spotify.com/track/4iV5W9uYEdYUVa79Axb7Rh";

    assert_eq!(
        resolve_url(url),
        CatalogReference {
            kind: CatalogKind::Track,
            id: CatalogId::new(ID),
            source_url: url.into(),
        }
    );
}

#[test]
fn should_resolve_every_supported_kind() {
    for (segment, kind) in [
        ("track", CatalogKind::Track),
        ("album", CatalogKind::Album),
        ("playlist", CatalogKind::Playlist),
        ("artist", CatalogKind::Artist),
    ] {
        let web = resolve_url(&format!("https://open.spotify.com/{}/{}", segment, ID));
        let uri = resolve_url(&format!("spotify:{}:{}", segment, ID));

        assert_eq!(web.kind, kind);
        assert_eq!(&*web.id, ID);
        assert_eq!(uri.kind, kind);
        assert_eq!(&*uri.id, ID);
    }
}

#[test]
fn should_resolve_web_url_with_locale_and_query() {
    let reference =
        resolve_url("https://open.spotify.com/intl-de/album/4iV5W9uYEdYUVa79Axb7Rh?si=a1b2c3d4");

    assert_eq!(reference.kind, CatalogKind::Album);
    assert_eq!(&*reference.id, ID);
}

#[test]
fn should_ignore_surrounding_whitespace_but_keep_source_url() {
    let input = "  spotify:playlist:4iV5W9uYEdYUVa79Axb7Rh\n";
    let reference = resolve_url(input);

    assert_eq!(reference.kind, CatalogKind::Playlist);
    assert_eq!(reference.source_url, input);
}

#[test]
fn should_not_resolve_unsupported_kind() {
    assert_unresolved("https://open.spotify.com/show/4iV5W9uYEdYUVa79Axb7Rh");
    assert_unresolved("spotify:episode:4iV5W9uYEdYUVa79Axb7Rh");
}

#[test]
fn should_not_resolve_malformed_id() {
    assert_unresolved("https://open.spotify.com/track/4iV5W9uYEdYUVa79Axb7R");
    assert_unresolved("https://open.spotify.com/track/4iV5W9uYEdYUVa79Axb7Rhh");
    assert_unresolved("spotify:track:4iV5W9uYEdYUVa79Axb7R_");
}

#[test]
fn should_not_resolve_garbage() {
    assert_unresolved("");
    assert_unresolved("hello world");
    assert_unresolved("https://open.spotify.com/");
    assert_unresolved("spotify:track");
    assert_unresolved("ftp://open.spotify.com/track/4iV5W9uYEdYUVa79Axb7Rh");
}

#[test]
fn should_resolve_same_url_identically() {
    let url = "https://open.spotify.com/playlist/4iV5W9uYEdYUVa79Axb7Rh";

    assert_eq!(resolve_url(url), resolve_url(url));
}
