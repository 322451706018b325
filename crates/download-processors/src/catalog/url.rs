use crate::catalog::{CatalogKind, CatalogReference};
use crate::CatalogId;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // https://open.spotify.com/intl-de/track/4iV5W9uYEdYUVa79Axb7Rh?si=...
    static ref WEB_REFERENCE: Regex = Regex::new(
        r"^https?://[^/\s]+/(?:[A-Za-z-]+/)?([a-z]+)/([0-9A-Za-z]{22})(?:[?#]\S*)?$"
    )
    .expect("Web reference pattern should be valid");

    // spotify:track:4iV5W9uYEdYUVa79Axb7Rh
    static ref URI_REFERENCE: Regex =
        Regex::new(r"^spotify:([a-z]+):([0-9A-Za-z]{22})$")
            .expect("URI reference pattern should be valid");
}

/// Classifies a catalog URL or URI. Never fails: anything that cannot be
/// resolved comes back with [`CatalogKind::Unknown`] and an empty id.
pub fn resolve_url(source_url: &str) -> CatalogReference {
    let input = source_url.trim();

    let captures = WEB_REFERENCE
        .captures(input)
        .or_else(|| URI_REFERENCE.captures(input));

    let (kind, id) = match captures {
        Some(captures) => (
            CatalogKind::from_segment(&captures[1]),
            captures[2].to_string(),
        ),
        None => return CatalogReference::unresolved(source_url),
    };

    if kind == CatalogKind::Unknown {
        return CatalogReference::unresolved(source_url);
    }

    CatalogReference {
        kind,
        id: CatalogId(id),
        source_url: source_url.to_string(),
    }
}
