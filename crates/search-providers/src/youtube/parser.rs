use crate::{SearchResult, SearchResults, VideoId};
use scraper::{Html, Selector};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid selector: {0}")]
    SelectorError(String),
    #[error("Initial data has not been found on the page")]
    InitialDataNotFound,
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error("Search results have unexpected layout")]
    UnexpectedLayout,
}

const INITIAL_DATA_MARKERS: [&str; 2] = ["var ytInitialData = ", "window[\"ytInitialData\"] = "];
const SECTIONS_POINTER: &str =
    "/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents";

pub(crate) fn parse_search_results(raw_html: &str) -> Result<SearchResults, ParseError> {
    let initial_data = extract_initial_data(raw_html)?;

    let sections = initial_data
        .pointer(SECTIONS_POINTER)
        .and_then(Value::as_array)
        .ok_or(ParseError::UnexpectedLayout)?;

    // Channels, playlists, shelves and ads are skipped, as well as live
    // streams which have no length.
    let results = sections
        .iter()
        .filter_map(|section| section.pointer("/itemSectionRenderer/contents")?.as_array())
        .flatten()
        .filter_map(|item| item.get("videoRenderer"))
        .filter_map(parse_video_renderer)
        .collect();

    Ok(results)
}

fn extract_initial_data(raw_html: &str) -> Result<Value, ParseError> {
    let html = Html::parse_document(raw_html);
    let script_selector = Selector::parse("script")
        .map_err(|error| ParseError::SelectorError(format!("{:?}", error)))?;

    let raw_json = html
        .select(&script_selector)
        .map(|el| el.text().collect::<String>())
        .find_map(|script| {
            INITIAL_DATA_MARKERS.iter().find_map(|marker| {
                let start = script.find(marker)? + marker.len();
                Some(script[start..].to_string())
            })
        })
        .ok_or(ParseError::InitialDataNotFound)?;

    // The object is followed by `;` and possibly more statements.
    let value = serde_json::Deserializer::from_str(&raw_json)
        .into_iter::<Value>()
        .next()
        .ok_or(ParseError::InitialDataNotFound)??;

    Ok(value)
}

fn parse_video_renderer(renderer: &Value) -> Option<SearchResult> {
    let video_id = renderer.get("videoId")?.as_str()?;
    let title = text_of(renderer.get("title")?)?;
    let duration_seconds = parse_duration(&text_of(renderer.get("lengthText")?)?)?;
    let view_count = renderer
        .get("viewCountText")
        .and_then(text_of)
        .map(|text| parse_view_count(&text))
        .unwrap_or(0);
    let published_time_text = renderer.get("publishedTimeText").and_then(text_of);

    Some(SearchResult {
        video_id: VideoId(video_id.to_string()),
        title,
        view_count,
        duration_seconds,
        published_time_text,
    })
}

/// Text fields come either as `simpleText` or as a list of `runs`.
fn text_of(value: &Value) -> Option<String> {
    if let Some(text) = value.get("simpleText").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    let runs = value.get("runs")?.as_array()?;
    let text = runs
        .iter()
        .filter_map(|run| run.get("text").and_then(Value::as_str))
        .collect::<String>();

    Some(text)
}

/// "1,234,567 views" becomes 1234567, "No views" becomes 0.
pub(crate) fn parse_view_count(text: &str) -> u64 {
    text.chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

/// "3:45" or "1:02:03".
pub(crate) fn parse_duration(text: &str) -> Option<u64> {
    let mut seconds = 0u64;

    for part in text.trim().split(':') {
        seconds = seconds.checked_mul(60)?.checked_add(part.parse::<u64>().ok()?)?;
    }

    Some(seconds)
}
