use crate::track::{PublishedRecency, VideoCandidate};
use std::cmp::Ordering;

const VIEW_RATIO_THRESHOLD: f64 = 1.3;
const AGE_PROXIMITY_DAYS: f64 = 30.0;
const UNDATED_VIEW_PROXIMITY: f64 = 0.2;

/// Orders two candidates, best first.
///
/// Dated candidates always beat undated ones. Among dated candidates a clear
/// popularity gap decides, then freshness unless the two are published within
/// a month of each other, in which case the shorter one wins. Among undated
/// candidates close view counts fall back to the shorter one.
pub fn compare_candidates(a: &VideoCandidate, b: &VideoCandidate) -> Ordering {
    match (&a.published_recency, &b.published_recency) {
        (Some(a_recency), Some(b_recency)) => compare_dated(a, a_recency, b, b_recency),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_undated(a, b),
    }
}

fn compare_dated(
    a: &VideoCandidate,
    a_recency: &PublishedRecency,
    b: &VideoCandidate,
    b_recency: &PublishedRecency,
) -> Ordering {
    if view_ratio(a.view_count, b.view_count) > VIEW_RATIO_THRESHOLD {
        return b.view_count.cmp(&a.view_count);
    }

    let a_days = a_recency.as_days();
    let b_days = b_recency.as_days();

    if (a_days - b_days).abs() < AGE_PROXIMITY_DAYS {
        a.duration_seconds.cmp(&b.duration_seconds)
    } else {
        a_days.total_cmp(&b_days)
    }
}

fn compare_undated(a: &VideoCandidate, b: &VideoCandidate) -> Ordering {
    let larger = a.view_count.max(b.view_count);
    let difference = a.view_count.abs_diff(b.view_count);

    if larger == 0 || (difference as f64) < larger as f64 * UNDATED_VIEW_PROXIMITY {
        a.duration_seconds.cmp(&b.duration_seconds)
    } else {
        b.view_count.cmp(&a.view_count)
    }
}

fn view_ratio(a: u64, b: u64) -> f64 {
    let (min, max) = if a < b { (a, b) } else { (b, a) };

    match (min, max) {
        (_, 0) => 1.0,
        (0, _) => f64::INFINITY,
        (min, max) => max as f64 / min as f64,
    }
}

/// Stable ordering of the candidates, best first.
pub fn rank_candidates(mut candidates: Vec<VideoCandidate>) -> Vec<VideoCandidate> {
    // Insertion sort: the comparator is not transitive, which the slice sorts
    // are allowed to reject with a panic.
    for i in 1..candidates.len() {
        let mut j = i;
        while j > 0 && compare_candidates(&candidates[j - 1], &candidates[j]) == Ordering::Greater
        {
            candidates.swap(j - 1, j);
            j -= 1;
        }
    }

    candidates
}

pub fn best_candidate(candidates: Vec<VideoCandidate>) -> Option<VideoCandidate> {
    rank_candidates(candidates).into_iter().next()
}
