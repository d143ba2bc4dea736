//! Timeline merging
//!
//! Produces the single chronological sequence the attribution pass walks.
//! Events sharing a timestamp keep their concatenation order: the first
//! argument's events come before the second's, and each source keeps its
//! own file order. `sort_by_key` on a `Vec` is stable, which is what makes
//! same-instant exposure/sale outcomes reproducible.

use crate::types::Event;

/// Merge two event sequences into one ordered by ascending timestamp
///
/// # Arguments
///
/// * `first` - Events that win same-timestamp ties (exposures in the pipeline)
/// * `second` - Events placed after `first` on ties (sales in the pipeline)
pub fn merge_timeline(first: Vec<Event>, second: Vec<Event>) -> Vec<Event> {
    let mut timeline = first;
    timeline.extend(second);
    timeline.sort_by_key(|event| event.timestamp);
    timeline
}
