use crate::state::standings::{Entry, EntryId};

/// Order `entries` by score, best first.
///
/// The sort is stable: entries with equal scores keep the relative order they
/// have in `entries`.
pub fn compute_ranking(entries: &[Entry]) -> Vec<EntryId> {
    let mut ranked: Vec<&Entry> = entries.iter().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.into_iter().map(|entry| entry.id).collect()
}
