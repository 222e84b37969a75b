use std::fmt;

use tracing::warn;

use crate::services::ranking::compute_ranking;

/// Stable 1-based identifier of an entry. Row `N` of the board always holds id `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u32);

impl EntryId {
    /// Zero-based row backing this entry, `None` for the invalid id `0`.
    pub fn row(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One ranked participant (team) displayed on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Immutable identity of the entry.
    pub id: EntryId,
    /// Latest score observed on the feed.
    pub score: i64,
    /// Current visual slot, `0` being the top of the board.
    pub position: usize,
}

/// Freshly observed score for a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    /// Entry the score belongs to.
    pub id: EntryId,
    /// New score value.
    pub score: i64,
}

/// Exchange of two adjacent visual positions, `upper` and `upper + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swap {
    upper: usize,
}

impl Swap {
    /// Swap the entry at `upper` with the one directly below it.
    pub fn at(upper: usize) -> Self {
        Self { upper }
    }

    /// Position closer to the top of the board.
    pub fn upper(&self) -> usize {
        self.upper
    }

    /// Position directly below [`Swap::upper`].
    pub fn lower(&self) -> usize {
        self.upper + 1
    }

    /// Both addressed positions as `(upper, lower)`.
    pub fn positions(&self) -> (usize, usize) {
        (self.upper(), self.lower())
    }
}

/// All entries of the board together with their visual arrangement.
///
/// `entries` keeps insertion (row) order while `order[position]` names the entry
/// shown at each visual slot, so the positions always form a permutation of `0..N`.
#[derive(Debug, Clone)]
pub struct Standings {
    entries: Vec<Entry>,
    order: Vec<EntryId>,
}

impl Standings {
    /// Build a board of `team_count` entries with zero scores, row `i` shown at slot `i`.
    pub fn new(team_count: usize) -> Self {
        let entries: Vec<Entry> = (0..team_count)
            .map(|row| Entry {
                id: EntryId(row as u32 + 1),
                score: 0,
                position: row,
            })
            .collect();
        let order = entries.iter().map(|entry| entry.id).collect();
        Self { entries, order }
    }

    /// Number of entries on the board.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the board has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion (row) order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Look up a single entry by identifier.
    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        id.row().and_then(|row| self.entries.get(row))
    }

    /// Identifiers ordered by visual position, top first.
    pub fn visual_order(&self) -> &[EntryId] {
        &self.order
    }

    /// Entry currently shown at `position`.
    pub fn at_position(&self, position: usize) -> Option<EntryId> {
        self.order.get(position).copied()
    }

    /// Score-derived ranking of the board.
    ///
    /// Entries are fed to the ranking in visual order, so tied entries keep the
    /// relative placement the viewer already sees.
    pub fn ranking(&self) -> Vec<EntryId> {
        let shown: Vec<Entry> = self
            .order
            .iter()
            .filter_map(|id| self.entry(*id).cloned())
            .collect();
        compute_ranking(&shown)
    }

    /// Score-derived ranking with ties kept in row (id) order, whatever the
    /// board currently shows.
    pub fn row_ranking(&self) -> Vec<EntryId> {
        compute_ranking(&self.entries)
    }

    /// Store new scores, returning only the updates that changed a value.
    ///
    /// Unknown identifiers have no row on the board and are skipped.
    pub fn apply_scores(&mut self, updates: &[ScoreUpdate]) -> Vec<ScoreUpdate> {
        let mut changed = Vec::new();
        for update in updates {
            let Some(entry) = update.id.row().and_then(|row| self.entries.get_mut(row)) else {
                warn!(id = %update.id, "score update for unknown entry; skipping");
                continue;
            };
            if entry.score != update.score {
                entry.score = update.score;
                changed.push(*update);
            }
        }
        changed
    }

    /// Exchange the entries shown at the two positions of `swap`.
    ///
    /// Returns the identifiers now shown at `(upper, lower)`.
    pub(crate) fn swap(&mut self, swap: Swap) -> Option<(EntryId, EntryId)> {
        if swap.lower() >= self.order.len() {
            return None;
        }
        self.order.swap(swap.upper(), swap.lower());
        let upper = self.order[swap.upper()];
        let lower = self.order[swap.lower()];
        self.set_position(upper, swap.upper());
        self.set_position(lower, swap.lower());
        Some((upper, lower))
    }

    /// Replace the whole arrangement, `order[position]` naming each slot's entry.
    ///
    /// Rejected (returning `false`) unless `order` is a permutation of the board's entries.
    pub(crate) fn arrange(&mut self, order: &[EntryId]) -> bool {
        if order.len() != self.entries.len() {
            return false;
        }
        let mut seen = vec![false; self.entries.len()];
        for id in order {
            match id.row() {
                Some(row) if row < seen.len() && !seen[row] => seen[row] = true,
                _ => return false,
            }
        }

        self.order = order.to_vec();
        for (position, id) in order.iter().enumerate() {
            self.set_position(*id, position);
        }
        true
    }

    fn set_position(&mut self, id: EntryId, position: usize) {
        if let Some(entry) = id.row().and_then(|row| self.entries.get_mut(row)) {
            entry.position = position;
        }
    }
}
