use crate::state::standings::EntryId;

/// Phases of the final countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// No countdown has been started.
    Inactive,
    /// Every entry is hidden and the ranking is frozen; nothing disclosed yet.
    Armed,
    /// At least one rank has been disclosed.
    Revealing,
    /// Every rank has been disclosed. Terminal.
    Complete,
}

/// Result of a disclosure request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisclosureOutcome {
    /// Show the entry frozen at `index`.
    Disclose {
        /// Zero-based rank being disclosed.
        index: usize,
        /// Entry holding that rank.
        id: EntryId,
    },
    /// The same index was already requested last time.
    Duplicate,
    /// The index does not name a rank of the frozen ranking.
    OutOfRange,
    /// No countdown was armed.
    NotArmed,
}

/// Countdown disclosure state, owning the frozen ranking snapshot.
#[derive(Debug, Clone)]
pub struct RevealSession {
    phase: RevealPhase,
    sorted_order: Vec<EntryId>,
    disclosed: Vec<bool>,
    revealed_index: Option<usize>,
    pending_index: Option<usize>,
}

impl Default for RevealSession {
    fn default() -> Self {
        Self {
            phase: RevealPhase::Inactive,
            sorted_order: Vec::new(),
            disclosed: Vec::new(),
            revealed_index: None,
            pending_index: None,
        }
    }
}

impl RevealSession {
    /// Create an inactive session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase of the countdown.
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Ranking frozen when the countdown was armed, best first.
    pub fn sorted_order(&self) -> &[EntryId] {
        &self.sorted_order
    }

    /// Last disclosed rank.
    pub fn revealed_index(&self) -> Option<usize> {
        self.revealed_index
    }

    /// Last requested rank.
    pub fn pending_index(&self) -> Option<usize> {
        self.pending_index
    }

    /// Freeze `sorted_order` and arm the countdown. Returns `false` when already started.
    pub fn arm(&mut self, sorted_order: Vec<EntryId>) -> bool {
        if self.phase != RevealPhase::Inactive {
            return false;
        }

        self.disclosed = vec![false; sorted_order.len()];
        self.sorted_order = sorted_order;
        self.revealed_index = None;
        self.pending_index = None;
        self.phase = RevealPhase::Armed;
        true
    }

    /// Register a request to disclose rank `index`.
    ///
    /// Only a change of requested index produces a disclosure.
    pub fn request(&mut self, index: usize) -> DisclosureOutcome {
        if self.phase == RevealPhase::Inactive {
            return DisclosureOutcome::NotArmed;
        }
        if self.pending_index == Some(index) {
            return DisclosureOutcome::Duplicate;
        }
        self.pending_index = Some(index);

        let Some(id) = self.sorted_order.get(index).copied() else {
            return DisclosureOutcome::OutOfRange;
        };

        self.disclosed[index] = true;
        self.revealed_index = Some(index);
        self.phase = if self.disclosed.iter().all(|done| *done) {
            RevealPhase::Complete
        } else {
            RevealPhase::Revealing
        };

        DisclosureOutcome::Disclose { index, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed(raw: &[u32]) -> RevealSession {
        let mut session = RevealSession::new();
        assert!(session.arm(raw.iter().copied().map(EntryId).collect()));
        session
    }

    #[test]
    fn requests_before_arming_are_ignored() {
        let mut session = RevealSession::new();
        assert_eq!(session.request(0), DisclosureOutcome::NotArmed);
        assert_eq!(session.phase(), RevealPhase::Inactive);
    }

    #[test]
    fn arming_twice_keeps_the_first_snapshot() {
        let mut session = armed(&[2, 1]);
        assert!(!session.arm(vec![EntryId(1), EntryId(2)]));
        assert_eq!(session.sorted_order(), &[EntryId(2), EntryId(1)]);
        assert_eq!(session.phase(), RevealPhase::Armed);
    }

    #[test]
    fn repeated_index_is_disclosed_once() {
        let mut session = armed(&[3, 1, 2]);
        assert_eq!(
            session.request(2),
            DisclosureOutcome::Disclose {
                index: 2,
                id: EntryId(2)
            }
        );
        assert_eq!(session.request(2), DisclosureOutcome::Duplicate);
        assert_eq!(session.phase(), RevealPhase::Revealing);
        assert_eq!(session.revealed_index(), Some(2));
    }

    #[test]
    fn out_of_range_index_is_remembered_but_not_disclosed() {
        let mut session = armed(&[1, 2]);
        assert_eq!(session.request(5), DisclosureOutcome::OutOfRange);
        assert_eq!(session.pending_index(), Some(5));
        assert_eq!(session.revealed_index(), None);
        assert_eq!(session.request(5), DisclosureOutcome::Duplicate);
    }

    #[test]
    fn disclosing_every_rank_completes_the_countdown() {
        let mut session = armed(&[2, 1]);
        session.request(1);
        session.request(0);
        assert_eq!(session.phase(), RevealPhase::Complete);

        // Terminal: a later start signal cannot re-arm it.
        assert!(!session.arm(vec![EntryId(1), EntryId(2)]));
    }
}
