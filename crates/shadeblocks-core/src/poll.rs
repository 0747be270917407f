//! Poll vote tally with optional snapshot persistence.
//!
//! # Design
//! - `total` and percentages are derived on read, never stored.
//! - A revote accumulates: the new option gains a vote, the old one keeps its count.
//! - Snapshot I/O failures are logged and treated as "no prior state".

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PollError, PollResult, StorageError, StorageResult};
use crate::storage::SnapshotStore;

/// Namespace prefix for persisted poll snapshots.
pub const SNAPSHOT_KEY_PREFIX: &str = "quickpoll:";

/// Storage key for the poll identified by `poll_id`.
#[must_use]
pub fn snapshot_key(poll_id: &str) -> String {
    format!("{SNAPSHOT_KEY_PREFIX}{poll_id}")
}

/// Whether percentages and fill bars should be shown.
#[must_use]
pub const fn results_visible(show_results_before_vote: bool, has_voted: bool) -> bool {
    show_results_before_vote || has_voted
}

/// Share of `total` held by `count`, rounded half up to a whole percent.
#[must_use]
pub fn percentage(count: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    let count = u128::from(count.min(total));
    let total = u128::from(total);
    let rounded = (count * 200 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(100)
}

/// One selectable choice with its running count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    /// Stable option identifier.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Votes recorded for this option.
    pub votes: u64,
}

impl PollOption {
    /// Option with an initial count.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, votes: u64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            votes,
        }
    }
}

/// Persisted poll state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSnapshot {
    /// Option chosen by this voter, if any.
    pub selected: Option<String>,
    /// Vote counts keyed by option id.
    pub results: BTreeMap<String, u64>,
}

/// Voting state for the local voter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoterState {
    /// No vote cast yet.
    NotVoted,
    /// A vote has been recorded.
    Voted,
}

/// Result of a vote attempt that was not a wiring error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The vote was counted.
    Recorded,
    /// Ignored: the voter already voted and revoting is off.
    AlreadyVoted,
    /// Ignored: the poll is read-only.
    ReadOnly,
}

/// What a reset request did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetOutcome {
    /// State was restored to the initial counts.
    Restored,
    /// A host reset hook was invoked instead.
    Delegated,
}

#[derive(Clone)]
struct Persistence {
    key: String,
    store: Rc<dyn SnapshotStore>,
}

/// Vote counts and the local voter's selection.
#[derive(Clone)]
pub struct PollTally {
    id: String,
    initial: Vec<PollOption>,
    options: Vec<PollOption>,
    selected: Option<String>,
    allow_revote: bool,
    show_results_before_vote: bool,
    read_only: bool,
    persistence: Option<Persistence>,
    on_reset: Option<Rc<dyn Fn()>>,
}

impl PollTally {
    /// Fresh poll in the `NotVoted` state.
    #[must_use]
    pub fn new(id: impl Into<String>, options: Vec<PollOption>) -> Self {
        Self {
            id: id.into(),
            initial: options.clone(),
            options,
            selected: None,
            allow_revote: false,
            show_results_before_vote: false,
            read_only: false,
            persistence: None,
            on_reset: None,
        }
    }

    /// Allow additional votes after the first.
    #[must_use]
    pub fn with_revote(mut self, allow: bool) -> Self {
        self.allow_revote = allow;
        self
    }

    /// Show percentages before the voter has voted.
    #[must_use]
    pub fn with_results_before_vote(mut self, show: bool) -> Self {
        self.show_results_before_vote = show;
        self
    }

    /// Ignore every vote.
    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Delegate [`Self::reset`] to a host callback.
    #[must_use]
    pub fn with_reset_hook(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_reset = Some(Rc::new(hook));
        self
    }

    /// Attach a snapshot store and restore any prior state from it.
    #[must_use]
    pub fn persisted(mut self, store: Rc<dyn SnapshotStore>) -> Self {
        self.persistence = Some(Persistence {
            key: snapshot_key(&self.id),
            store,
        });
        if let Some(snapshot) = self.load_snapshot() {
            self.apply_snapshot(snapshot);
        }
        self
    }

    /// Poll identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Options in display order with their current counts.
    #[must_use]
    pub fn options(&self) -> &[PollOption] {
        &self.options
    }

    /// Option by id.
    #[must_use]
    pub fn option(&self, option_id: &str) -> Option<&PollOption> {
        self.options.iter().find(|option| option.id == option_id)
    }

    /// Selected option id.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Whether `option_id` is the voter's selection.
    #[must_use]
    pub fn is_selected(&self, option_id: &str) -> bool {
        self.selected.as_deref() == Some(option_id)
    }

    /// Whether the voter has voted.
    #[must_use]
    pub const fn has_voted(&self) -> bool {
        self.selected.is_some()
    }

    /// Voting state for the local voter.
    #[must_use]
    pub const fn voter_state(&self) -> VoterState {
        if self.has_voted() {
            VoterState::Voted
        } else {
            VoterState::NotVoted
        }
    }

    /// Revoting flag.
    #[must_use]
    pub const fn allows_revote(&self) -> bool {
        self.allow_revote
    }

    /// Show-before-vote flag.
    #[must_use]
    pub const fn shows_results_before_vote(&self) -> bool {
        self.show_results_before_vote
    }

    /// Read-only flag.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Sum of every option's count, saturating at `u64::MAX`.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.options
            .iter()
            .fold(0_u64, |total, option| total.saturating_add(option.votes))
    }

    /// Rounded share of the total for `option_id`; `0` for unknown ids.
    #[must_use]
    pub fn percentage_of(&self, option_id: &str) -> u32 {
        self.option(option_id)
            .map_or(0, |option| percentage(option.votes, self.total()))
    }

    /// Whether percentages should be rendered right now.
    #[must_use]
    pub const fn show_results(&self) -> bool {
        results_visible(self.show_results_before_vote, self.has_voted())
    }

    /// Whether option buttons accept input right now.
    #[must_use]
    pub const fn options_enabled(&self) -> bool {
        !self.read_only && (!self.has_voted() || self.allow_revote)
    }

    /// Storage key when persistence is attached.
    #[must_use]
    pub fn storage_key(&self) -> Option<&str> {
        self.persistence
            .as_ref()
            .map(|persistence| persistence.key.as_str())
    }

    /// Record a vote for `option_id`.
    ///
    /// # Errors
    /// Returns [`PollError::UnknownOption`] when the id is not part of the poll.
    pub fn vote(&mut self, option_id: &str) -> PollResult<VoteOutcome> {
        if self.read_only {
            return Ok(VoteOutcome::ReadOnly);
        }
        if self.has_voted() && !self.allow_revote {
            debug!(poll = %self.id, option = option_id, "repeat vote ignored");
            return Ok(VoteOutcome::AlreadyVoted);
        }
        let option = self
            .options
            .iter_mut()
            .find(|option| option.id == option_id)
            .ok_or_else(|| PollError::UnknownOption {
                option_id: option_id.to_string(),
            })?;
        option.votes = option.votes.saturating_add(1);
        self.selected = Some(option_id.to_string());
        debug!(poll = %self.id, option = option_id, "vote recorded");
        self.persist();
        Ok(VoteOutcome::Recorded)
    }

    /// Reset the poll, deferring to the host hook when one is installed.
    pub fn reset(&mut self) -> ResetOutcome {
        if let Some(hook) = self.on_reset.clone() {
            debug!(poll = %self.id, "reset delegated to host");
            hook();
            return ResetOutcome::Delegated;
        }
        self.restore_initial();
        ResetOutcome::Restored
    }

    /// Restore the initial counts, clear the selection and drop the snapshot.
    pub fn restore_initial(&mut self) {
        self.options.clone_from(&self.initial);
        self.selected = None;
        debug!(poll = %self.id, "poll restored to initial counts");
        if let Some(persistence) = &self.persistence {
            if let Err(err) = persistence.store.remove(&persistence.key) {
                warn!(key = %persistence.key, error = %err, "poll snapshot removal failed");
            }
        }
    }

    /// Current state in persisted form.
    #[must_use]
    pub fn snapshot(&self) -> PollSnapshot {
        PollSnapshot {
            selected: self.selected.clone(),
            results: self
                .options
                .iter()
                .map(|option| (option.id.clone(), option.votes))
                .collect(),
        }
    }

    fn load_snapshot(&self) -> Option<PollSnapshot> {
        let persistence = self.persistence.as_ref()?;
        let raw = match persistence.store.load(&persistence.key) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(key = %persistence.key, error = %err, "poll snapshot load failed");
                return None;
            }
        };
        match serde_json::from_str::<PollSnapshot>(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(key = %persistence.key, error = %err, "poll snapshot unreadable");
                None
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: PollSnapshot) {
        for option in &mut self.options {
            if let Some(votes) = snapshot.results.get(&option.id) {
                option.votes = *votes;
            }
        }
        self.selected = snapshot
            .selected
            .filter(|id| self.options.iter().any(|option| &option.id == id));
        debug!(poll = %self.id, voted = self.has_voted(), "poll snapshot restored");
    }

    fn persist(&self) {
        let Some(persistence) = &self.persistence else {
            return;
        };
        if let Err(err) = write_snapshot(persistence, &self.snapshot()) {
            warn!(key = %persistence.key, error = %err, "poll snapshot write failed");
        }
    }
}

fn write_snapshot(persistence: &Persistence, snapshot: &PollSnapshot) -> StorageResult<()> {
    let encoded = serde_json::to_string(snapshot).map_err(|source| {
        StorageError::Serialization {
            operation: "encode_poll_snapshot",
            source,
        }
    })?;
    persistence.store.save(&persistence.key, &encoded)
}

impl PartialEq for PollTally {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.options == other.options
            && self.selected == other.selected
            && self.allow_revote == other.allow_revote
            && self.show_results_before_vote == other.show_results_before_vote
            && self.read_only == other.read_only
    }
}

impl fmt::Debug for PollTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollTally")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("selected", &self.selected)
            .field("allow_revote", &self.allow_revote)
            .field("show_results_before_vote", &self.show_results_before_vote)
            .field("read_only", &self.read_only)
            .field("storage_key", &self.storage_key())
            .field("on_reset", &self.on_reset.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::Cell;

    fn demo() -> PollTally {
        PollTally::new(
            "demo",
            vec![
                PollOption::new("a", "Glassmorphism", 5),
                PollOption::new("b", "Bento grids", 2),
                PollOption::new("c", "Neo-brutalism", 2),
                PollOption::new("d", "Ultra minimal", 1),
            ],
        )
    }

    fn counts(poll: &PollTally) -> Vec<u64> {
        poll.options().iter().map(|option| option.votes).collect()
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(3, 11), 27);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(4, 4), 100);
    }

    #[test]
    fn visibility_is_an_or_of_flags() {
        assert!(!results_visible(false, false));
        assert!(results_visible(true, false));
        assert!(results_visible(false, true));
    }

    #[test]
    fn first_vote_wins_without_revote() -> anyhow::Result<()> {
        let mut poll = demo();
        assert_eq!(poll.total(), 10);
        assert_eq!(poll.vote("b")?, VoteOutcome::Recorded);
        assert_eq!(counts(&poll), vec![5, 3, 2, 1]);
        assert_eq!(poll.selected(), Some("b"));
        assert_eq!(poll.total(), 11);
        assert_eq!(poll.percentage_of("b"), 27);
        assert_eq!(poll.vote("a")?, VoteOutcome::AlreadyVoted);
        assert_eq!(counts(&poll), vec![5, 3, 2, 1]);
        assert_eq!(poll.selected(), Some("b"));
        Ok(())
    }

    #[test]
    fn revote_accumulates_without_decrement() -> anyhow::Result<()> {
        let mut poll = demo().with_revote(true);
        poll.vote("b")?;
        assert_eq!(poll.vote("a")?, VoteOutcome::Recorded);
        assert_eq!(counts(&poll), vec![6, 3, 2, 1]);
        assert_eq!(poll.selected(), Some("a"));
        assert!(poll.options_enabled());
        Ok(())
    }

    #[test]
    fn read_only_ignores_votes() -> anyhow::Result<()> {
        let mut poll = demo().with_read_only(true);
        assert_eq!(poll.vote("a")?, VoteOutcome::ReadOnly);
        assert_eq!(poll.voter_state(), VoterState::NotVoted);
        assert!(!poll.options_enabled());
        Ok(())
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut poll = demo();
        assert_eq!(
            poll.vote("zzz"),
            Err(PollError::UnknownOption {
                option_id: "zzz".to_string()
            })
        );
        assert!(!poll.has_voted());
        assert_eq!(poll.percentage_of("zzz"), 0);
    }

    #[test]
    fn reset_restores_initial_counts() -> anyhow::Result<()> {
        let mut poll = demo().with_revote(true);
        for id in ["a", "b", "b", "d"] {
            poll.vote(id)?;
        }
        assert_eq!(poll.reset(), ResetOutcome::Restored);
        assert_eq!(counts(&poll), vec![5, 2, 2, 1]);
        assert_eq!(poll.voter_state(), VoterState::NotVoted);
        Ok(())
    }

    #[test]
    fn reset_hook_takes_over() -> anyhow::Result<()> {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let mut poll = demo().with_reset_hook(move || seen.set(seen.get() + 1));
        poll.vote("c")?;
        assert_eq!(poll.reset(), ResetOutcome::Delegated);
        assert_eq!(calls.get(), 1);
        assert_eq!(poll.selected(), Some("c"));
        poll.restore_initial();
        assert!(!poll.has_voted());
        Ok(())
    }

    #[test]
    fn results_hidden_until_vote() -> anyhow::Result<()> {
        let mut poll = demo();
        assert!(!poll.show_results());
        poll.vote("a")?;
        assert!(poll.show_results());
        assert!(demo().with_results_before_vote(true).show_results());
        Ok(())
    }

    #[test]
    fn vote_writes_snapshot_and_reset_removes_it() -> anyhow::Result<()> {
        let store = Rc::new(MemoryStore::new());
        let mut poll = demo().persisted(store.clone());
        assert_eq!(poll.storage_key(), Some("quickpoll:demo"));
        poll.vote("d")?;
        let raw = store.get("quickpoll:demo").expect("snapshot written");
        let snapshot: PollSnapshot = serde_json::from_str(&raw)?;
        assert_eq!(snapshot.selected.as_deref(), Some("d"));
        assert_eq!(snapshot.results.get("d"), Some(&2));
        poll.reset();
        assert_eq!(store.get("quickpoll:demo"), None);
        Ok(())
    }

    #[test]
    fn snapshot_restores_prior_vote() -> anyhow::Result<()> {
        let store = Rc::new(MemoryStore::new());
        store.insert(
            "quickpoll:demo",
            r#"{"selected":"a","results":{"a":9,"b":2,"gone":4}}"#,
        );
        let mut poll = demo().persisted(store);
        assert_eq!(poll.voter_state(), VoterState::Voted);
        assert_eq!(counts(&poll), vec![9, 2, 2, 1]);
        assert_eq!(poll.vote("b")?, VoteOutcome::AlreadyVoted);
        Ok(())
    }

    #[test]
    fn corrupt_snapshot_is_treated_as_absent() {
        let store = Rc::new(MemoryStore::new());
        store.insert("quickpoll:demo", "{not json");
        let poll = demo().persisted(store);
        assert_eq!(poll.voter_state(), VoterState::NotVoted);
        assert_eq!(counts(&poll), vec![5, 2, 2, 1]);
    }

    #[test]
    fn huge_restored_counts_saturate_the_total() {
        let store = Rc::new(MemoryStore::new());
        store.insert(
            "quickpoll:demo",
            r#"{"selected":null,"results":{"a":18446744073709551615,"b":1}}"#,
        );
        let poll = demo().persisted(store);
        assert_eq!(poll.total(), u64::MAX);
        assert_eq!(poll.percentage_of("a"), 100);
        assert_eq!(poll.percentage_of("b"), 0);
    }

    #[test]
    fn snapshot_selection_for_unknown_option_is_dropped() {
        let store = Rc::new(MemoryStore::new());
        store.insert("quickpoll:demo", r#"{"selected":"gone","results":{}}"#);
        let poll = demo().persisted(store);
        assert!(!poll.has_voted());
    }
}
