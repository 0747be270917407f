#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! DOM-free state machines behind the shadeblocks widgets.
//!
//! [`wizard::StepNavigator`] sequences multi-step forms and
//! [`poll::PollTally`] counts votes. Both are single-threaded and owned by the
//! widget that renders them.

pub mod config;
pub mod error;
pub mod poll;
pub mod storage;
pub mod wizard;

pub use config::{PollConfig, PollOptionConfig, ProgressStyle, WizardConfig};
pub use error::{
    ConfigError, ConfigResult, PollError, PollResult, StorageError, StorageResult, WizardError,
    WizardResult,
};
pub use poll::{
    PollOption, PollSnapshot, PollTally, ResetOutcome, VoteOutcome, VoterState, percentage,
    results_visible, snapshot_key,
};
pub use storage::{MemoryStore, SnapshotStore};
pub use wizard::{Direction, MergeData, Step, StepContent, StepNavigator};
