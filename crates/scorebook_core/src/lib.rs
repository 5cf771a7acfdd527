//! # scorebook_core - Handball Match Scorekeeping Engine
//!
//! Records what happens during a match (goals, timeouts, warnings,
//! suspensions, dismissals, penalties and the end of each phase) and keeps
//! the derived state consistent with the match rules.
//!
//! ## Features
//! - Championship and knockout phase sequences
//! - Timeout quotas and suspension expiry across phases
//! - Pluggable policy for soft rule breaches
//! - Event deletion by full replay of the remaining log
//!
//! ```
//! use scorebook_core::{Match, ManualClock, PhaseSequence, Score};
//!
//! let clock = std::sync::Arc::new(ManualClock::new());
//! let mut game = Match::new(PhaseSequence::championship(25), clock.clone());
//! game.phase_expired(None)?;
//! clock.set(0, 15);
//! game.player_scored("A1", None)?;
//! assert_eq!(game.score(), Score::new(1, 0));
//! # Ok::<(), scorebook_core::MatchError>(())
//! ```

pub mod engine;
pub mod error;
pub mod models;

pub use engine::{
    ManualClock, Match, MatchConfig, MatchFormat, MatchRules, PermissivePolicy, PolicyHook,
    RecordingPolicy, StrictPolicy, Suspension, TimeSource,
};
pub use error::{MatchError, Result, Violation};
pub use models::{
    Event, EventKind, Phase, PhaseKind, PhaseSequence, Player, PlayerId, Score, TeamId, Timestamp,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
