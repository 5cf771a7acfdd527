pub mod events;
pub mod phase;
pub mod player;
pub mod team;
pub mod timestamp;

pub use events::{Event, EventKind};
pub use phase::{Phase, PhaseKind, PhaseSequence, TransitionPolicy};
pub use player::{Player, PlayerId};
pub use team::{Team, TeamId};
pub use timestamp::{Score, Timestamp};
