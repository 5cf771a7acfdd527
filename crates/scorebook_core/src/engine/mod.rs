pub mod clock;
pub mod config;
pub mod event_log;
pub mod live_match;
pub mod policy; // soft-violation hooks
pub mod roster;
pub mod suspensions;


pub use clock::{ClockReading, ManualClock, TimeSource};
pub use config::{MatchConfig, MatchFormat, MatchRules};
pub use event_log::EventLog;
pub use live_match::Match;
pub use policy::{PermissivePolicy, PolicyHook, RecordingPolicy, StrictPolicy};
pub use roster::Roster;
pub use suspensions::{Suspension, SuspensionTracker};
