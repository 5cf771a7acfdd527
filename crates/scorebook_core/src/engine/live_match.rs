//! Live Match API
//!
//! [`Match`] is the single entry point for recording a match: every action
//! goes through a policy-checked method, lands in the event log at its
//! timestamp and updates the derived state (score, roster, suspensions).
//!
//! Derived state is always the fold of the log in timestamp order. Late
//! entries and retractions never patch it in place: they rebuild a whole
//! new generation by replaying the log through the same rule checks, and
//! swap it in only when the replay succeeded.

use std::fmt;

use tracing::{info, warn};

use super::{
    EventLog, MatchConfig, MatchRules, PolicyHook, Roster, StrictPolicy, Suspension,
    SuspensionTracker, TimeSource,
};
use crate::error::{MatchError, Result};
use crate::models::{
    Event, EventKind, Phase, PhaseKind, PhaseSequence, Player, PlayerId, Score, Team, TeamId,
    Timestamp,
};

/// One action to apply, in log order.
type Entry = (Timestamp, EventKind);

// ============================================
// MatchState: one generation of derived state
// ============================================

#[derive(Debug, Clone)]
struct MatchState {
    phases: PhaseSequence,
    roster: Roster,
    suspensions: SuspensionTracker,
    log: EventLog,
    rules: MatchRules,
}

impl MatchState {
    fn new(template: &PhaseSequence, rules: &MatchRules) -> Self {
        Self {
            phases: template.clone(),
            roster: Roster::new(),
            suspensions: SuspensionTracker::new(rules.suspension_minutes),
            log: EventLog::new(),
            rules: rules.clone(),
        }
    }

    /// Fresh generation built by applying `entries` in order, along with
    /// what became of each entry.
    fn replay(
        template: &PhaseSequence,
        rules: &MatchRules,
        entries: &[Entry],
        hook: &mut dyn PolicyHook,
    ) -> Result<(Self, Vec<Option<Event>>)> {
        let mut state = Self::new(template, rules);
        let mut outcomes = Vec::with_capacity(entries.len());
        for &(timestamp, kind) in entries {
            outcomes.push(state.apply(kind, timestamp, hook)?);
        }
        Ok((state, outcomes))
    }

    fn score(&self) -> Score {
        Score::new(self.roster.goals(TeamId::A), self.roster.goals(TeamId::B))
    }

    fn clock_timestamp(&self, clock: &dyn TimeSource) -> Timestamp {
        let reading = clock.peek();
        Timestamp::new(self.phases.current_phase().ordinal, reading.minute, reading.second)
    }

    /// Timestamp for an action. Without `at` it is the clock reading in the
    /// current phase, or in the phase about to start for a phase marker.
    fn resolve(
        &self,
        kind: EventKind,
        at: Option<Timestamp>,
        clock: &dyn TimeSource,
    ) -> Result<Timestamp> {
        if let Some(timestamp) = at {
            return Ok(timestamp);
        }
        let phase = match kind {
            EventKind::PhaseExpired { .. } => self
                .phases
                .preview_next_phase(self.score())
                .ok_or(MatchError::PhaseSequenceEnded)?,
            _ => self.phases.current_phase(),
        };
        let reading = clock.peek();
        Ok(Timestamp::new(phase.ordinal, reading.minute, reading.second))
    }

    /// Whether an action at `timestamp` lands before the end of the log.
    fn is_late(&self, timestamp: Timestamp) -> bool {
        self.log.as_slice().last().is_some_and(|last| timestamp < last.timestamp)
    }

    /// Record one action at `timestamp`. `Ok(None)` means the hook declined it.
    fn apply(
        &mut self,
        kind: EventKind,
        timestamp: Timestamp,
        hook: &mut dyn PolicyHook,
    ) -> Result<Option<Event>> {
        let Some(stamped) = self.phases.phase(timestamp.phase).copied() else {
            return Err(MatchError::UnknownPhase(timestamp.phase));
        };
        if let EventKind::PhaseExpired { .. } = kind {
            return self.phase_expired(timestamp).map(Some);
        }

        if !self.admit(hook)? || !self.check_rules(kind, &stamped, hook)? {
            return Ok(None);
        }
        if let EventKind::Suspension { player } = kind {
            self.suspensions.on_player_suspension(timestamp, player, &self.phases);
        }
        Ok(Some(self.register(timestamp, kind)))
    }

    /// Liveness gate shared by every action except phase markers.
    fn admit(&self, hook: &mut dyn PolicyHook) -> Result<bool> {
        let phase = self.phases.current_phase();
        if phase.is_live {
            return Ok(true);
        }
        hook.accept_event_during_non_live_phase(phase)
    }

    /// Timeouts are charged to `stamped`, the phase named by the timestamp.
    fn check_rules(
        &mut self,
        kind: EventKind,
        stamped: &Phase,
        hook: &mut dyn PolicyHook,
    ) -> Result<bool> {
        match kind {
            EventKind::Goal { player } | EventKind::PenaltyScored { player } => {
                self.roster.pick(player).goal(hook)
            }
            EventKind::Timeout { team } => {
                self.roster.team_mut(team).timeout(stamped, &self.rules, hook)
            }
            EventKind::Warning { player } => self.roster.pick(player).warning(hook),
            EventKind::Suspension { player } => {
                self.roster.pick(player).suspension(&self.rules, hook)
            }
            EventKind::Dismissal { player } => self.roster.pick(player).dismiss(hook),
            EventKind::PenaltyMissed { .. } | EventKind::PhaseExpired { .. } => Ok(true),
        }
    }

    fn phase_expired(&mut self, timestamp: Timestamp) -> Result<Event> {
        let was_live = self.phases.is_live();
        let score = self.score();
        self.phases.enter_next_phase(score)?;
        Ok(self.register(timestamp, EventKind::PhaseExpired { was_live }))
    }

    fn register(&mut self, timestamp: Timestamp, kind: EventKind) -> Event {
        let score = self.score();
        self.log.register(timestamp, kind, score)
    }
}

// ============================================
// Match
// ============================================

/// The running record of one match.
///
/// `P` settles soft rule breaches; see [`PolicyHook`]. The default
/// [`StrictPolicy`] turns each of them into an error.
pub struct Match<P: PolicyHook = StrictPolicy> {
    template: PhaseSequence,
    rules: MatchRules,
    clock: Box<dyn TimeSource>,
    policy: P,
    state: MatchState,
}

impl Match<StrictPolicy> {
    pub fn new(template: PhaseSequence, clock: impl TimeSource + 'static) -> Self {
        Self::with_policy(template, clock, StrictPolicy)
    }
}

impl<P: PolicyHook> Match<P> {
    pub fn with_policy(template: PhaseSequence, clock: impl TimeSource + 'static, policy: P) -> Self {
        Self::build(template, MatchRules::default(), Box::new(clock), policy)
    }

    pub fn from_config(
        config: &MatchConfig,
        clock: impl TimeSource + 'static,
        policy: P,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config.phase_sequence(), config.rules.clone(), Box::new(clock), policy))
    }

    fn build(template: PhaseSequence, rules: MatchRules, clock: Box<dyn TimeSource>, policy: P) -> Self {
        let state = MatchState::new(&template, &rules);
        Self { template, rules, clock, policy, state }
    }

    // =========================================================================
    // Recording
    // =========================================================================

    /// Each recording method returns the stored event, `None` when the
    /// policy declined it, or an error. Without `at` the event is stamped
    /// with the current phase and the clock reading.
    pub fn player_scored(&mut self, player: &str, at: Option<Timestamp>) -> Result<Option<Event>> {
        let player = player.parse()?;
        self.record(EventKind::Goal { player }, at)
    }

    pub fn timeout(&mut self, team: TeamId, at: Option<Timestamp>) -> Result<Option<Event>> {
        self.record(EventKind::Timeout { team }, at)
    }

    pub fn player_warned(&mut self, player: &str, at: Option<Timestamp>) -> Result<Option<Event>> {
        let player = player.parse()?;
        self.record(EventKind::Warning { player }, at)
    }

    pub fn player_suspended(&mut self, player: &str, at: Option<Timestamp>) -> Result<Option<Event>> {
        let player = player.parse()?;
        self.record(EventKind::Suspension { player }, at)
    }

    pub fn player_dismissed(&mut self, player: &str, at: Option<Timestamp>) -> Result<Option<Event>> {
        let player = player.parse()?;
        self.record(EventKind::Dismissal { player }, at)
    }

    pub fn penalty_scored(&mut self, player: &str, at: Option<Timestamp>) -> Result<Option<Event>> {
        let player = player.parse()?;
        self.record(EventKind::PenaltyScored { player }, at)
    }

    pub fn penalty_missed(&mut self, player: &str, at: Option<Timestamp>) -> Result<Option<Event>> {
        let player = player.parse()?;
        self.record(EventKind::PenaltyMissed { player }, at)
    }

    /// Close the current phase and enter the next one. Fails with
    /// [`MatchError::PhaseSequenceEnded`] once the match is over.
    pub fn phase_expired(&mut self, at: Option<Timestamp>) -> Result<Event> {
        let event = self.record(EventKind::PhaseExpired { was_live: false }, at)?;
        event.ok_or(MatchError::PhaseSequenceEnded)
    }

    fn record(&mut self, kind: EventKind, at: Option<Timestamp>) -> Result<Option<Event>> {
        let timestamp = self.state.resolve(kind, at, &*self.clock)?;
        if self.state.is_late(timestamp) {
            return self.record_late(kind, timestamp);
        }
        self.state.apply(kind, timestamp, &mut self.policy)
    }

    /// Record an action stamped before the end of the log.
    ///
    /// The action is checked against the match as it stood at its own
    /// timestamp, so everything after it is checked again too. Nothing
    /// changes unless that replay succeeds and the action is accepted.
    /// Existing events keep their ids unless the replay dropped some of
    /// them, in which case the log is renumbered as after a deletion.
    fn record_late(&mut self, kind: EventKind, timestamp: Timestamp) -> Result<Option<Event>> {
        let events = self.state.log.as_slice();
        let position = events.partition_point(|e| e.timestamp <= timestamp);
        let mut entries: Vec<Entry> = events.iter().map(|e| (e.timestamp, e.kind)).collect();
        entries.insert(position, (timestamp, kind));
        let mut ids: Vec<usize> = events.iter().map(|e| e.id).collect();
        let new_id = ids.len();
        ids.insert(position, new_id);

        let (mut state, outcomes) =
            MatchState::replay(&self.template, &self.rules, &entries, &mut self.policy)?;
        let Some(recorded) = outcomes.get(position).copied().flatten() else {
            return Ok(None);
        };

        let dropped = outcomes.iter().filter(|o| o.is_none()).count();
        let recorded = if dropped == 0 {
            state.log.relabel(&ids);
            Event { id: new_id, ..recorded }
        } else {
            warn!(dropped, timestamp = %timestamp, "late entry dropped later events");
            recorded
        };
        info!(id = recorded.id, timestamp = %timestamp, code = recorded.code(), "late entry recorded");
        self.state = state;
        Ok(Some(recorded))
    }

    // =========================================================================
    // Retraction
    // =========================================================================

    /// Remove an event and rebuild everything from the others.
    ///
    /// Surviving events are renumbered `0..N-1`, so ids held from before
    /// the call must not be reused. Breaches that show up during the replay
    /// are put to the match policy again.
    pub fn delete_event(&mut self, id: usize) -> Result<()> {
        let survivors = self.survivors(id)?;
        let (state, _) =
            MatchState::replay(&self.template, &self.rules, &survivors, &mut self.policy)?;
        self.swap_in(state, survivors.len(), id);
        Ok(())
    }

    /// Same as [`Match::delete_event`], with `hook` standing in for the
    /// match policy during the replay only.
    pub fn delete_event_with(&mut self, id: usize, hook: &mut dyn PolicyHook) -> Result<()> {
        let survivors = self.survivors(id)?;
        let (state, _) = MatchState::replay(&self.template, &self.rules, &survivors, hook)?;
        self.swap_in(state, survivors.len(), id);
        Ok(())
    }

    /// Replace the whole record with `events`, replayed in timestamp order
    /// under the match policy. Meant for restoring a log the integrator
    /// persisted earlier.
    pub fn restore(&mut self, events: &[Event]) -> Result<()> {
        let mut ordered = events.to_vec();
        ordered.sort_by_key(|e| e.timestamp);
        let entries: Vec<Entry> = ordered.iter().map(|e| (e.timestamp, e.kind)).collect();
        let (state, _) =
            MatchState::replay(&self.template, &self.rules, &entries, &mut self.policy)?;
        info!(events = state.log.len(), "match restored");
        self.state = state;
        Ok(())
    }

    fn survivors(&self, id: usize) -> Result<Vec<Entry>> {
        if !self.state.log.contains(id) {
            return Err(MatchError::EventNotFound(id));
        }
        Ok(self.state.log.without(id).iter().map(|e| (e.timestamp, e.kind)).collect())
    }

    fn swap_in(&mut self, state: MatchState, replayed: usize, deleted: usize) {
        let kept = state.log.len();
        if kept < replayed {
            warn!(deleted, dropped = replayed - kept, "replay dropped events");
        }
        info!(deleted, kept, score = %state.score(), "event deleted");
        self.state = state;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn score(&self) -> Score {
        self.state.score()
    }

    /// Snapshot of the players of `team` seen so far, by shirt number.
    pub fn players(&self, team: TeamId) -> Vec<Player> {
        self.state.roster.players(team).cloned().collect()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.state.roster.player(id)
    }

    pub fn team(&self, id: TeamId) -> &Team {
        self.state.roster.team(id)
    }

    pub fn current_phase(&self) -> &Phase {
        self.state.phases.current_phase()
    }

    /// The phase the match would move to if the current one ended now.
    pub fn next_phase(&self) -> Option<&Phase> {
        self.state.phases.preview_next_phase(self.score())
    }

    pub fn is_live(&self) -> bool {
        self.state.phases.is_live()
    }

    pub fn is_ended(&self) -> bool {
        self.state.phases.is_ended()
    }

    pub fn phases(&self) -> &PhaseSequence {
        &self.state.phases
    }

    pub fn period_duration(&self) -> Option<u32> {
        self.state.phases.duration_of(PhaseKind::FirstPeriod)
    }

    pub fn extra_period_duration(&self) -> Option<u32> {
        self.state.phases.duration_of(PhaseKind::FirstExtraPeriod)
    }

    /// Current phase plus the clock's minute and second.
    pub fn timestamp(&self) -> Timestamp {
        self.state.clock_timestamp(&*self.clock)
    }

    pub fn events(&self) -> &EventLog {
        &self.state.log
    }

    pub fn event(&self, index: usize) -> Option<&Event> {
        self.state.log.get(index)
    }

    pub fn suspensions(&self) -> &SuspensionTracker {
        &self.state.suspensions
    }

    /// Suspensions still running at the current clock reading.
    pub fn active_suspensions(&self) -> Vec<Suspension> {
        self.state.suspensions.active_at(self.timestamp()).copied().collect()
    }

    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }
}

impl<P: PolicyHook> std::ops::Index<usize> for Match<P> {
    type Output = Event;

    fn index(&self, index: usize) -> &Event {
        &self.state.log[index]
    }
}

impl<'a, P: PolicyHook> IntoIterator for &'a Match<P> {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.state.log.iter()
    }
}

impl<P: PolicyHook> fmt::Debug for Match<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Match")
            .field("phase", &self.current_phase().kind)
            .field("score", &self.score())
            .field("events", &self.state.log.len())
            .field("suspensions", &self.state.suspensions.len())
            .finish()
    }
}
