//! Policy hooks: how the engine settles soft rule breaches.
//!
//! Every breach is put to the hook before anything is recorded. The hook
//! answers `Ok(true)` to record the action anyway, `Ok(false)` to discard
//! it, or an error to abort the call. The provided methods all fail with
//! the matching [`Violation`], so an empty `impl` is the strict policy and
//! custom hooks only override the cases they want to relax.

use tracing::warn;

use crate::error::{Result, Violation};
use crate::models::{Phase, Player, TeamId};

pub trait PolicyHook {
    fn accept_unexpected_timeout(&mut self, team: TeamId, phase: &Phase) -> Result<bool> {
        Err(Violation::UnexpectedTimeout { team, phase: phase.kind }.into())
    }

    fn accept_additional_timeout_in_phase(&mut self, team: TeamId, phase: &Phase) -> Result<bool> {
        Err(Violation::ExtraTimeoutInPhase { team, phase: phase.kind }.into())
    }

    fn accept_additional_timeout_in_match(&mut self, team: TeamId) -> Result<bool> {
        Err(Violation::ExtraTimeoutInMatch { team }.into())
    }

    fn accept_goal_by_dismissed_player(&mut self, player: &Player) -> Result<bool> {
        Err(Violation::GoalByDismissedPlayer { player: player.id }.into())
    }

    fn accept_warning_for_dismissed_player(&mut self, player: &Player) -> Result<bool> {
        Err(Violation::WarningForDismissedPlayer { player: player.id }.into())
    }

    fn accept_warning_for_warned_player(&mut self, player: &Player) -> Result<bool> {
        Err(Violation::WarningForWarnedPlayer { player: player.id }.into())
    }

    fn accept_suspension_for_dismissed_player(&mut self, player: &Player) -> Result<bool> {
        Err(Violation::SuspensionForDismissedPlayer { player: player.id }.into())
    }

    fn accept_dismissal_for_dismissed_player(&mut self, player: &Player) -> Result<bool> {
        Err(Violation::DismissalForDismissedPlayer { player: player.id }.into())
    }

    fn accept_event_during_non_live_phase(&mut self, phase: &Phase) -> Result<bool> {
        Err(Violation::EventDuringNonLivePhase { phase: phase.kind }.into())
    }
}

impl<H: PolicyHook + ?Sized> PolicyHook for &mut H {
    fn accept_unexpected_timeout(&mut self, team: TeamId, phase: &Phase) -> Result<bool> {
        (**self).accept_unexpected_timeout(team, phase)
    }

    fn accept_additional_timeout_in_phase(&mut self, team: TeamId, phase: &Phase) -> Result<bool> {
        (**self).accept_additional_timeout_in_phase(team, phase)
    }

    fn accept_additional_timeout_in_match(&mut self, team: TeamId) -> Result<bool> {
        (**self).accept_additional_timeout_in_match(team)
    }

    fn accept_goal_by_dismissed_player(&mut self, player: &Player) -> Result<bool> {
        (**self).accept_goal_by_dismissed_player(player)
    }

    fn accept_warning_for_dismissed_player(&mut self, player: &Player) -> Result<bool> {
        (**self).accept_warning_for_dismissed_player(player)
    }

    fn accept_warning_for_warned_player(&mut self, player: &Player) -> Result<bool> {
        (**self).accept_warning_for_warned_player(player)
    }

    fn accept_suspension_for_dismissed_player(&mut self, player: &Player) -> Result<bool> {
        (**self).accept_suspension_for_dismissed_player(player)
    }

    fn accept_dismissal_for_dismissed_player(&mut self, player: &Player) -> Result<bool> {
        (**self).accept_dismissal_for_dismissed_player(player)
    }

    fn accept_event_during_non_live_phase(&mut self, phase: &Phase) -> Result<bool> {
        (**self).accept_event_during_non_live_phase(phase)
    }
}

/// Fails on every breach. The default for deterministic, programmatic use.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictPolicy;

impl PolicyHook for StrictPolicy {}

/// Records everything, whatever the rules say.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissivePolicy;

impl PolicyHook for PermissivePolicy {
    fn accept_unexpected_timeout(&mut self, _team: TeamId, _phase: &Phase) -> Result<bool> {
        Ok(true)
    }

    fn accept_additional_timeout_in_phase(&mut self, _team: TeamId, _phase: &Phase) -> Result<bool> {
        Ok(true)
    }

    fn accept_additional_timeout_in_match(&mut self, _team: TeamId) -> Result<bool> {
        Ok(true)
    }

    fn accept_goal_by_dismissed_player(&mut self, _player: &Player) -> Result<bool> {
        Ok(true)
    }

    fn accept_warning_for_dismissed_player(&mut self, _player: &Player) -> Result<bool> {
        Ok(true)
    }

    fn accept_warning_for_warned_player(&mut self, _player: &Player) -> Result<bool> {
        Ok(true)
    }

    fn accept_suspension_for_dismissed_player(&mut self, _player: &Player) -> Result<bool> {
        Ok(true)
    }

    fn accept_dismissal_for_dismissed_player(&mut self, _player: &Player) -> Result<bool> {
        Ok(true)
    }

    fn accept_event_during_non_live_phase(&mut self, _phase: &Phase) -> Result<bool> {
        Ok(true)
    }
}

/// Collects every breach it is asked about and answers with a fixed
/// verdict. Meant for surfacing replay anomalies to an operator after an
/// event has been deleted.
#[derive(Debug, Clone, Default)]
pub struct RecordingPolicy {
    accept: bool,
    violations: Vec<Violation>,
}

impl RecordingPolicy {
    pub fn accepting() -> Self {
        Self { accept: true, violations: Vec::new() }
    }

    pub fn rejecting() -> Self {
        Self { accept: false, violations: Vec::new() }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn take_violations(&mut self) -> Vec<Violation> {
        std::mem::take(&mut self.violations)
    }

    /// How many recorded breaches satisfy `pred`.
    pub fn count(&self, pred: impl Fn(&Violation) -> bool) -> usize {
        self.violations.iter().filter(|v| pred(v)).count()
    }

    fn record(&mut self, violation: Violation) -> Result<bool> {
        warn!(%violation, accepted = self.accept, "rule violation");
        self.violations.push(violation);
        Ok(self.accept)
    }
}

impl PolicyHook for RecordingPolicy {
    fn accept_unexpected_timeout(&mut self, team: TeamId, phase: &Phase) -> Result<bool> {
        self.record(Violation::UnexpectedTimeout { team, phase: phase.kind })
    }

    fn accept_additional_timeout_in_phase(&mut self, team: TeamId, phase: &Phase) -> Result<bool> {
        self.record(Violation::ExtraTimeoutInPhase { team, phase: phase.kind })
    }

    fn accept_additional_timeout_in_match(&mut self, team: TeamId) -> Result<bool> {
        self.record(Violation::ExtraTimeoutInMatch { team })
    }

    fn accept_goal_by_dismissed_player(&mut self, player: &Player) -> Result<bool> {
        self.record(Violation::GoalByDismissedPlayer { player: player.id })
    }

    fn accept_warning_for_dismissed_player(&mut self, player: &Player) -> Result<bool> {
        self.record(Violation::WarningForDismissedPlayer { player: player.id })
    }

    fn accept_warning_for_warned_player(&mut self, player: &Player) -> Result<bool> {
        self.record(Violation::WarningForWarnedPlayer { player: player.id })
    }

    fn accept_suspension_for_dismissed_player(&mut self, player: &Player) -> Result<bool> {
        self.record(Violation::SuspensionForDismissedPlayer { player: player.id })
    }

    fn accept_dismissal_for_dismissed_player(&mut self, player: &Player) -> Result<bool> {
        self.record(Violation::DismissalForDismissedPlayer { player: player.id })
    }

    fn accept_event_during_non_live_phase(&mut self, phase: &Phase) -> Result<bool> {
        self.record(Violation::EventDuringNonLivePhase { phase: phase.kind })
    }
}
