use std::collections::BTreeMap;

use crate::models::{Player, PlayerId, Team, TeamId};

/// Both teams plus every player mentioned so far in this generation.
///
/// Players are created on first reference and kept ordered by team and
/// shirt number.
#[derive(Debug, Clone)]
pub struct Roster {
    teams: [Team; 2],
    players: BTreeMap<PlayerId, Player>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    pub fn new() -> Self {
        Self { teams: [Team::new(TeamId::A), Team::new(TeamId::B)], players: BTreeMap::new() }
    }

    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[Self::slot(id)]
    }

    pub fn team_mut(&mut self, id: TeamId) -> &mut Team {
        &mut self.teams[Self::slot(id)]
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// The player with this id, created with a clean record if unseen.
    pub fn pick(&mut self, id: PlayerId) -> &mut Player {
        self.players.entry(id).or_insert_with(|| Player::new(id))
    }

    pub fn players(&self, team: TeamId) -> impl Iterator<Item = &Player> {
        self.players.values().filter(move |p| p.team() == team)
    }

    pub fn goals(&self, team: TeamId) -> u32 {
        self.players(team).map(|p| p.goals).sum()
    }

    fn slot(id: TeamId) -> usize {
        match id {
            TeamId::A => 0,
            TeamId::B => 1,
        }
    }
}
