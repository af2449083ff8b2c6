use crate::draw::DrawResult;
use crate::group::{GroupStage, StandingsRow};
use crate::knockout::Knockout;
use crate::nation::Nation;
use crate::r#match::MatchResult;
use crate::squad::{PlayerPosition, SquadRef};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerTournamentStats {
    pub player_id: u32,
    pub name: String,
    pub nation_code: String,
    pub position: PlayerPosition,
    pub rating: u8,
    pub goals: u8,
    pub appearances: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct TournamentAwards {
    pub golden_boot: PlayerTournamentStats,
    pub best_player: PlayerTournamentStats,
}

/// The complete, immutable record of one edition. Built once by the
/// simulator, cached by the world context, shared behind an `Arc`.
#[derive(Debug, Clone, Serialize)]
pub struct Tournament {
    pub edition: u32,
    pub host: Nation,
    pub draw: DrawResult,
    pub group_stage: GroupStage,
    pub knockout: Knockout,
    pub champion: String,
    pub runner_up: String,
    pub third: String,
    pub fourth: String,
    pub total_goals: u16,
    pub player_stats: Vec<PlayerTournamentStats>,
    pub awards: TournamentAwards,
    #[serde(skip)]
    pub squads: HashMap<String, SquadRef>,
}

pub type TournamentRef = Arc<Tournament>;

impl Tournament {
    pub fn all_matches(&self) -> Vec<&MatchResult> {
        self.group_stage
            .matches
            .iter()
            .chain(self.knockout.all_matches())
            .collect()
    }

    pub fn match_result(&self, match_id: &str) -> Option<&MatchResult> {
        self.all_matches()
            .into_iter()
            .find(|result| result.match_id == match_id)
    }

    /// Current table for one group, recomputed from its matches.
    pub fn group_standings(&self, group_index: usize) -> Vec<StandingsRow> {
        self.group_stage.standings(group_index)
    }

    pub fn qualified_codes(&self) -> Vec<&str> {
        self.draw.qualified_codes()
    }

    pub fn squad(&self, nation_code: &str) -> Option<&SquadRef> {
        self.squads.get(nation_code)
    }
}
