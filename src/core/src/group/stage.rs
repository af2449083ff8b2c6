use crate::draw::{DrawResult, GROUP_COUNT};
use crate::group::table::{compute_standings, top_two, StandingsRow};
use crate::r#match::{MatchEngine, MatchResult};
use crate::squad::SquadRef;
use serde::Serialize;
use std::collections::HashMap;

pub const MATCHDAYS: usize = 3;
pub const FIXTURES_PER_MATCHDAY: usize = 2;
pub const GROUP_STAGE_MATCHES: usize = 48;

/// Round-robin schedule by group position. Each nation plays every other
/// exactly once; position 0 is the draw's first-revealed nation.
pub const GROUP_FIXTURES: [[(usize, usize); FIXTURES_PER_MATCHDAY]; MATCHDAYS] = [
    [(0, 1), (2, 3)],
    [(0, 2), (1, 3)],
    [(0, 3), (1, 2)],
];

#[derive(Debug, Clone, Serialize)]
pub struct GroupStage {
    pub edition: u32,
    /// Nation codes per group, in draw order.
    pub groups: Vec<Vec<String>>,
    pub matches: Vec<MatchResult>,
}

impl GroupStage {
    /// Plays all 48 group matches in schedule order.
    pub fn simulate(
        draw: &DrawResult,
        squads: &HashMap<String, SquadRef>,
        edition: u32,
    ) -> GroupStage {
        let groups: Vec<Vec<String>> = draw
            .groups
            .iter()
            .map(|group| {
                group
                    .nations
                    .iter()
                    .map(|nation| nation.code.clone())
                    .collect()
            })
            .collect();

        let mut matches = Vec::with_capacity(GROUP_STAGE_MATCHES);
        for (matchday, fixtures) in GROUP_FIXTURES.iter().enumerate() {
            for (group_index, group) in groups.iter().enumerate() {
                for (fixture, (home_pos, away_pos)) in fixtures.iter().enumerate() {
                    let home_code = &group[*home_pos];
                    let away_code = &group[*away_pos];
                    let match_id = Self::match_id(group_index, matchday, fixture);

                    let home = &squads[home_code];
                    let away = &squads[away_code];
                    matches.push(MatchEngine::play(&match_id, edition, home, away, false));
                }
            }
        }

        GroupStage {
            edition,
            groups,
            matches,
        }
    }

    pub fn match_id(group_index: usize, matchday: usize, fixture: usize) -> String {
        let letter = (b'a' + group_index as u8) as char;
        format!("group-{}-md{}-{}", letter, matchday + 1, fixture + 1)
    }

    pub fn group_matches(&self, group_index: usize) -> Vec<&MatchResult> {
        let letter = (b'a' + group_index as u8) as char;
        let prefix = format!("group-{}-", letter);
        self.matches
            .iter()
            .filter(|result| result.match_id.starts_with(&prefix))
            .collect()
    }

    pub fn standings(&self, group_index: usize) -> Vec<StandingsRow> {
        let matches: Vec<MatchResult> = self
            .group_matches(group_index)
            .into_iter()
            .cloned()
            .collect();
        compute_standings(&self.groups[group_index], &matches)
    }

    /// Winner and runner-up of each group, indexed by group.
    pub fn qualifiers(&self) -> Vec<(String, String)> {
        (0..GROUP_COUNT)
            .map(|group_index| top_two(&self.standings(group_index)))
            .collect()
    }
}
