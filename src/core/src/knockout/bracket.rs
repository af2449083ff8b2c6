use crate::r#match::{MatchEngine, MatchResult};
use crate::squad::SquadRef;
use serde::Serialize;
use std::collections::HashMap;

pub const KNOCKOUT_MATCHES: usize = 16;

/// Round of 16 seeding as (group, slot) pairs: slot 0 is the group winner,
/// slot 1 the runner-up. Winners of adjacent groups land in opposite halves
/// so they can only meet again in the final.
pub const ROUND_OF_16_PAIRINGS: [((usize, usize), (usize, usize)); 8] = [
    ((0, 0), (1, 1)),
    ((2, 0), (3, 1)),
    ((4, 0), (5, 1)),
    ((6, 0), (7, 1)),
    ((1, 0), (0, 1)),
    ((3, 0), (2, 1)),
    ((5, 0), (4, 1)),
    ((7, 0), (6, 1)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutRound {
    RoundOf16,
    Quarterfinal,
    Semifinal,
    ThirdPlace,
    Final,
}

impl KnockoutRound {
    pub fn from_match_id(match_id: &str) -> KnockoutRound {
        if match_id.starts_with("r16-") {
            KnockoutRound::RoundOf16
        } else if match_id.starts_with("qf-") {
            KnockoutRound::Quarterfinal
        } else if match_id.starts_with("sf-") {
            KnockoutRound::Semifinal
        } else if match_id == "third-place" {
            KnockoutRound::ThirdPlace
        } else if match_id == "final" {
            KnockoutRound::Final
        } else {
            panic!("unknown knockout match id: {}", match_id)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Knockout {
    pub edition: u32,
    pub round_of_16: Vec<MatchResult>,
    pub quarterfinals: Vec<MatchResult>,
    pub semifinals: Vec<MatchResult>,
    pub third_place: MatchResult,
    pub final_match: MatchResult,
}

impl Knockout {
    /// Plays the whole bracket from the 8 group qualifier pairs down to the
    /// final and the third-place match.
    pub fn simulate(
        qualifiers: &[(String, String)],
        squads: &HashMap<String, SquadRef>,
        edition: u32,
    ) -> Knockout {
        assert_eq!(qualifiers.len(), 8, "bracket needs 8 qualifier pairs");

        fn entrant(qualifiers: &[(String, String)], (group, slot): (usize, usize)) -> &str {
            if slot == 0 {
                &qualifiers[group].0
            } else {
                &qualifiers[group].1
            }
        }

        let play = |id: &str, home: &str, away: &str| -> MatchResult {
            MatchEngine::play(id, edition, &squads[home], &squads[away], true)
        };

        let round_of_16: Vec<MatchResult> = ROUND_OF_16_PAIRINGS
            .iter()
            .enumerate()
            .map(|(index, (home, away))| {
                play(
                    &format!("r16-{}", index + 1),
                    entrant(qualifiers, *home),
                    entrant(qualifiers, *away),
                )
            })
            .collect();

        let winner = |result: &MatchResult| -> String {
            result
                .winner
                .clone()
                .unwrap_or_else(|| panic!("knockout match {} unresolved", result.match_id))
        };

        let quarterfinals: Vec<MatchResult> = (0..4)
            .map(|index| {
                play(
                    &format!("qf-{}", index + 1),
                    &winner(&round_of_16[index * 2]),
                    &winner(&round_of_16[index * 2 + 1]),
                )
            })
            .collect();

        let semifinals: Vec<MatchResult> = (0..2)
            .map(|index| {
                play(
                    &format!("sf-{}", index + 1),
                    &winner(&quarterfinals[index * 2]),
                    &winner(&quarterfinals[index * 2 + 1]),
                )
            })
            .collect();

        let third_place = play(
            "third-place",
            &semifinals[0].loser().unwrap(),
            &semifinals[1].loser().unwrap(),
        );

        let final_match = play("final", &winner(&semifinals[0]), &winner(&semifinals[1]));

        Knockout {
            edition,
            round_of_16,
            quarterfinals,
            semifinals,
            third_place,
            final_match,
        }
    }

    pub fn champion(&self) -> &str {
        self.final_match.winner.as_deref().unwrap()
    }

    pub fn runner_up(&self) -> String {
        self.final_match.loser().unwrap()
    }

    pub fn third(&self) -> &str {
        self.third_place.winner.as_deref().unwrap()
    }

    pub fn fourth(&self) -> String {
        self.third_place.loser().unwrap()
    }

    pub fn all_matches(&self) -> Vec<&MatchResult> {
        self.round_of_16
            .iter()
            .chain(self.quarterfinals.iter())
            .chain(self.semifinals.iter())
            .chain(std::iter::once(&self.third_place))
            .chain(std::iter::once(&self.final_match))
            .collect()
    }

    pub fn semifinalists(&self) -> Vec<String> {
        vec![
            self.champion().to_string(),
            self.runner_up(),
            self.third().to_string(),
            self.fourth(),
        ]
    }
}
