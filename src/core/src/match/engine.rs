use crate::r#match::result::{
    GoalEvent, MatchResult, MatchSide, PenaltyShootout, EXTRA_TIME_MINUTES, REGULATION_MINUTES,
};
use crate::rng::DeterministicRng;
use crate::squad::{Squad, SquadPlayer};

/// Chance of any goal in a given simulated minute.
const BASE_GOAL_CHANCE: f64 = 0.045;
/// Added per-minute chance once legs tire, from minute 75 on.
const LATE_GAME_BONUS: f64 = 0.012;
const LATE_GAME_FROM: u8 = 75;

const PENALTY_CONVERSION: f64 = 0.76;
const SHOOTOUT_REGULAR_ROUNDS: u8 = 5;
/// Sudden death never runs past this many rounds; the stronger side is then
/// awarded the decisive kick so a winner always exists.
const SHOOTOUT_MAX_ROUNDS: u8 = 20;

pub struct MatchEngine;

impl MatchEngine {
    /// Plays a fixture to completion. Group matches may end drawn; knockout
    /// matches go to extra time and, if still level, a penalty shootout.
    pub fn play(
        match_id: &str,
        edition: u32,
        home: &Squad,
        away: &Squad,
        knockout: bool,
    ) -> MatchResult {
        let mut rng =
            DeterministicRng::for_scope(&["match", &edition.to_string(), match_id]);

        let home_eleven = home.starting_eleven();
        let away_eleven = away.starting_eleven();
        let home_strength = Self::side_strength(&home_eleven);
        let away_strength = Self::side_strength(&away_eleven);

        let mut goals: Vec<GoalEvent> = Vec::new();
        Self::play_minutes(
            1,
            REGULATION_MINUTES,
            home_strength,
            away_strength,
            &home_eleven,
            &away_eleven,
            &mut goals,
            &mut rng,
        );

        let mut extra_time = false;
        let mut shootout = None;

        if knockout && Self::score_of(&goals, MatchSide::Home) == Self::score_of(&goals, MatchSide::Away)
        {
            extra_time = true;
            Self::play_minutes(
                REGULATION_MINUTES + 1,
                EXTRA_TIME_MINUTES,
                home_strength,
                away_strength,
                &home_eleven,
                &away_eleven,
                &mut goals,
                &mut rng,
            );

            if Self::score_of(&goals, MatchSide::Home) == Self::score_of(&goals, MatchSide::Away) {
                shootout = Some(Self::shootout(home_strength, away_strength, &mut rng));
            }
        }

        let home_score = Self::score_of(&goals, MatchSide::Home);
        let away_score = Self::score_of(&goals, MatchSide::Away);

        let winner = match home_score.cmp(&away_score) {
            std::cmp::Ordering::Greater => Some(home.nation_code.clone()),
            std::cmp::Ordering::Less => Some(away.nation_code.clone()),
            std::cmp::Ordering::Equal => shootout.as_ref().map(|kicks: &PenaltyShootout| {
                if kicks.home_scored > kicks.away_scored {
                    home.nation_code.clone()
                } else {
                    away.nation_code.clone()
                }
            }),
        };

        MatchResult {
            match_id: match_id.to_string(),
            edition,
            home: home.nation_code.clone(),
            away: away.nation_code.clone(),
            goals,
            home_score,
            away_score,
            extra_time,
            shootout,
            home_lineup: home_eleven.iter().map(|player| player.id).collect(),
            away_lineup: away_eleven.iter().map(|player| player.id).collect(),
            winner,
        }
    }

    fn side_strength(eleven: &[&SquadPlayer]) -> f64 {
        let total: f64 = eleven.iter().map(|player| player.rating as f64).sum();
        total / eleven.len() as f64
    }

    #[allow(clippy::too_many_arguments)]
    fn play_minutes(
        from: u8,
        to: u8,
        home_strength: f64,
        away_strength: f64,
        home_eleven: &[&SquadPlayer],
        away_eleven: &[&SquadPlayer],
        goals: &mut Vec<GoalEvent>,
        rng: &mut DeterministicRng,
    ) {
        let stronger = home_strength.max(away_strength);
        let weaker = home_strength.min(away_strength).max(1.0);

        for minute in from..=to {
            // Mismatched sides produce more goals overall
            let mut chance = BASE_GOAL_CHANCE * (stronger / weaker);
            if minute >= LATE_GAME_FROM {
                chance += LATE_GAME_BONUS;
            }

            if !rng.next_bool(chance) {
                continue;
            }

            // Quality gap dominates who converts the chance
            let side_weights = [home_strength.powi(4), away_strength.powi(4)];
            let (side, eleven) = if rng.weighted_index(&side_weights) == 0 {
                (MatchSide::Home, home_eleven)
            } else {
                (MatchSide::Away, away_eleven)
            };

            let scorer = Self::pick_scorer(eleven, rng);
            goals.push(GoalEvent {
                minute,
                side,
                scorer_id: scorer.id,
                scorer_name: scorer.name.clone(),
            });
        }
    }

    fn pick_scorer<'p>(eleven: &[&'p SquadPlayer], rng: &mut DeterministicRng) -> &'p SquadPlayer {
        let weights: Vec<f64> = eleven
            .iter()
            .map(|player| player.position.scoring_weight() * (player.rating as f64).powi(2))
            .collect();
        eleven[rng.weighted_index(&weights)]
    }

    fn shootout(
        home_strength: f64,
        away_strength: f64,
        rng: &mut DeterministicRng,
    ) -> PenaltyShootout {
        let mut kicks: Vec<(MatchSide, bool)> = Vec::new();
        let mut home_scored = 0u8;
        let mut away_scored = 0u8;

        for round in 0..SHOOTOUT_MAX_ROUNDS {
            // Every kick converts at the same fixed rate
            let home_hit = rng.next_bool(PENALTY_CONVERSION);
            kicks.push((MatchSide::Home, home_hit));
            if home_hit {
                home_scored += 1;
            }

            if round < SHOOTOUT_REGULAR_ROUNDS
                && Self::settled_early(home_scored, away_scored, round + 1, round)
            {
                break;
            }

            let away_hit = rng.next_bool(PENALTY_CONVERSION);
            kicks.push((MatchSide::Away, away_hit));
            if away_hit {
                away_scored += 1;
            }

            if round < SHOOTOUT_REGULAR_ROUNDS {
                if Self::settled_early(home_scored, away_scored, round + 1, round + 1) {
                    break;
                }
            } else if home_scored != away_scored {
                // Sudden death resolves on the first uneven round
                break;
            }
        }

        if home_scored == away_scored {
            // Rounds exhausted level: the stronger side converts the decisive
            // kick, home on equal strength
            if home_strength >= away_strength {
                kicks.push((MatchSide::Home, true));
                home_scored += 1;
            } else {
                kicks.push((MatchSide::Away, true));
                away_scored += 1;
            }
        }

        PenaltyShootout {
            home_scored,
            away_scored,
            kicks,
        }
    }

    /// True when the trailing side can no longer equalize within the regular
    /// five rounds, given how many kicks each side has already taken.
    fn settled_early(home_scored: u8, away_scored: u8, home_taken: u8, away_taken: u8) -> bool {
        let home_left = (SHOOTOUT_REGULAR_ROUNDS - home_taken) as i16;
        let away_left = (SHOOTOUT_REGULAR_ROUNDS - away_taken) as i16;
        let home = home_scored as i16;
        let away = away_scored as i16;

        home > away + away_left || away > home + home_left
    }

    fn score_of(goals: &[GoalEvent], side: MatchSide) -> u8 {
        goals.iter().filter(|goal| goal.side == side).count() as u8
    }
}
