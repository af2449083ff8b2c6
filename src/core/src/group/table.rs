use crate::r#match::{MatchResult, MatchSide};
use serde::Serialize;
use std::cmp::Ordering;

pub const WIN_POINTS: u8 = 3;
pub const DRAW_POINTS: u8 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct StandingsRow {
    pub nation_code: String,
    pub played: u8,
    pub won: u8,
    pub drawn: u8,
    pub lost: u8,
    pub goals_for: u8,
    pub goals_against: u8,
    pub points: u8,
}

impl StandingsRow {
    fn new(nation_code: &str) -> Self {
        StandingsRow {
            nation_code: nation_code.to_string(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }

    pub fn goal_difference(&self) -> i16 {
        self.goals_for as i16 - self.goals_against as i16
    }

    fn record(&mut self, scored: u8, conceded: u8) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.won += 1;
                self.points += WIN_POINTS;
            }
            Ordering::Equal => {
                self.drawn += 1;
                self.points += DRAW_POINTS;
            }
            Ordering::Less => self.lost += 1,
        }
    }
}

/// Builds the table for one group from its played matches. Ranking:
/// points, then goal difference, then goals scored, then the head-to-head
/// result between the tied pair. A tie surviving all of that keeps the
/// nations in draw order (the sort is stable).
pub fn compute_standings(nation_codes: &[String], matches: &[MatchResult]) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = nation_codes
        .iter()
        .map(|code| StandingsRow::new(code))
        .collect();

    for result in matches {
        if let Some(row) = rows.iter_mut().find(|row| row.nation_code == result.home) {
            row.record(result.home_score, result.away_score);
        }
        if let Some(row) = rows.iter_mut().find(|row| row.nation_code == result.away) {
            row.record(result.away_score, result.home_score);
        }
    }

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference().cmp(&a.goal_difference()))
            .then(b.goals_for.cmp(&a.goals_for))
            .then_with(|| head_to_head(&a.nation_code, &b.nation_code, matches))
    });

    rows
}

/// Orders `a` before `b` when `a` won their meeting; equal on a draw or when
/// the pair never met in the given matches.
fn head_to_head(a: &str, b: &str, matches: &[MatchResult]) -> Ordering {
    let meeting = matches.iter().find(|result| {
        (result.home == a && result.away == b) || (result.home == b && result.away == a)
    });

    match meeting.and_then(|result| result.winner.as_deref()) {
        Some(winner) if winner == a => Ordering::Less,
        Some(winner) if winner == b => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

pub fn top_two(standings: &[StandingsRow]) -> (String, String) {
    (
        standings[0].nation_code.clone(),
        standings[1].nation_code.clone(),
    )
}
