use serde::Serialize;

pub const REGULATION_MINUTES: u8 = 90;
pub const EXTRA_TIME_MINUTES: u8 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSide {
    Home,
    Away,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalEvent {
    pub minute: u8,
    pub side: MatchSide,
    pub scorer_id: u32,
    pub scorer_name: String,
}

/// One kick per entry, in taking order, alternating home first.
#[derive(Debug, Clone, Serialize)]
pub struct PenaltyShootout {
    pub home_scored: u8,
    pub away_scored: u8,
    pub kicks: Vec<(MatchSide, bool)>,
}

/// The fully played record of one fixture. Every field is settled at
/// simulation time; live presentation is a pure filter over it.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub match_id: String,
    pub edition: u32,
    pub home: String,
    pub away: String,
    pub goals: Vec<GoalEvent>,
    pub home_score: u8,
    pub away_score: u8,
    pub extra_time: bool,
    pub shootout: Option<PenaltyShootout>,
    pub home_lineup: Vec<u32>,
    pub away_lineup: Vec<u32>,
    /// Nation code of the side advancing. `None` for a drawn group match.
    pub winner: Option<String>,
}

/// Score and events as they stood at a given match minute. Same result,
/// same minute, same view: nothing here touches randomness.
#[derive(Debug, Clone, Serialize)]
pub struct LiveMatchView {
    pub match_id: String,
    pub home: String,
    pub away: String,
    pub minute: u8,
    pub home_score: u8,
    pub away_score: u8,
    pub goals: Vec<GoalEvent>,
    pub in_extra_time: bool,
}

impl MatchResult {
    pub fn loser(&self) -> Option<String> {
        let winner = self.winner.as_deref()?;
        if winner == self.home {
            Some(self.away.clone())
        } else {
            Some(self.home.clone())
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    pub fn full_minutes(&self) -> u8 {
        if self.extra_time {
            EXTRA_TIME_MINUTES
        } else {
            REGULATION_MINUTES
        }
    }

    /// Replays the record up to `minute`, inclusive. Requesting a minute past
    /// the final whistle returns the completed view.
    pub fn live_view(&self, minute: f64) -> LiveMatchView {
        let clamped = minute.max(0.0).floor().min(self.full_minutes() as f64) as u8;

        let goals: Vec<GoalEvent> = self
            .goals
            .iter()
            .filter(|goal| goal.minute <= clamped)
            .cloned()
            .collect();

        let home_score = goals
            .iter()
            .filter(|goal| goal.side == MatchSide::Home)
            .count() as u8;
        let away_score = goals.len() as u8 - home_score;

        LiveMatchView {
            match_id: self.match_id.clone(),
            home: self.home.clone(),
            away: self.away.clone(),
            minute: clamped,
            home_score,
            away_score,
            goals,
            in_extra_time: clamped > REGULATION_MINUTES,
        }
    }
}
