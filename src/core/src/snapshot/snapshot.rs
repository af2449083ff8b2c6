use crate::nation::Nation;
use crate::r#match::{LiveMatchView, MatchResult};
use crate::timeline::Phase;
use crate::tournament::TournamentRef;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A match yet to kick off this cycle.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingMatch {
    pub match_id: String,
    pub home: String,
    pub away: String,
    pub kickoff_minute: u32,
}

/// The single read-only object handed to presentation layers. Everything in
/// it is derived from one timestamp; two snapshots for the same timestamp
/// are interchangeable.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub edition: u32,
    pub cycle_minute: f64,
    pub phase: Phase,
    pub tournament: TournamentRef,
    pub live_matches: Vec<LiveMatchView>,
    pub upcoming: Vec<UpcomingMatch>,
    pub recent_matches: Vec<MatchResult>,
    pub next_host: Option<Nation>,
    pub next_cycle_start: DateTime<Utc>,
}

impl Snapshot {
    pub fn is_match_live(&self, match_id: &str) -> bool {
        self.live_matches
            .iter()
            .any(|live| live.match_id == match_id)
    }
}
