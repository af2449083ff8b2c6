use serde::Serialize;
use std::sync::Arc;

/// Outfield role of a squad slot. Drives scorer weighting and the banded
/// rating/age generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerPosition {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl PlayerPosition {
    /// Relative chance of being credited with a goal. Forwards dominate,
    /// goalkeepers essentially never score.
    pub fn scoring_weight(&self) -> f64 {
        match self {
            PlayerPosition::Goalkeeper => 0.05,
            PlayerPosition::Defender => 1.0,
            PlayerPosition::Midfielder => 3.0,
            PlayerPosition::Forward => 8.0,
        }
    }

    pub fn short_code(&self) -> &'static str {
        match self {
            PlayerPosition::Goalkeeper => "GK",
            PlayerPosition::Defender => "DF",
            PlayerPosition::Midfielder => "MF",
            PlayerPosition::Forward => "FW",
        }
    }
}

/// Fixed 25-man squad shape: position group and how many slots it owns.
pub const SQUAD_SHAPE: [(PlayerPosition, usize); 4] = [
    (PlayerPosition::Goalkeeper, 3),
    (PlayerPosition::Defender, 8),
    (PlayerPosition::Midfielder, 8),
    (PlayerPosition::Forward, 6),
];

pub const SQUAD_SIZE: usize = 25;

#[derive(Debug, Clone, Serialize)]
pub struct SquadPlayer {
    pub id: u32,
    pub name: String,
    pub position: PlayerPosition,
    pub rating: u8,
    pub age: u8,
}

/// One nation's roster for one edition. Immutable once generated; editions
/// after the first are evolved copies of the previous edition's squad.
#[derive(Debug, Clone, Serialize)]
pub struct Squad {
    pub nation_code: String,
    pub edition: u32,
    pub players: Vec<SquadPlayer>,
}

impl Squad {
    /// Deterministic starting XI in a 1-4-4-2 shape: within each position
    /// group the highest-rated players start, earlier slots breaking ties.
    pub fn starting_eleven(&self) -> Vec<&SquadPlayer> {
        let mut eleven = Vec::with_capacity(11);
        eleven.extend(self.best_of(PlayerPosition::Goalkeeper, 1));
        eleven.extend(self.best_of(PlayerPosition::Defender, 4));
        eleven.extend(self.best_of(PlayerPosition::Midfielder, 4));
        eleven.extend(self.best_of(PlayerPosition::Forward, 2));
        eleven
    }

    fn best_of(&self, position: PlayerPosition, count: usize) -> Vec<&SquadPlayer> {
        let mut group: Vec<&SquadPlayer> = self
            .players
            .iter()
            .filter(|player| player.position == position)
            .collect();

        // Stable sort keeps slot order between equally rated players
        group.sort_by(|a, b| b.rating.cmp(&a.rating));
        group.truncate(count);
        group
    }

    pub fn player(&self, id: u32) -> Option<&SquadPlayer> {
        self.players.iter().find(|player| player.id == id)
    }
}

/// Shared, cheaply clonable handle used by caches.
pub type SquadRef = Arc<Squad>;
