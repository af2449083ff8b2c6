pub mod context;
pub mod draw;
pub mod group;
pub mod host;
pub mod knockout;
pub mod r#match;
pub mod nation;
pub mod rng;
pub mod snapshot;
pub mod squad;
pub mod timeline;
pub mod tournament;

pub mod utils;

// Re-export nation items
pub use nation::{Confederation, Culture, Nation};

// Re-export squad items
pub use squad::{
    NameDirectory, NamePool, PlayerPosition, RosterGenerator, Squad, SquadPlayer, SquadRef,
    SQUAD_SHAPE, SQUAD_SIZE,
};

// Re-export engine items
pub use draw::{DrawEngine, DrawResult, GroupDraw, PlacementReason, RevealStep};
pub use group::{compute_standings, GroupStage, StandingsRow};
pub use host::HostSelector;
pub use knockout::{Knockout, KnockoutRound};
pub use r#match::{
    GoalEvent, LiveMatchView, MatchEngine, MatchResult, MatchSide, PenaltyShootout,
};
pub use tournament::{
    PlayerTournamentStats, Tournament, TournamentAwards, TournamentRef, TournamentSimulator,
};

// Re-export timeline & assembly items
pub use context::{Clock, FixedClock, SystemClock, WorldContext, EPOCH};
pub use rng::{composite_seed, DeterministicRng};
pub use snapshot::{Snapshot, UpcomingMatch};
pub use timeline::{MatchSlot, Phase, TimelineMapper, CYCLE_MINUTES};

pub use utils::*;
