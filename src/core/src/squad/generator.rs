use crate::nation::Nation;
use crate::rng::{DeterministicRng, composite_seed};
use crate::squad::names::NameDirectory;
use crate::squad::player::{PlayerPosition, SQUAD_SHAPE, SQUAD_SIZE, Squad, SquadPlayer, SquadRef};
use log::debug;
use std::collections::HashMap;
use std::sync::Mutex;

/// Real-world years that pass between two editions.
pub const YEARS_PER_EDITION: u8 = 4;

pub const RATING_FLOOR: u8 = 25;
pub const RATING_CEILING: u8 = 99;

/// Nations below this rating may carry a single standout player.
const OUTLIER_NATION_RATING: u8 = 78;
const OUTLIER_CHANCE: f64 = 0.6;

/// Builds and evolves 25-man squads. Squads are memoized by
/// (nation, edition); edition N is always derived from edition N-1, walked
/// iteratively from the base edition so the cost stays linear.
pub struct RosterGenerator {
    names: NameDirectory,
    cache: Mutex<HashMap<(String, u32), SquadRef>>,
}

impl RosterGenerator {
    pub fn new(names: NameDirectory) -> Self {
        RosterGenerator {
            names,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the squad for (nation, edition), computing and caching every
    /// missing edition up to it. Entries are written exactly once.
    pub fn squad(&self, nation: &Nation, edition: u32) -> SquadRef {
        let mut cache = self.cache.lock().expect("squad cache poisoned");

        for target in 0..=edition {
            let key = (nation.code.clone(), target);
            if cache.contains_key(&key) {
                continue;
            }

            let squad = if target == 0 {
                self.base_squad(nation)
            } else {
                let previous = cache[&(nation.code.clone(), target - 1)].clone();
                self.evolve_squad(nation, &previous, target)
            };

            cache.insert(key, SquadRef::new(squad));
        }

        cache[&(nation.code.clone(), edition)].clone()
    }

    /// Test hook: forget every generated squad.
    pub fn clear(&self) {
        self.cache.lock().expect("squad cache poisoned").clear();
    }

    fn base_squad(&self, nation: &Nation) -> Squad {
        debug!("generating base squad for {}", nation.code);

        let mut rng = DeterministicRng::for_scope(&["squad", &nation.code, "base"]);
        let mut players = Vec::with_capacity(SQUAD_SIZE);

        let mut slot = 0usize;
        for (position, count) in SQUAD_SHAPE {
            for group_slot in 0..count {
                let name = self.names.generate(nation.culture, &mut rng);
                let rating = Self::base_rating(nation, group_slot, &mut rng);
                let (age_min, age_max) = Self::age_band(position, group_slot);
                let age = rng.next_int(age_min, age_max) as u8;

                players.push(SquadPlayer {
                    id: Self::player_id(&nation.code, slot, 0),
                    name,
                    position,
                    rating,
                    age,
                });
                slot += 1;
            }
        }

        // Weak nations occasionally produce one standout player
        if nation.rating < OUTLIER_NATION_RATING && rng.next_bool(OUTLIER_CHANCE) {
            let outlier_slot = rng.next_int(0, players.len() as i32 - 1) as usize;
            let boosted = (nation.rating as i32 + rng.next_int(8, 15))
                .clamp(RATING_FLOOR as i32, RATING_CEILING as i32) as u8;
            let player = &mut players[outlier_slot];
            player.rating = player.rating.max(boosted);
        }

        debug_assert_eq!(players.len(), SQUAD_SIZE);

        Squad {
            nation_code: nation.code.clone(),
            edition: 0,
            players,
        }
    }

    fn evolve_squad(&self, nation: &Nation, previous: &Squad, edition: u32) -> Squad {
        let mut rng =
            DeterministicRng::for_scope(&["evolution", &nation.code, &edition.to_string()]);
        let mut players = Vec::with_capacity(previous.players.len());

        for (slot, veteran) in previous.players.iter().enumerate() {
            let aged = veteran.age + YEARS_PER_EDITION;

            if rng.next_bool(Self::retirement_probability(aged)) {
                players.push(self.rookie(nation, veteran.position, slot, edition, &mut rng));
            } else {
                let drift = Self::rating_drift(aged, &mut rng);
                let rating = (veteran.rating as i32 + drift)
                    .clamp(RATING_FLOOR as i32, RATING_CEILING as i32)
                    as u8;

                players.push(SquadPlayer {
                    id: veteran.id,
                    name: veteran.name.clone(),
                    position: veteran.position,
                    rating,
                    age: aged,
                });
            }
        }

        Squad {
            nation_code: nation.code.clone(),
            edition,
            players,
        }
    }

    fn rookie(
        &self,
        nation: &Nation,
        position: PlayerPosition,
        slot: usize,
        edition: u32,
        rng: &mut DeterministicRng,
    ) -> SquadPlayer {
        let name = self.names.generate(nation.culture, rng);
        let age = rng.next_int(18, 23) as u8;
        // Newcomers start below the nation's current level
        let rating = (nation.rating as i32 - rng.next_int(4, 14))
            .clamp(RATING_FLOOR as i32, RATING_CEILING as i32) as u8;

        SquadPlayer {
            id: Self::player_id(&nation.code, slot, edition),
            name,
            position,
            rating,
            age,
        }
    }

    fn base_rating(nation: &Nation, group_slot: usize, rng: &mut DeterministicRng) -> u8 {
        // Earlier slots within a position group are the first-choice players
        let slot_penalty = group_slot as i32 * 2;
        let jitter = rng.next_int(-3, 2);

        (nation.rating as i32 - slot_penalty + jitter)
            .clamp(RATING_FLOOR as i32, RATING_CEILING as i32) as u8
    }

    fn age_band(position: PlayerPosition, group_slot: usize) -> (i32, i32) {
        match position {
            PlayerPosition::Goalkeeper => {
                if group_slot == 0 {
                    (26, 34)
                } else {
                    (19, 30)
                }
            }
            PlayerPosition::Defender => {
                if group_slot < 4 {
                    (24, 32)
                } else {
                    (18, 27)
                }
            }
            PlayerPosition::Midfielder => {
                if group_slot < 4 {
                    (23, 31)
                } else {
                    (18, 26)
                }
            }
            PlayerPosition::Forward => {
                if group_slot < 3 {
                    (22, 30)
                } else {
                    (17, 25)
                }
            }
        }
    }

    fn retirement_probability(age: u8) -> f64 {
        match age {
            0..=29 => 0.02,
            30..=32 => 0.2,
            33..=34 => 0.45,
            35..=36 => 0.75,
            _ => 0.95,
        }
    }

    fn rating_drift(age: u8, rng: &mut DeterministicRng) -> i32 {
        match age {
            0..=23 => rng.next_int(0, 6),
            24..=28 => rng.next_int(-2, 4),
            29..=32 => rng.next_int(-5, 2),
            _ => rng.next_int(-8, 0),
        }
    }

    fn player_id(nation_code: &str, slot: usize, edition: u32) -> u32 {
        composite_seed(&[
            "player",
            nation_code,
            &slot.to_string(),
            &edition.to_string(),
        ])
    }
}
