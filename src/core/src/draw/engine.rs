use crate::nation::Nation;
use crate::rng::DeterministicRng;
use itertools::Itertools;
use log::debug;
use serde::Serialize;

pub const QUALIFIED_COUNT: usize = 32;
pub const POT_COUNT: usize = 4;
pub const POT_SIZE: usize = 8;
pub const GROUP_COUNT: usize = 8;
pub const GROUP_SIZE: usize = 4;

/// No group may hold more than this many nations of one confederation; the
/// limit is relaxed (and logged) only when no conforming group remains.
const MAX_SAME_CONFEDERATION: usize = 2;

/// Why a nation landed in its group, kept for the reveal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlacementReason {
    HostAnchor,
    ChampionAnchor,
    PotOne,
    Standard,
    ConstraintRelaxed,
}

/// One step of the televised draw, in reveal order.
#[derive(Debug, Clone, Serialize)]
pub struct RevealStep {
    pub nation_code: String,
    pub group: usize,
    pub pot: usize,
    pub reason: PlacementReason,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupDraw {
    pub index: usize,
    pub nations: Vec<Nation>,
}

impl GroupDraw {
    pub fn letter(&self) -> char {
        (b'A' + self.index as u8) as char
    }

    pub fn contains(&self, code: &str) -> bool {
        self.nations.iter().any(|nation| nation.code == code)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DrawResult {
    pub edition: u32,
    pub pots: Vec<Vec<Nation>>,
    pub groups: Vec<GroupDraw>,
    pub reveal: Vec<RevealStep>,
}

impl DrawResult {
    pub fn qualified_codes(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|group| group.nations.iter().map(|nation| nation.code.as_str()))
            .collect()
    }

    pub fn group_of(&self, code: &str) -> Option<usize> {
        self.groups
            .iter()
            .find(|group| group.contains(code))
            .map(|group| group.index)
    }
}

pub struct DrawEngine;

impl DrawEngine {
    /// Runs the full draw for one edition: qualification, pot seeding and the
    /// constrained group assignment, recording the reveal order as it goes.
    pub fn conduct(
        nations: &[Nation],
        edition: u32,
        host: &Nation,
        defending_champion: Option<&str>,
    ) -> DrawResult {
        let mut rng = DeterministicRng::for_scope(&["draw", &edition.to_string()]);

        let champion = defending_champion.filter(|code| *code != host.code);
        let qualified = Self::qualify(nations, host, champion, &mut rng);
        let pots = Self::seed_pots(qualified, host, champion, &mut rng);

        let mut groups: Vec<Vec<Nation>> = vec![Vec::with_capacity(GROUP_SIZE); GROUP_COUNT];
        let mut reveal = Vec::with_capacity(QUALIFIED_COUNT);

        // Pot 1 anchors: host opens group A, the champion opens group B, the
        // rest of the pot fills the remaining groups one each. Anchors are
        // placed before the standard fill regardless of shuffle order.
        let is_anchor =
            |code: &str| code == host.code || champion == Some(code);

        for nation in &pots[0] {
            let (group, reason) = if nation.code == host.code {
                (0, PlacementReason::HostAnchor)
            } else if champion == Some(nation.code.as_str()) {
                (1, PlacementReason::ChampionAnchor)
            } else {
                continue;
            };

            groups[group].push(nation.clone());
            reveal.push(RevealStep {
                nation_code: nation.code.clone(),
                group,
                pot: 0,
                reason,
            });
        }

        let mut next_free_group = 0usize;
        for nation in &pots[0] {
            if is_anchor(&nation.code) {
                continue;
            }
            while !groups[next_free_group].is_empty() {
                next_free_group += 1;
            }

            groups[next_free_group].push(nation.clone());
            reveal.push(RevealStep {
                nation_code: nation.code.clone(),
                group: next_free_group,
                pot: 0,
                reason: PlacementReason::PotOne,
            });
        }

        for (pot_index, pot) in pots.iter().enumerate().skip(1) {
            for nation in pot {
                let (group, reason) = Self::assign_group(&groups, nation, &mut rng);
                groups[group].push(nation.clone());
                reveal.push(RevealStep {
                    nation_code: nation.code.clone(),
                    group,
                    pot: pot_index,
                    reason,
                });
            }
        }

        let groups = groups
            .into_iter()
            .enumerate()
            .map(|(index, nations)| GroupDraw { index, nations })
            .collect();

        DrawResult {
            edition,
            pots,
            groups,
            reveal,
        }
    }

    /// Selects the 32 participants: host and defending champion are in by
    /// right, the rest qualify on rating with a small random perturbation so
    /// the borderline nations trade places between editions.
    fn qualify(
        nations: &[Nation],
        host: &Nation,
        champion: Option<&str>,
        rng: &mut DeterministicRng,
    ) -> Vec<Nation> {
        let ranked: Vec<(&Nation, f64)> = nations
            .iter()
            .map(|nation| {
                let perturbation = rng.next_f64() * 6.0 - 3.0;
                (nation, nation.rating as f64 + perturbation)
            })
            .sorted_by(|a, b| b.1.total_cmp(&a.1))
            .collect();

        let mut qualified: Vec<Nation> = Vec::with_capacity(QUALIFIED_COUNT);
        qualified.push(host.clone());
        if let Some(code) = champion {
            if let Some(nation) = nations.iter().find(|nation| nation.code == code) {
                qualified.push(nation.clone());
            }
        }

        for (nation, _) in ranked {
            if qualified.len() == QUALIFIED_COUNT {
                break;
            }
            if qualified.iter().all(|present| present.code != nation.code) {
                qualified.push(nation.clone());
            }
        }

        assert_eq!(
            qualified.len(),
            QUALIFIED_COUNT,
            "dataset must contain at least {} nations",
            QUALIFIED_COUNT
        );

        qualified
    }

    /// Splits the field into 4 rating pots of 8, forces the host (and the
    /// champion when distinct) into pot 1, then shuffles within each pot.
    fn seed_pots(
        qualified: Vec<Nation>,
        host: &Nation,
        champion: Option<&str>,
        rng: &mut DeterministicRng,
    ) -> Vec<Vec<Nation>> {
        let sorted: Vec<Nation> = qualified
            .into_iter()
            .sorted_by(|a, b| b.rating.cmp(&a.rating).then(a.code.cmp(&b.code)))
            .collect();

        let mut pots: Vec<Vec<Nation>> = sorted
            .chunks(POT_SIZE)
            .map(|chunk| chunk.to_vec())
            .collect();

        Self::force_into_first_pot(&mut pots, &host.code);
        if let Some(code) = champion {
            Self::force_into_first_pot(&mut pots, code);
        }

        pots.iter_mut()
            .for_each(|pot| *pot = rng.shuffle(pot.as_slice()));

        pots
    }

    fn force_into_first_pot(pots: &mut [Vec<Nation>], code: &str) {
        let location = pots
            .iter()
            .position(|pot| pot.iter().any(|nation| nation.code == code));

        if let Some(pot_index) = location {
            if pot_index > 0 {
                let inner = pots[pot_index]
                    .iter()
                    .position(|nation| nation.code == code)
                    .unwrap();
                let forced = pots[pot_index].remove(inner);
                // Displace the weakest pot-1 nation downward
                let displaced = pots[0].pop().unwrap();
                pots[0].insert(0, forced);
                pots[pot_index].push(displaced);
            }
        }
    }

    /// Picks a group with space that keeps the confederation limit; when no
    /// such group exists the limit is relaxed rather than failing the draw.
    fn assign_group(
        groups: &[Vec<Nation>],
        nation: &Nation,
        rng: &mut DeterministicRng,
    ) -> (usize, PlacementReason) {
        let conforming: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, group)| {
                group.len() < GROUP_SIZE
                    && group
                        .iter()
                        .filter(|present| present.confederation == nation.confederation)
                        .count()
                        < MAX_SAME_CONFEDERATION
            })
            .map(|(index, _)| index)
            .collect();

        if !conforming.is_empty() {
            let choice = conforming[rng.next_int(0, conforming.len() as i32 - 1) as usize];
            return (choice, PlacementReason::Standard);
        }

        debug!(
            "draw: no conforming group for {}, relaxing confederation limit",
            nation.code
        );

        let open: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, group)| group.len() < GROUP_SIZE)
            .map(|(index, _)| index)
            .collect();

        let choice = open[rng.next_int(0, open.len() as i32 - 1) as usize];
        (choice, PlacementReason::ConstraintRelaxed)
    }
}
