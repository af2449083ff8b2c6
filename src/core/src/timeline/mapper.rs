use crate::group::GroupStage;
use serde::Serialize;

/// Wall minutes reserved for one fixture, kickoff to cleared stadium.
pub const SLOT_MINUTES: u32 = 180;

pub const GROUP_STAGE_START: u32 = 120;
pub const MATCHDAY_MINUTES: u32 = 1_440;
pub const ROUND_OF_16_START: u32 = 4_800;
pub const QUARTERFINALS_START: u32 = 6_600;
pub const SEMIFINALS_START: u32 = 7_680;
pub const THIRD_PLACE_START: u32 = 8_400;
pub const FINAL_START: u32 = 8_580;

/// One scheduled fixture within the cycle. The two fixtures of a group's
/// matchday share a start minute and run concurrently.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSlot {
    pub match_id: String,
    pub start: u32,
}

impl MatchSlot {
    pub fn end(&self) -> u32 {
        self.start + SLOT_MINUTES
    }

    pub fn is_live_at(&self, cycle_minute: f64) -> bool {
        cycle_minute >= self.start as f64 && cycle_minute < self.end() as f64
    }

    /// Interpolates the football clock from elapsed slot time. A 90-minute
    /// match and a 120-minute match both fill the whole slot, so the pace
    /// differs but the truncation point is always well defined.
    pub fn football_minute(&self, cycle_minute: f64, full_minutes: u8) -> f64 {
        let progress = ((cycle_minute - self.start as f64) / SLOT_MINUTES as f64).clamp(0.0, 1.0);
        progress * full_minutes as f64
    }
}

/// The fixed kickoff schedule for one cycle: 48 group fixtures and 16
/// knockout fixtures, in kickoff order.
pub struct TimelineMapper {
    slots: Vec<MatchSlot>,
}

impl TimelineMapper {
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(64);

        for matchday in 0..3 {
            for group_index in 0..8 {
                let start = GROUP_STAGE_START
                    + matchday as u32 * MATCHDAY_MINUTES
                    + group_index as u32 * SLOT_MINUTES;
                for fixture in 0..2 {
                    slots.push(MatchSlot {
                        match_id: GroupStage::match_id(group_index, matchday, fixture),
                        start,
                    });
                }
            }
        }

        for index in 0..8u32 {
            slots.push(MatchSlot {
                match_id: format!("r16-{}", index + 1),
                start: ROUND_OF_16_START + index * SLOT_MINUTES,
            });
        }
        for index in 0..4u32 {
            slots.push(MatchSlot {
                match_id: format!("qf-{}", index + 1),
                start: QUARTERFINALS_START + index * SLOT_MINUTES,
            });
        }
        for index in 0..2u32 {
            slots.push(MatchSlot {
                match_id: format!("sf-{}", index + 1),
                start: SEMIFINALS_START + index * SLOT_MINUTES,
            });
        }
        slots.push(MatchSlot {
            match_id: String::from("third-place"),
            start: THIRD_PLACE_START,
        });
        slots.push(MatchSlot {
            match_id: String::from("final"),
            start: FINAL_START,
        });

        slots.sort_by_key(|slot| slot.start);

        TimelineMapper { slots }
    }

    pub fn slots(&self) -> &[MatchSlot] {
        &self.slots
    }

    pub fn slot(&self, match_id: &str) -> Option<&MatchSlot> {
        self.slots.iter().find(|slot| slot.match_id == match_id)
    }

    pub fn live_at(&self, cycle_minute: f64) -> Vec<&MatchSlot> {
        self.slots
            .iter()
            .filter(|slot| slot.is_live_at(cycle_minute))
            .collect()
    }

    /// Next fixtures yet to kick off, soonest first.
    pub fn upcoming(&self, cycle_minute: f64, limit: usize) -> Vec<&MatchSlot> {
        self.slots
            .iter()
            .filter(|slot| (slot.start as f64) > cycle_minute)
            .take(limit)
            .collect()
    }

    /// Most recently finished fixtures, latest first.
    pub fn recent(&self, cycle_minute: f64, limit: usize) -> Vec<&MatchSlot> {
        self.slots
            .iter()
            .rev()
            .filter(|slot| (slot.end() as f64) <= cycle_minute)
            .take(limit)
            .collect()
    }
}

impl Default for TimelineMapper {
    fn default() -> Self {
        TimelineMapper::new()
    }
}
