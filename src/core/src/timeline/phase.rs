use serde::Serialize;
use std::fmt;

/// Full cycle length: 7 days in minutes.
pub const CYCLE_MINUTES: u32 = 10_080;

/// Named window within the weekly cycle. The schedule below is total and
/// exhaustive over [0, CYCLE_MINUTES); every boundary is a multiple of 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Draw,
    GroupStage,
    RestAfterGroups,
    RoundOf16,
    RestAfterRoundOf16,
    Quarterfinals,
    RestAfterQuarterfinals,
    Semifinals,
    RestAfterSemifinals,
    ThirdPlace,
    Final,
    Celebration,
    Countdown,
}

pub const PHASE_SCHEDULE: [(Phase, u32, u32); 13] = [
    (Phase::Draw, 0, 120),
    (Phase::GroupStage, 120, 4_440),
    (Phase::RestAfterGroups, 4_440, 4_800),
    (Phase::RoundOf16, 4_800, 6_240),
    (Phase::RestAfterRoundOf16, 6_240, 6_600),
    (Phase::Quarterfinals, 6_600, 7_320),
    (Phase::RestAfterQuarterfinals, 7_320, 7_680),
    (Phase::Semifinals, 7_680, 8_040),
    (Phase::RestAfterSemifinals, 8_040, 8_400),
    (Phase::ThirdPlace, 8_400, 8_580),
    (Phase::Final, 8_580, 8_760),
    (Phase::Celebration, 8_760, 9_360),
    (Phase::Countdown, 9_360, CYCLE_MINUTES),
];

impl Phase {
    /// Maps a cycle-relative minute to its phase. Input is taken modulo the
    /// cycle so callers may pass raw elapsed minutes.
    pub fn at(cycle_minute: f64) -> Phase {
        let minute = (cycle_minute.max(0.0) as u32) % CYCLE_MINUTES;
        PHASE_SCHEDULE
            .iter()
            .find(|(_, start, end)| minute >= *start && minute < *end)
            .map(|(phase, _, _)| *phase)
            .expect("phase schedule is exhaustive")
    }

    pub fn window(&self) -> (u32, u32) {
        PHASE_SCHEDULE
            .iter()
            .find(|(phase, _, _)| phase == self)
            .map(|(_, start, end)| (*start, *end))
            .unwrap()
    }

    pub fn is_rest(&self) -> bool {
        matches!(
            self,
            Phase::RestAfterGroups
                | Phase::RestAfterRoundOf16
                | Phase::RestAfterQuarterfinals
                | Phase::RestAfterSemifinals
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Draw => "Draw",
            Phase::GroupStage => "Group Stage",
            Phase::RestAfterGroups => "Rest Day",
            Phase::RoundOf16 => "Round of 16",
            Phase::RestAfterRoundOf16 => "Rest Day",
            Phase::Quarterfinals => "Quarterfinals",
            Phase::RestAfterQuarterfinals => "Rest Day",
            Phase::Semifinals => "Semifinals",
            Phase::RestAfterSemifinals => "Rest Day",
            Phase::ThirdPlace => "Third Place Match",
            Phase::Final => "Final",
            Phase::Celebration => "Celebration",
            Phase::Countdown => "Countdown",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_is_exhaustive_and_gapless() {
        let mut expected_start = 0;
        for (_, start, end) in PHASE_SCHEDULE {
            assert_eq!(start, expected_start);
            assert!(end > start);
            expected_start = end;
        }
        assert_eq!(expected_start, CYCLE_MINUTES);
    }

    #[test]
    fn test_boundaries_are_hour_aligned() {
        for (_, start, end) in PHASE_SCHEDULE {
            assert_eq!(start % 60, 0);
            assert_eq!(end % 60, 0);
        }
    }

    #[test]
    fn test_minute_zero_is_the_draw() {
        assert_eq!(Phase::at(0.0), Phase::Draw);
        assert_eq!(Phase::at(119.9), Phase::Draw);
        assert_eq!(Phase::at(120.0), Phase::GroupStage);
    }

    #[test]
    fn test_every_minute_maps_to_exactly_one_phase() {
        for minute in 0..CYCLE_MINUTES {
            let phase = Phase::at(minute as f64);
            let (start, end) = phase.window();
            assert!(minute >= start && minute < end);
        }
    }

    #[test]
    fn test_minute_wraps_at_cycle_end() {
        assert_eq!(Phase::at(CYCLE_MINUTES as f64), Phase::Draw);
        assert_eq!(Phase::at((CYCLE_MINUTES + 200) as f64), Phase::GroupStage);
    }
}
