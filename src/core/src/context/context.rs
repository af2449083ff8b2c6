use crate::context::clock::Clock;
use crate::host::HostSelector;
use crate::nation::Nation;
use crate::snapshot::{Snapshot, UpcomingMatch};
use crate::squad::{NameDirectory, RosterGenerator};
use crate::timeline::{Phase, TimelineMapper, CYCLE_MINUTES};
use crate::tournament::{TournamentRef, TournamentSimulator};
use crate::utils::Logging;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

/// Minute zero of edition 0. Everything the engine produces is a pure
/// function of a timestamp relative to this instant.
pub static EPOCH: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());

const UPCOMING_LIMIT: usize = 5;
const RECENT_LIMIT: usize = 5;

/// Composition root: owns the nation pool, all memoization tables and the
/// clock. One context per process is the normal arrangement; tests build
/// throwaway ones with a fixed clock.
pub struct WorldContext {
    nations: Vec<Nation>,
    rosters: RosterGenerator,
    hosts: HostSelector,
    timeline: TimelineMapper,
    tournaments: Mutex<HashMap<u32, TournamentRef>>,
    clock: Arc<dyn Clock>,
}

impl WorldContext {
    pub fn new(nations: Vec<Nation>, names: NameDirectory, clock: Arc<dyn Clock>) -> Self {
        WorldContext {
            nations,
            rosters: RosterGenerator::new(names),
            hosts: HostSelector::new(),
            timeline: TimelineMapper::new(),
            tournaments: Mutex::new(HashMap::new()),
            clock,
        }
    }

    pub fn nations(&self) -> &[Nation] {
        &self.nations
    }

    /// Edition and fractional cycle minute for a timestamp. Timestamps
    /// before the epoch clamp to the very start of edition 0.
    pub fn locate(&self, timestamp: DateTime<Utc>) -> (u32, f64) {
        let elapsed = (timestamp - *EPOCH).num_milliseconds() as f64 / 60_000.0;
        if elapsed <= 0.0 {
            return (0, 0.0);
        }

        let edition = (elapsed / CYCLE_MINUTES as f64) as u32;
        let cycle_minute = elapsed - edition as f64 * CYCLE_MINUTES as f64;
        (edition, cycle_minute)
    }

    /// Fully simulated result for one edition, memoized. Editions are built
    /// left to right because each needs the previous champion; the lock is
    /// held across the build so every edition is computed exactly once.
    pub fn tournament(&self, edition: u32) -> TournamentRef {
        let mut cache = self.tournaments.lock().expect("tournament cache poisoned");

        for current in 0..=edition {
            if cache.contains_key(&current) {
                continue;
            }

            let champion = current
                .checked_sub(1)
                .and_then(|previous| cache.get(&previous))
                .map(|tournament| tournament.champion.clone());

            let message = format!("edition {} simulated", current);

            let tournament = Logging::estimate_result(
                || {
                    TournamentSimulator::simulate(
                        &self.nations,
                        &self.rosters,
                        &self.hosts,
                        current,
                        champion.as_deref(),
                    )
                },
                &message,
            );
            cache.insert(current, Arc::new(tournament));
        }

        Arc::clone(&cache[&edition])
    }

    pub fn current_state(&self) -> Snapshot {
        self.state_at(self.clock.now())
    }

    /// The snapshot assembler: one timestamp in, the complete world view out.
    pub fn state_at(&self, timestamp: DateTime<Utc>) -> Snapshot {
        let (edition, cycle_minute) = self.locate(timestamp);
        let phase = Phase::at(cycle_minute);
        let tournament = self.tournament(edition);

        let live_matches = self
            .timeline
            .live_at(cycle_minute)
            .into_iter()
            .filter_map(|slot| {
                tournament.match_result(&slot.match_id).map(|result| {
                    let minute = slot.football_minute(cycle_minute, result.full_minutes());
                    result.live_view(minute)
                })
            })
            .collect();

        let upcoming = self
            .timeline
            .upcoming(cycle_minute, UPCOMING_LIMIT)
            .into_iter()
            .filter_map(|slot| {
                tournament.match_result(&slot.match_id).map(|result| UpcomingMatch {
                    match_id: slot.match_id.clone(),
                    home: result.home.clone(),
                    away: result.away.clone(),
                    kickoff_minute: slot.start,
                })
            })
            .collect();

        let recent_matches = self
            .timeline
            .recent(cycle_minute, RECENT_LIMIT)
            .into_iter()
            .filter_map(|slot| tournament.match_result(&slot.match_id).cloned())
            .collect();

        let next_host = Some(self.hosts.host_for(&self.nations, edition + 1));
        let next_cycle_start =
            *EPOCH + Duration::minutes((edition as i64 + 1) * CYCLE_MINUTES as i64);

        Snapshot {
            edition,
            cycle_minute,
            phase,
            tournament,
            live_matches,
            upcoming,
            recent_matches,
            next_host,
            next_cycle_start,
        }
    }

    /// Every edition strictly before the one in progress at `timestamp`.
    pub fn completed_tournaments(&self, timestamp: DateTime<Utc>) -> Vec<TournamentRef> {
        let (edition, _) = self.locate(timestamp);
        (0..edition).map(|earlier| self.tournament(earlier)).collect()
    }

    /// Test hook: drop every memoized tournament, squad and host.
    pub fn clear_caches(&self) {
        self.tournaments
            .lock()
            .expect("tournament cache poisoned")
            .clear();
        self.rosters.clear();
        self.hosts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::clock::FixedClock;
    use crate::nation::{Confederation, Culture};
    use crate::squad::NamePool;

    fn names() -> NameDirectory {
        let mut pools = HashMap::new();
        pools.insert(
            Culture::Default,
            NamePool {
                first_names: vec![
                    String::from("Teo"),
                    String::from("Nils"),
                    String::from("Omar"),
                ],
                last_names: vec![
                    String::from("Adeyemi"),
                    String::from("Falk"),
                    String::from("Ramos"),
                ],
                nicknames: vec![],
                compound_surname_chance: 0.0,
                single_name_chance: 0.0,
                nickname_chance: 0.0,
                patronymic_suffix: None,
                patronymic_chance: 0.0,
            },
        );
        NameDirectory::new(pools)
    }

    fn world() -> Vec<Nation> {
        let confederations = [
            Confederation::Uefa,
            Confederation::Conmebol,
            Confederation::Concacaf,
            Confederation::Caf,
            Confederation::Afc,
            Confederation::Ofc,
        ];

        let mut nations: Vec<Nation> = (0..40)
            .map(|i| {
                Nation::new(
                    &format!("N{:02}", i),
                    &format!("Nation {}", i),
                    confederations[i % confederations.len()],
                    58 + ((i * 7) % 40) as u8,
                    Culture::Default,
                )
            })
            .collect();
        nations.push(Nation::new(
            "BRA",
            "Brazil",
            Confederation::Conmebol,
            92,
            Culture::Default,
        ));
        nations
    }

    fn context_at(minutes_after_epoch: i64) -> WorldContext {
        let clock = FixedClock::new(*EPOCH + Duration::minutes(minutes_after_epoch));
        WorldContext::new(world(), names(), Arc::new(clock))
    }

    #[test]
    fn test_epoch_anchor() {
        let context = context_at(0);
        let snapshot = context.current_state();

        assert_eq!(snapshot.edition, 0);
        assert_eq!(snapshot.cycle_minute, 0.0);
        assert_eq!(snapshot.phase, Phase::Draw);
        assert_eq!(snapshot.tournament.host.code, "BRA");
    }

    #[test]
    fn test_editions_advance_with_the_clock() {
        let context = context_at(CYCLE_MINUTES as i64 + 1);
        let snapshot = context.current_state();
        assert_eq!(snapshot.edition, 1);

        let far = context.state_at(*EPOCH + Duration::minutes(5 * CYCLE_MINUTES as i64 + 30));
        assert_eq!(far.edition, 5);
        assert_eq!(far.phase, Phase::Draw);
    }

    #[test]
    fn test_pre_epoch_timestamps_clamp_to_edition_zero() {
        let context = context_at(0);
        let snapshot = context.state_at(*EPOCH - Duration::days(30));
        assert_eq!(snapshot.edition, 0);
        assert_eq!(snapshot.cycle_minute, 0.0);
    }

    #[test]
    fn test_world_is_deterministic_across_fresh_contexts() {
        let timestamp = *EPOCH + Duration::minutes(3 * CYCLE_MINUTES as i64 + 5_000);

        let first = context_at(0).state_at(timestamp);
        let second = context_at(0).state_at(timestamp);

        assert_eq!(first.edition, second.edition);
        assert_eq!(first.phase, second.phase);
        assert_eq!(first.tournament.champion, second.tournament.champion);
        assert_eq!(first.tournament.host.code, second.tournament.host.code);
    }

    #[test]
    fn test_cache_clear_changes_nothing() {
        let context = context_at(0);
        let timestamp = *EPOCH + Duration::minutes(CYCLE_MINUTES as i64 + 200);

        let before = context.state_at(timestamp);
        context.clear_caches();
        let after = context.state_at(timestamp);

        assert_eq!(before.tournament.champion, after.tournament.champion);
        assert_eq!(
            before.tournament.total_goals,
            after.tournament.total_goals
        );
    }

    #[test]
    fn test_live_matches_are_prefixes_of_final_results() {
        // Minute 130 is 10 minutes into group A's first matchday slot
        let context = context_at(130);
        let snapshot = context.current_state();

        assert_eq!(snapshot.phase, Phase::GroupStage);
        assert_eq!(snapshot.live_matches.len(), 2);

        for live in &snapshot.live_matches {
            let full = snapshot
                .tournament
                .match_result(&live.match_id)
                .expect("live match exists in the tournament");

            assert!(live.home_score <= full.home_score);
            assert!(live.away_score <= full.away_score);
            for (seen, actual) in live.goals.iter().zip(full.goals.iter()) {
                assert_eq!(seen.minute, actual.minute);
                assert_eq!(seen.scorer_id, actual.scorer_id);
            }
        }
    }

    #[test]
    fn test_live_score_is_monotone_through_a_slot() {
        let context = context_at(0);

        let mut last_total = 0u8;
        for step in 0..18i64 {
            let minute = 120 + step * 10;
            let snapshot = context.state_at(*EPOCH + Duration::minutes(minute));
            let live = snapshot
                .live_matches
                .iter()
                .find(|view| view.match_id == "group-a-md1-1")
                .expect("group A opener live for its whole slot");

            let total = live.home_score + live.away_score;
            assert!(total >= last_total);
            last_total = total;
        }
    }

    #[test]
    fn test_completed_tournaments_precede_the_current_edition() {
        let context = context_at(0);
        let timestamp = *EPOCH + Duration::minutes(2 * CYCLE_MINUTES as i64 + 50);

        let completed = context.completed_tournaments(timestamp);
        assert_eq!(completed.len(), 2);
        assert_eq!(completed[0].edition, 0);
        assert_eq!(completed[1].edition, 1);
    }

    #[test]
    fn test_title_defense_links_editions() {
        let context = context_at(0);
        let first = context.tournament(0);
        let second = context.tournament(1);

        // The previous champion always qualifies for the next edition
        assert!(second
            .qualified_codes()
            .contains(&first.champion.as_str()));
    }

    #[test]
    fn test_next_host_is_always_announced() {
        let context = context_at(500);
        let snapshot = context.current_state();

        let next = snapshot.next_host.expect("next host is determinable");
        assert!(!next.code.is_empty());
        assert_eq!(
            snapshot.next_cycle_start,
            *EPOCH + Duration::minutes(CYCLE_MINUTES as i64)
        );
    }

    #[test]
    fn test_upcoming_matches_are_soonest_first() {
        let context = context_at(0);
        let snapshot = context.current_state();

        assert_eq!(snapshot.upcoming.len(), 5);
        let kickoffs: Vec<u32> = snapshot
            .upcoming
            .iter()
            .map(|upcoming| upcoming.kickoff_minute)
            .collect();
        let mut sorted = kickoffs.clone();
        sorted.sort();
        assert_eq!(kickoffs, sorted);
        assert_eq!(snapshot.upcoming[0].kickoff_minute, 120);
    }
}
