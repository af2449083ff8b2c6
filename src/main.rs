use core::utils::TimeEstimation;
use core::{Phase, SystemClock, WorldContext};
use database::DatabaseLoader;
use env_logger::Env;
use log::info;
use std::env;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() {
    color_eyre::install().unwrap();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let is_one_shot = env::var("MODE") == Ok(String::from("ONESHOT"));

    let (database, estimated) = TimeEstimation::estimate(DatabaseLoader::load);

    info!("database loaded: {} ms", estimated);

    let clock = Arc::new(SystemClock::new());
    let context = WorldContext::new(database.nations, database.names, clock);

    if is_one_shot {
        report(&context.current_state());
        return;
    }

    loop {
        report(&context.current_state());
        thread::sleep(Duration::from_secs(1));
    }
}

fn report(snapshot: &core::Snapshot) {
    info!(
        "edition {} | minute {:.1} | {}",
        snapshot.edition, snapshot.cycle_minute, snapshot.phase
    );

    for live in &snapshot.live_matches {
        info!(
            "  ⚽ {} {}' {} {} - {} {}",
            live.match_id, live.minute, live.home, live.home_score, live.away_score, live.away
        );
    }

    if snapshot.live_matches.is_empty() {
        if let Some(upcoming) = snapshot.upcoming.first() {
            info!(
                "  next: {} ({} vs {}) at minute {}",
                upcoming.match_id, upcoming.home, upcoming.away, upcoming.kickoff_minute
            );
        }
    }

    if snapshot.phase == Phase::Celebration {
        let best = &snapshot.tournament.awards.best_player;
        info!(
            "  🏆 {} are world champions | best player: {} ({}, {})",
            snapshot.tournament.champion,
            best.name,
            best.position.short_code(),
            best.nation_code
        );
    }
}
