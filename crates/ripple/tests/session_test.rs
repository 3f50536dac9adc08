//! # Session Tests
//!
//! Drives full sessions the way a render loop would.
//!
//! Run with: cargo test -p ripple --test session_test

use ripple::core::{GridConfig, RippleConfig, SimulationSeed};
use ripple::RippleSession;

fn config(dimension: usize, seed: u64) -> RippleConfig {
    RippleConfig {
        seed,
        grid: GridConfig { dimension },
        ..RippleConfig::default()
    }
}

fn run_frames(session: &mut RippleSession, frames: usize, frame_ms: f64) -> Vec<u64> {
    let mut now = 0.0;
    session.start(now);
    for _ in 0..frames {
        now += frame_ms;
        session.advance(now).unwrap();
    }
    session.points().iter().map(|p| p.height.to_bits()).collect()
}

#[test]
fn sessions_with_same_seed_match() {
    let mut a = RippleSession::new(&config(40, 48339)).unwrap();
    let mut b = RippleSession::new(&config(40, 48339)).unwrap();
    assert_eq!(run_frames(&mut a, 400, 16.6), run_frames(&mut b, 400, 16.6));
    assert_eq!(a.field().step_count(), b.field().step_count());
}

#[test]
fn reseed_replays_the_run() {
    let mut session = RippleSession::new(&config(30, 9)).unwrap();
    let first = run_frames(&mut session, 200, 16.6);
    session.reseed(SimulationSeed::new(9));
    let second = run_frames(&mut session, 200, 16.6);
    assert_eq!(first, second);
}

#[test]
fn frame_rate_only_changes_tick_count() {
    // 60 ms ticks: 16.6 ms frames tick every 4th frame, 61 ms frames every frame.
    let mut slow = RippleSession::new(&config(20, 1)).unwrap();
    run_frames(&mut slow, 40, 61.0);
    assert_eq!(slow.field().step_count(), 40);

    let mut fast = RippleSession::new(&config(20, 1)).unwrap();
    run_frames(&mut fast, 40, 16.6);
    assert_eq!(fast.field().step_count(), 10);
}

#[test]
fn rain_keeps_surface_bounded() {
    let mut session = RippleSession::new(&config(60, 48339)).unwrap();
    session.start(0.0);
    for _ in 0..2_000 {
        session.tick().unwrap();
    }
    let stats = session.surface_stats();
    assert!(!stats.is_flat());
    assert!(stats.amplitude().is_finite());
    assert!(stats.amplitude() < 100.0, "amplitude {}", stats.amplitude());
}

#[test]
fn config_file_builds_session() {
    let path = std::env::temp_dir().join(format!("ripple_session_test_{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "seed = 5\n[grid]\ndimension = 16\n[schedule]\ntick_period_ms = 40.0\ndrops_per_second = 50.0\n[splash]\namplitude = -6.0\ndrop_size = 2\n",
    )
    .unwrap();

    let config = RippleConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let mut session = RippleSession::new(&config).unwrap();
    assert_eq!(session.field().dimension(), 16);
    assert_eq!(session.scheduler().split_drops(), (2, 0.0));

    session.start(0.0);
    let report = session.tick().unwrap();
    assert_eq!(report.drops, 2);
    assert!(!report.bonus_drop);
}
