//! Sky Hopper entry point
//!
//! Headless demo driver: seeds a run, autoplays it with a small steering
//! heuristic at the fixed cadence, and prints the outcome. Real rendering and
//! input collaborators hook into the exact same `Simulation` surface this
//! driver uses.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sky_hopper::HighScores;
    use sky_hopper::consts::SIM_DT;
    use sky_hopper::highscores;
    use sky_hopper::sim::{GamePhase, Simulation, level_for_score};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    log::info!("Sky Hopper demo run, seed {seed}");

    let mut sim = Simulation::new(seed);
    sim.start();

    // Two minutes of simulated time, or until the run ends
    let max_ticks = (120.0 / SIM_DT) as u64;
    let mut ticks = 0u64;
    while sim.snapshot().phase == GamePhase::Playing && ticks < max_ticks {
        sim.set_move_intent(steer(&sim));
        sim.tick();
        ticks += 1;
    }

    let snap = sim.snapshot();
    log::info!("demo finished after {ticks} ticks");
    println!(
        "score: {}  difficulty: {:.1}  game_over: {}",
        snap.score,
        snap.difficulty,
        snap.game_over()
    );

    let mut scores = HighScores::load();
    if let Some(rank) = scores.add_score(
        snap.score,
        level_for_score(snap.score),
        highscores::now_ms(),
    ) {
        scores.save();
        println!("demo run ranked #{rank} on the local board");
    }
}

/// Chase the nearest intact platform below the player's feet while falling
#[cfg(not(target_arch = "wasm32"))]
fn steer(sim: &sky_hopper::sim::Simulation) -> Option<sky_hopper::sim::MoveDir> {
    use sky_hopper::sim::MoveDir;

    let snap = sim.snapshot();
    if snap.player.vel_y <= 0.0 {
        return None; // rising: hold course
    }

    let feet = snap.player.bottom();
    let player_mid = snap.player.pos.x + snap.player.width / 2.0;
    let target = snap
        .world
        .platforms
        .iter()
        .filter(|p| !p.is_broken() && p.pos.y >= feet)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

    let target_mid = target.pos.x + target.width / 2.0;
    if (target_mid - player_mid).abs() < 4.0 {
        None
    } else if target_mid < player_mid {
        Some(MoveDir::Left)
    } else {
        Some(MoveDir::Right)
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds drive the simulation through the wasm collaborators;
    // this entry point only exists to satisfy the compiler.
}
