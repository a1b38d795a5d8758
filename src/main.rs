//! Sky Flyer headless entry point
//!
//! Plays a handful of runs with the autopilot, shopping between runs, and
//! logs how the session went. Usage: `sky-flyer [config.json] [seed]`.

#[cfg(not(target_arch = "wasm32"))]
use sky_flyer::{Control, GameConfig, GameController, Intent, UpgradeTrack, autopilot};

/// Runs to play in one demo session
#[cfg(not(target_arch = "wasm32"))]
const DEMO_RUNS: u32 = 5;
/// Stop a run that goes on longer than this (5 minutes at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS_PER_RUN: u64 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sky Flyer (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = match args.next() {
        Some(seed) => seed.parse::<u64>()?,
        None => 0x5EED,
    };

    let mut controller = GameController::new(config, seed)?;

    for _ in 0..DEMO_RUNS {
        fly_run(&mut controller);
        visit_shop(&mut controller);
    }

    let session = controller.session();
    log::info!(
        "Session over: {} runs, high score {}, {} coins, wing {} fuel {}",
        session.runs,
        session.high_score,
        session.currency,
        session.levels.wing,
        session.levels.fuel
    );
    println!("{}", serde_json::to_string_pretty(session)?);
    Ok(())
}

/// Drive one run with the autopilot until it ends
#[cfg(not(target_arch = "wasm32"))]
fn fly_run(controller: &mut GameController) {
    let Some(token) = controller.handle(Intent::Start) else {
        return;
    };
    log::debug!("Flying on frame loop {}", token.id());

    while token.is_active() {
        let steer = autopilot::steer(controller.run_state(), controller.config());
        for (control, held) in [
            (Control::Ascend, steer.ascend),
            (Control::Descend, steer.descend),
        ] {
            if held {
                controller.key_down(control);
            } else {
                controller.key_up(control);
            }
        }

        let Some(snapshot) = controller.frame() else {
            break;
        };
        if snapshot.tick >= MAX_TICKS_PER_RUN {
            log::warn!("Run hit the {MAX_TICKS_PER_RUN} tick limit, ending it");
            controller.on_game_over(snapshot.score);
        }
    }

    let session = controller.session();
    log::info!(
        "Run {}: score {}, coins earned {}",
        session.runs,
        session.score,
        session.coins_earned_last_run
    );
}

/// Spend coins on whichever upgrade is cheapest until nothing is affordable
#[cfg(not(target_arch = "wasm32"))]
fn visit_shop(controller: &mut GameController) {
    controller.handle(Intent::OpenShop);
    loop {
        let Some(track) = UpgradeTrack::ALL
            .into_iter()
            .filter(|&track| controller.can_afford(track))
            .min_by_key(|&track| controller.upgrade_cost(track))
        else {
            break;
        };
        controller.handle(Intent::BuyUpgrade(track));
    }
    controller.handle(Intent::BackToMenu);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosted by the browser shell; nothing to run standalone
}
