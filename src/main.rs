//! Rise of the AI - headless runner
//!
//! Plays level 1 with a scripted input track and jittered frame times, then
//! logs the outcome. Usage: `rise-of-the-ai [tuning.json] [seed]`.
//! Run with `RUST_LOG=debug` to see every simulation event.

use std::process::ExitCode;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use rise_of_the_ai::audio::{AudioManager, LogSink, MusicTrack};
use rise_of_the_ai::consts::SIM_DT;
use rise_of_the_ai::sim::level_one;
use rise_of_the_ai::{Session, Tuning};

/// Stop after this many frames even if nobody has won
const MAX_FRAMES: u32 = 60 * 60;
const DEFAULT_SEED: u64 = 42;

/// Scripted input: pace the ledge and hop every couple of seconds
fn autopilot(frame: u32) -> (Vec2, bool) {
    let phase = (frame / 90) % 4;
    let movement = match phase {
        0 => Vec2::new(-1.0, 0.0),
        2 => Vec2::new(1.0, 0.0),
        _ => Vec2::ZERO,
    };
    (movement, frame % 120 == 60)
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("invalid seed: {e}");
            return ExitCode::FAILURE;
        }
        None => DEFAULT_SEED,
    };

    let state = match level_one(tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("failed to set up level 1: {e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("Rise of the AI (headless) starting with seed {seed}");
    let mut session = Session::new(state);
    let mut audio: AudioManager<LogSink> = AudioManager::default();
    audio.start_music(MusicTrack::LevelTheme);
    let mut rng = Pcg32::seed_from_u64(seed);

    let mut frame = 0;
    while frame < MAX_FRAMES && !session.state.is_over() {
        let (movement, jump) = autopilot(frame);
        session.set_movement_intent(movement);
        if jump {
            session.request_jump();
        }

        // Uneven frame pacing; the simulation still advances in fixed steps
        let frame_dt = SIM_DT * rng.random_range(0.5..2.0);
        session.update(frame_dt);
        audio.dispatch(&session.drain_events());
        frame += 1;
    }

    let state = &session.state;
    match state.outcome() {
        Some(outcome) => log::info!(
            "{} after {} ticks ({} frames), {}/{} enemies defeated",
            outcome.message(),
            state.time_ticks,
            frame,
            state.enemies_defeated,
            state.enemies_to_defeat()
        ),
        None => log::info!(
            "No outcome after {} frames, {}/{} enemies defeated",
            frame,
            state.enemies_defeated,
            state.enemies_to_defeat()
        ),
    }
    ExitCode::SUCCESS
}
