//! Asteroid Hunter headless runner
//!
//! Drives the simulation with a scripted pilot and a mirrored scene, logging
//! what happens. Useful for soak tests and for tuning settings files.
//!
//! Usage: `asteroid-hunter [--settings FILE] [--seed N] [--seconds S]`

use asteroid_hunter::Settings;
use asteroid_hunter::present::{SceneMirror, Texture};
use asteroid_hunter::sim::{GameEvent, GameState, TickInput, tick};

/// Simulated frame length (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;

struct Args {
    settings: Option<String>,
    seed: u64,
    seconds: f64,
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut args = Args {
        settings: None,
        seed: 0x5eed,
        seconds: 60.0,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || iter.next().ok_or_else(|| format!("missing value for {}", flag));
        match flag.as_str() {
            "--settings" => args.settings = Some(value()?),
            "--seed" => args.seed = value()?.parse()?,
            "--seconds" => args.seconds = value()?.parse()?,
            other => return Err(format!("unknown argument: {}", other).into()),
        }
    }
    Ok(args)
}

/// Scripted pilot: sweep the nose around, pulse the thrust, fire at will
fn pilot(frame: u64) -> TickInput {
    TickInput {
        turn_left: false,
        turn_right: frame % 240 < 120,
        accelerate: frame % 300 < 30,
        fire: frame % 6 == 0,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut scene = SceneMirror::new();
    let mut state = GameState::with_settings(args.seed, settings, &mut scene);
    log::info!("Running {}s of simulation with seed {}", args.seconds, args.seed);

    let mut now = 0.0f64;
    let mut frame = 0u64;
    let mut deaths = 0u32;
    let mut shots = 0u32;
    let mut kills = 0u32;

    while now < args.seconds {
        now += FRAME_DT as f64;
        let mut input = pilot(frame);
        tick(&mut state, &mut scene, &mut input, now, FRAME_DT);
        frame += 1;

        for event in &state.events {
            match event {
                GameEvent::ShipDestroyed { .. } => deaths += 1,
                GameEvent::BulletFired { .. } => shots += 1,
                GameEvent::AsteroidDestroyed { .. } => kills += 1,
                _ => {}
            }
        }
    }

    log::info!(
        "{} frames: {} shots, {} asteroids cleared, {} deaths, {} live visuals",
        frame,
        shots,
        kills,
        deaths,
        scene.len()
    );

    let variants = state.settings.asteroid_texture_variants;
    let textures = [Texture::Background, Texture::Ship, Texture::Bullet]
        .into_iter()
        .chain((1..=variants).map(Texture::Asteroid));
    for texture in textures {
        let visible = scene.count_visible(|t| t == Some(texture));
        log::info!("{:>16}: {} visible", texture.file_name(), visible);
    }

    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}
