use anyhow::{Context, Result};
use std::path::Path;

use dance_scorer::config::Config;
use dance_scorer::mesh::load_action_mesh;
use dance_scorer::observation::load_observations;
use dance_scorer::scoring::{ScoringSession, TickOutcome};

const CONFIG_PATH: &str = "config.toml";

/// 観測ログを参照メッシュに対して再生し、採点結果を表示する
fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_PATH.to_string());
    let config = Config::load_or_default(&config_path);
    config.log.init();
    if !Path::new(&config_path).exists() {
        log::warn!("{} not found; using defaults", config_path);
    }

    println!("Dance Scorer {}", env!("BUILD_VERSION"));
    println!("Mesh: {}", config.replay.mesh_path);
    println!("Observations: {}", config.replay.observations_path);
    println!(
        "Scoring: tolerance={}s, debounce={}s, presence={}",
        config.scoring.checkpoint_tolerance,
        config.scoring.debounce_window,
        config.scoring.presence_ratio
    );
    println!();

    let mesh = load_action_mesh(&config.replay.mesh_path)
        .with_context(|| format!("failed to load mesh {}", config.replay.mesh_path))?;
    if let Some((start, end)) = mesh.time_span() {
        println!("Mesh loaded: {} checkpoints ({:.1}s - {:.1}s)", mesh.len(), start, end);
    }

    let observations = load_observations(&config.replay.observations_path).with_context(|| {
        format!("failed to load observations {}", config.replay.observations_path)
    })?;
    println!("Observations loaded: {}", observations.len());
    println!();

    let mut session = ScoringSession::new(config.scoring.clone());
    session.load_mesh(mesh);
    session.set_video_ready(true);

    let mut scored = 0usize;
    let mut missed = 0usize;
    let mut not_detected = 0usize;

    for observation in &observations {
        match session.on_observation(observation.time, observation.landmarks.as_deref()) {
            TickOutcome::Scored { event, similarity } => {
                scored += 1;
                println!(
                    "{:>7.2}s  {:<12} +{:<4} (similarity {:5.1}%)  total {}",
                    observation.time,
                    event.feedback.label(),
                    event.points,
                    similarity,
                    session.scoreboard().total()
                );
            }
            TickOutcome::NoPoints { .. } => missed += 1,
            TickOutcome::PersonNotDetected => not_detected += 1,
            _ => {}
        }
    }

    println!();
    println!("Scored ticks: {}", scored);
    println!("Zero-point ticks: {}", missed);
    println!("Person not detected: {}", not_detected);
    println!("Final score: {}", session.scoreboard().total());

    session.end_playback();
    Ok(())
}
