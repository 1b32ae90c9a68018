use anyhow::{bail, Context, Result};

use dance_scorer::config::LogConfig;
use dance_scorer::mesh::{load_action_mesh, CHECKPOINT_TOLERANCE};
use dance_scorer::pose::{visible_ratio, KEY_JOINTS, VISIBILITY_THRESHOLD};

/// アクションメッシュの概要と、採点できない区間を表示する
fn main() -> Result<()> {
    LogConfig::default().init();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: mesh_info <action_mesh.json>");
    };

    let mesh = load_action_mesh(&path).with_context(|| format!("failed to load {}", path))?;

    let mut times: Vec<f32> = mesh.checkpoints().iter().map(|cp| cp.time).collect();
    let unsorted = times.windows(2).any(|w| w[1] < w[0]);
    times.sort_by(f32::total_cmp);

    println!("Mesh: {}", path);
    println!("Checkpoints: {}", mesh.len());
    if unsorted {
        println!("Order: not sorted by time");
    }
    if let Some((start, end)) = mesh.time_span() {
        println!("Time span: {:.2}s - {:.2}s", start, end);
        if mesh.len() > 1 {
            println!("Mean spacing: {:.3}s", (end - start) / (mesh.len() - 1) as f32);
        }
    }

    let low_presence = mesh
        .checkpoints()
        .iter()
        .filter(|cp| visible_ratio(cp.landmarks(), &KEY_JOINTS, VISIBILITY_THRESHOLD) < 0.5)
        .count();
    println!("Checkpoints with < 50% key joints visible: {}", low_presence);

    // 許容差の2倍を超える間隔の中央付近は採点されない
    let max_gap = CHECKPOINT_TOLERANCE * 2.0;
    let gaps: Vec<(f32, f32)> = times
        .windows(2)
        .filter(|w| w[1] - w[0] > max_gap)
        .map(|w| (w[0], w[1]))
        .collect();

    if gaps.is_empty() {
        println!("No unscoreable gaps (> {:.1}s)", max_gap);
    } else {
        println!("Unscoreable gaps (> {:.1}s):", max_gap);
        for (from, to) in gaps {
            println!("  {:.2}s - {:.2}s ({:.2}s)", from, to, to - from);
        }
    }

    Ok(())
}
