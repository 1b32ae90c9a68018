use super::checkpoint::{ActionMesh, ActionMeshCheckpoint};

/// 再生時刻とチェックポイント時刻の許容差（秒）
pub const CHECKPOINT_TOLERANCE: f32 = 0.3;

/// 再生時刻に最も近いチェックポイントを返す
///
/// 全件を線形走査する。距離が同じ場合は先に現れたものを採用し、
/// 最小距離が [`CHECKPOINT_TOLERANCE`] を超える場合は None。
pub fn find_nearest_checkpoint(mesh: &ActionMesh, current_time: f32) -> Option<&ActionMeshCheckpoint> {
    find_nearest_checkpoint_within(mesh.checkpoints(), current_time, CHECKPOINT_TOLERANCE)
}

/// 許容差を指定して最近傍チェックポイントを探す
pub fn find_nearest_checkpoint_within(
    checkpoints: &[ActionMeshCheckpoint],
    current_time: f32,
    tolerance: f32,
) -> Option<&ActionMeshCheckpoint> {
    find_nearest_index(checkpoints, current_time, tolerance).map(|i| &checkpoints[i])
}

/// 最近傍チェックポイントのインデックス
pub fn find_nearest_index(
    checkpoints: &[ActionMeshCheckpoint],
    current_time: f32,
    tolerance: f32,
) -> Option<usize> {
    let mut nearest: Option<(usize, f32)> = None;

    for (i, checkpoint) in checkpoints.iter().enumerate() {
        let diff = (checkpoint.time - current_time).abs();
        // 厳密に小さい場合のみ更新（同距離なら先勝ち）
        let closer = nearest.map_or(true, |(_, min_diff)| diff < min_diff);
        if closer {
            nearest = Some((i, diff));
        }
    }

    nearest
        .filter(|&(_, min_diff)| min_diff <= tolerance)
        .map(|(i, _)| i)
}
