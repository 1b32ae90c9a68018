use crate::pose::{Landmark, Pose};

/// 参照動画のある再生時刻における姿勢
#[derive(Debug, Clone, PartialEq)]
pub struct ActionMeshCheckpoint {
    /// 再生時刻（秒）
    pub time: f32,
    pub pose: Pose,
}

impl ActionMeshCheckpoint {
    pub fn new(time: f32, pose: Pose) -> Self {
        Self { time, pose }
    }

    pub fn landmarks(&self) -> &[Landmark] {
        self.pose.as_slice()
    }
}

/// 参照振り付け全体。読み込み後は変更しない
///
/// チェックポイントはファイル上の順序のまま保持する。時刻順である保証はない。
#[derive(Debug, Clone, Default)]
pub struct ActionMesh {
    checkpoints: Vec<ActionMeshCheckpoint>,
}

impl ActionMesh {
    pub fn new(checkpoints: Vec<ActionMeshCheckpoint>) -> Self {
        Self { checkpoints }
    }

    pub fn checkpoints(&self) -> &[ActionMeshCheckpoint] {
        &self.checkpoints
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// 最小・最大のチェックポイント時刻
    pub fn time_span(&self) -> Option<(f32, f32)> {
        self.checkpoints.iter().fold(None, |span, cp| match span {
            None => Some((cp.time, cp.time)),
            Some((start, end)) => Some((start.min(cp.time), end.max(cp.time))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh_at(times: &[f32]) -> ActionMesh {
        ActionMesh::new(
            times
                .iter()
                .map(|&t| ActionMeshCheckpoint::new(t, Pose::default()))
                .collect(),
        )
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = ActionMesh::default();
        assert!(mesh.is_empty());
        assert_eq!(mesh.len(), 0);
        assert_eq!(mesh.time_span(), None);
    }

    #[test]
    fn test_time_span_unsorted() {
        let mesh = mesh_at(&[2.0, 0.5, 3.5, 1.0]);
        assert_eq!(mesh.len(), 4);
        assert_eq!(mesh.time_span(), Some((0.5, 3.5)));
    }

    #[test]
    fn test_keeps_file_order() {
        let mesh = mesh_at(&[2.0, 0.5]);
        assert_eq!(mesh.checkpoints()[0].time, 2.0);
        assert_eq!(mesh.checkpoints()[1].time, 0.5);
    }

    #[test]
    fn test_checkpoint_landmarks_len() {
        let cp = ActionMeshCheckpoint::new(1.0, Pose::default());
        assert_eq!(cp.landmarks().len(), 33);
    }
}
