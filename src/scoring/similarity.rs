//! 姿勢類似度
//!
//! 関節角度の一致度（80%）とランドマーク位置の一致度（20%）を合成して
//! 0〜100 のスコアを返す。左右反転した解釈も評価し、高い方を採用する。
//! データ品質の問題ではエラーにせず最低スコア側に倒す。

use crate::pose::{Landmark, LandmarkIndex, Pose, VISIBILITY_THRESHOLD};

/// 平均距離がこれ以上で位置スコア 0%
pub const DISTANCE_CUTOFF: f32 = 0.3;
/// 平均角度差（度）がこれ以上で角度スコア 0%
pub const ANGLE_CUTOFF_DEG: f32 = 60.0;
pub const ANGLE_WEIGHT: f32 = 0.8;
pub const DISTANCE_WEIGHT: f32 = 0.2;

/// 比較可能なランドマークが無いときの平均距離
const FALLBACK_DISTANCE: f32 = 1.0;
/// 比較可能な関節が無いときの平均角度差
const FALLBACK_ANGLE_DIFF_DEG: f32 = 180.0;

/// 角度を測る関節と、その両隣の関節
#[derive(Debug, Clone, Copy)]
pub struct JointAngle {
    pub name: &'static str,
    pub joint: LandmarkIndex,
    pub parent1: LandmarkIndex,
    pub parent2: LandmarkIndex,
    pub weight: f32,
}

impl JointAngle {
    const fn new(
        name: &'static str,
        joint: LandmarkIndex,
        parent1: LandmarkIndex,
        parent2: LandmarkIndex,
        weight: f32,
    ) -> Self {
        Self { name, joint, parent1, parent2, weight }
    }

    fn is_visible(&self, pose: &Pose) -> bool {
        [self.joint, self.parent1, self.parent2]
            .iter()
            .all(|&i| pose.get(i).is_visible(VISIBILITY_THRESHOLD))
    }

    /// この関節の角度（度）
    pub fn measure(&self, pose: &Pose) -> f32 {
        let joint = pose.get(self.joint);
        let v1 = joint.vector_to(pose.get(self.parent1));
        let v2 = joint.vector_to(pose.get(self.parent2));
        angle_between(v1, v2)
    }
}

/// 比較する8関節。肘・膝は 2.5、肩・腰は 2.0
pub const JOINT_ANGLES: [JointAngle; 8] = {
    use LandmarkIndex::*;
    [
        JointAngle::new("left elbow", LeftElbow, LeftShoulder, LeftWrist, 2.5),
        JointAngle::new("left shoulder", LeftShoulder, LeftElbow, LeftHip, 2.0),
        JointAngle::new("right elbow", RightElbow, RightShoulder, RightWrist, 2.5),
        JointAngle::new("right shoulder", RightShoulder, RightElbow, RightHip, 2.0),
        JointAngle::new("left knee", LeftKnee, LeftHip, LeftAnkle, 2.5),
        JointAngle::new("left hip", LeftHip, LeftKnee, LeftShoulder, 2.0),
        JointAngle::new("right knee", RightKnee, RightHip, RightAnkle, 2.5),
        JointAngle::new("right hip", RightHip, RightKnee, RightShoulder, 2.0),
    ]
};

/// 2ベクトル間の角度（度, 0〜180）
///
/// cos(θ) = (v1 · v2) / (|v1| × |v2|)。長さ0のベクトルを含む場合は 0°。
pub fn angle_between(v1: [f32; 3], v2: [f32; 3]) -> f32 {
    let dot = v1[0] * v2[0] + v1[1] * v2[1] + v1[2] * v2[2];
    let mag1 = (v1[0] * v1[0] + v1[1] * v1[1] + v1[2] * v1[2]).sqrt();
    let mag2 = (v2[0] * v2[0] + v2[1] * v2[1] + v2[2] * v2[2]).sqrt();

    if mag1 == 0.0 || mag2 == 0.0 {
        return 0.0;
    }

    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// ランドマーク列どうしの類似度 (0〜100)
///
/// 要素数が異なる、または33でない場合は 0。
pub fn calculate_pose_similarity(user: &[Landmark], target: &[Landmark]) -> f32 {
    if user.len() != target.len() {
        return 0.0;
    }
    match (Pose::from_slice(user), Pose::from_slice(target)) {
        (Some(user), Some(target)) => pose_similarity(&user, &target),
        _ => 0.0,
    }
}

/// 正面・左右反転の両解釈で比較し、高い方を返す
pub fn pose_similarity(user: &Pose, target: &Pose) -> f32 {
    let direct = single_pose_similarity(user, target);
    let mirrored = single_pose_similarity(&user.mirrored(), target);
    direct.max(mirrored)
}

/// 反転なしの類似度
pub fn single_pose_similarity(user: &Pose, target: &Pose) -> f32 {
    angle_similarity(user, target) * ANGLE_WEIGHT + distance_similarity(user, target) * DISTANCE_WEIGHT
}

/// 位置の一致度 (0〜100)
///
/// 双方で可視なランドマークの平均3次元距離を、0→100%、[`DISTANCE_CUTOFF`]以上→0% に線形変換する。
pub fn distance_similarity(user: &Pose, target: &Pose) -> f32 {
    let mut total = 0.0;
    let mut count = 0usize;

    for (u, t) in user.landmarks.iter().zip(target.landmarks.iter()) {
        if !u.is_visible(VISIBILITY_THRESHOLD) || !t.is_visible(VISIBILITY_THRESHOLD) {
            continue;
        }
        total += u.distance(t);
        count += 1;
    }

    let avg_distance = if count > 0 {
        total / count as f32
    } else {
        FALLBACK_DISTANCE
    };
    to_percent(avg_distance, DISTANCE_CUTOFF)
}

/// 関節角度の一致度 (0〜100)
///
/// 3点とも双方で可視な関節のみ、重み付き平均角度差を 0°→100%、[`ANGLE_CUTOFF_DEG`]以上→0% に変換する。
pub fn angle_similarity(user: &Pose, target: &Pose) -> f32 {
    let mut total_diff = 0.0;
    let mut total_weight = 0.0;

    for joint in JOINT_ANGLES.iter() {
        if !joint.is_visible(user) || !joint.is_visible(target) {
            continue;
        }
        let diff = (joint.measure(user) - joint.measure(target)).abs();
        total_diff += diff * joint.weight;
        total_weight += joint.weight;
    }

    let avg_diff = if total_weight > 0.0 {
        total_diff / total_weight
    } else {
        FALLBACK_ANGLE_DIFF_DEG
    };
    to_percent(avg_diff, ANGLE_CUTOFF_DEG)
}

fn to_percent(value: f32, cutoff: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    ((1.0 - value / cutoff) * 100.0).clamp(0.0, 100.0)
}
