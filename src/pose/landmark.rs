use serde::{Deserialize, Serialize};

/// ランドマークを「使用可能」とみなす visibility の下限
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

/// MediaPipe Pose の 33 ランドマークインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkIndex {
    pub const COUNT: usize = 33;

    /// 配列順の全インデックス
    pub const ALL: [LandmarkIndex; Self::COUNT] = {
        use LandmarkIndex::*;
        [
            Nose, LeftEyeInner, LeftEye, LeftEyeOuter,
            RightEyeInner, RightEye, RightEyeOuter,
            LeftEar, RightEar, MouthLeft, MouthRight,
            LeftShoulder, RightShoulder, LeftElbow, RightElbow,
            LeftWrist, RightWrist, LeftPinky, RightPinky,
            LeftIndex, RightIndex, LeftThumb, RightThumb,
            LeftHip, RightHip, LeftKnee, RightKnee,
            LeftAnkle, RightAnkle, LeftHeel, RightHeel,
            LeftFootIndex, RightFootIndex,
        ]
    };

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// ミラー判定で入れ替える左右ペア（肩・肘・手首・腰・膝・足首）
pub const MIRROR_PAIRS: [(LandmarkIndex, LandmarkIndex); 6] = [
    (LandmarkIndex::LeftShoulder, LandmarkIndex::RightShoulder),
    (LandmarkIndex::LeftElbow, LandmarkIndex::RightElbow),
    (LandmarkIndex::LeftWrist, LandmarkIndex::RightWrist),
    (LandmarkIndex::LeftHip, LandmarkIndex::RightHip),
    (LandmarkIndex::LeftKnee, LandmarkIndex::RightKnee),
    (LandmarkIndex::LeftAnkle, LandmarkIndex::RightAnkle),
];

/// 人物検出判定に使う主要関節（肩・肘・腰・膝）
pub const KEY_JOINTS: [LandmarkIndex; 8] = [
    LandmarkIndex::LeftShoulder,
    LandmarkIndex::RightShoulder,
    LandmarkIndex::LeftElbow,
    LandmarkIndex::RightElbow,
    LandmarkIndex::LeftHip,
    LandmarkIndex::RightHip,
    LandmarkIndex::LeftKnee,
    LandmarkIndex::RightKnee,
];

/// 単一ランドマーク
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// 正規化されたX座標 (0.0〜1.0)
    pub x: f32,
    /// 正規化されたY座標 (0.0〜1.0)
    pub y: f32,
    /// 相対的な奥行き（単位なし）
    pub z: f32,
    /// 可視性スコア (0.0〜1.0)。検出器が出さない場合は 0
    #[serde(default)]
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    /// visibility が閾値以上か
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility >= threshold
    }

    /// 3次元ユークリッド距離
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// self から other へのベクトル
    pub fn vector_to(&self, other: &Landmark) -> [f32; 3] {
        [other.x - self.x, other.y - self.y, other.z - self.z]
    }
}

/// 33ランドマークからなる姿勢
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub landmarks: [Landmark; LandmarkIndex::COUNT],
}

impl Pose {
    pub fn new(landmarks: [Landmark; LandmarkIndex::COUNT]) -> Self {
        Self { landmarks }
    }

    /// スライスから作成。要素数が33でなければ None
    pub fn from_slice(landmarks: &[Landmark]) -> Option<Self> {
        <[Landmark; LandmarkIndex::COUNT]>::try_from(landmarks)
            .ok()
            .map(Self::new)
    }

    /// インデックスでランドマークを取得
    pub fn get(&self, index: LandmarkIndex) -> &Landmark {
        &self.landmarks[index as usize]
    }

    pub fn get_mut(&mut self, index: LandmarkIndex) -> &mut Landmark {
        &mut self.landmarks[index as usize]
    }

    pub fn as_slice(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// 左右ペアを入れ替えた姿勢
    pub fn mirrored(&self) -> Pose {
        let mut mirrored = self.clone();
        for &(left, right) in MIRROR_PAIRS.iter() {
            mirrored.landmarks.swap(left as usize, right as usize);
        }
        mirrored
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); LandmarkIndex::COUNT],
        }
    }
}

/// 指定インデックスのうち visibility が閾値以上のものの割合
///
/// スライスが短く存在しないインデックスは不可視として数える。
pub fn visible_ratio(landmarks: &[Landmark], indices: &[LandmarkIndex], threshold: f32) -> f32 {
    if indices.is_empty() {
        return 0.0;
    }
    let visible = indices
        .iter()
        .filter(|&&i| {
            landmarks
                .get(i as usize)
                .is_some_and(|lm| lm.is_visible(threshold))
        })
        .count();
    visible as f32 / indices.len() as f32
}
