pub mod landmark;

pub use landmark::{
    visible_ratio, Landmark, LandmarkIndex, Pose, KEY_JOINTS, MIRROR_PAIRS, VISIBILITY_THRESHOLD,
};
