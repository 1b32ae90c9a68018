pub mod feedback;
pub mod scoreboard;
pub mod session;
pub mod similarity;

pub use feedback::{get_score_feedback, Feedback, ScoreEvent};
pub use scoreboard::ScoreBoard;
pub use session::{ScoringSession, SessionState, TickOutcome};
pub use similarity::{calculate_pose_similarity, pose_similarity, JointAngle, JOINT_ANGLES};
