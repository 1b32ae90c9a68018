//! Mesh JSON → session → scoreboard, end to end.

use dance_scorer::mesh::{parse_action_mesh, MeshError};
use dance_scorer::observation::read_observations;
use dance_scorer::pose::{Landmark, LandmarkIndex};
use dance_scorer::scoring::{
    Feedback, ScoreEvent, ScoringSession, SessionState, TickOutcome,
};
use dance_scorer::config::ScoringConfig;

fn base_pose() -> Vec<Landmark> {
    use LandmarkIndex::*;
    let mut landmarks = vec![Landmark::new(0.5, 0.2, 0.0, 0.9); LandmarkIndex::COUNT];
    let points = [
        (LeftShoulder, 0.6, 0.3),
        (RightShoulder, 0.4, 0.3),
        (LeftElbow, 0.65, 0.45),
        (RightElbow, 0.35, 0.45),
        (LeftWrist, 0.7, 0.6),
        (RightWrist, 0.3, 0.6),
        (LeftHip, 0.56, 0.6),
        (RightHip, 0.44, 0.6),
        (LeftKnee, 0.57, 0.75),
        (RightKnee, 0.43, 0.75),
        (LeftAnkle, 0.58, 0.9),
        (RightAnkle, 0.42, 0.9),
    ];
    for (idx, x, y) in points {
        landmarks[idx as usize] = Landmark::new(x, y, 0.0, 0.9);
    }
    landmarks
}

/// 右腕だけ水平に伸ばした姿勢
fn right_arm_out() -> Vec<Landmark> {
    let mut landmarks = base_pose();
    landmarks[LandmarkIndex::RightElbow as usize] = Landmark::new(0.25, 0.3, 0.0, 0.9);
    landmarks[LandmarkIndex::RightWrist as usize] = Landmark::new(0.1, 0.3, 0.0, 0.9);
    landmarks
}

fn mesh_json(checkpoints: &[(f32, Vec<Landmark>)]) -> String {
    let entries: Vec<serde_json::Value> = checkpoints
        .iter()
        .map(|(time, landmarks)| serde_json::json!({ "time": time, "landmarks": landmarks }))
        .collect();
    serde_json::to_string(&entries).unwrap()
}

fn active_session(json: &str) -> ScoringSession {
    let mesh = parse_action_mesh(json).unwrap();
    let mut session = ScoringSession::new(ScoringConfig::default());
    session.load_mesh(mesh);
    session.set_video_ready(true);
    assert_eq!(session.state(), SessionState::Active);
    session
}

#[test]
fn perfect_then_debounced() {
    let l1 = base_pose();
    let l2 = right_arm_out();
    let mut session = active_session(&mesh_json(&[(1.0, l1.clone()), (2.0, l2)]));

    let outcome = session.on_observation(1.05, Some(l1.as_slice()));
    match outcome {
        TickOutcome::Scored { event, .. } => {
            assert_eq!(
                event,
                ScoreEvent {
                    points: 100,
                    feedback: Feedback::Perfect
                }
            );
        }
        other => panic!("expected a score event, got {:?}", other),
    }
    assert_eq!(session.last_scored_time(), 1.05);

    assert_eq!(session.on_observation(1.1, Some(l1.as_slice())), TickOutcome::Debounced);
    assert_eq!(session.scoreboard().total(), 100);
}

#[test]
fn mirrored_performer_still_scores_perfect() {
    let target = right_arm_out();
    let mut session = active_session(&mesh_json(&[(2.0, target.clone())]));

    // 画面に向かって踊ると左右が入れ替わる
    let mut mirrored = target.clone();
    for (l, r) in dance_scorer::pose::MIRROR_PAIRS {
        mirrored.swap(l as usize, r as usize);
    }
    let outcome = session.on_observation(2.0, Some(mirrored.as_slice()));
    assert!(matches!(
        outcome,
        TickOutcome::Scored { event: ScoreEvent { feedback: Feedback::Perfect, .. }, .. }
    ));
}

/// 両腕を上げてしゃがみ、横にずれた姿勢
fn far_off_squat() -> Vec<Landmark> {
    use LandmarkIndex::*;
    let mut landmarks = base_pose();
    landmarks[LeftElbow as usize] = Landmark::new(0.62, 0.15, 0.0, 0.9);
    landmarks[RightElbow as usize] = Landmark::new(0.38, 0.15, 0.0, 0.9);
    landmarks[LeftWrist as usize] = Landmark::new(0.5, 0.05, 0.0, 0.9);
    landmarks[RightWrist as usize] = Landmark::new(0.5, 0.05, 0.0, 0.9);
    landmarks[LeftKnee as usize] = Landmark::new(0.7, 0.7, 0.0, 0.9);
    landmarks[RightKnee as usize] = Landmark::new(0.3, 0.7, 0.0, 0.9);
    for lm in landmarks.iter_mut() {
        lm.x += 0.4;
    }
    landmarks
}

#[test]
fn wrong_pose_then_right_pose_scores_without_waiting() {
    let l1 = base_pose();
    let l2 = right_arm_out();
    let mut session = active_session(&mesh_json(&[(1.0, l1), (2.0, l2.clone())]));

    let outcome = session.on_observation(2.0, Some(far_off_squat().as_slice()));
    assert!(matches!(outcome, TickOutcome::NoPoints { .. }), "got {:?}", outcome);
    assert_eq!(session.last_scored_time(), 0.0);

    // 0 点では debounce しないので直後の観測で採点される
    let outcome = session.on_observation(2.05, Some(l2.as_slice()));
    assert!(matches!(
        outcome,
        TickOutcome::Scored { event: ScoreEvent { points: 100, .. }, .. }
    ));
}

#[test]
fn replay_loop_scores_again_after_seek_back() {
    let l1 = base_pose();
    let mut session = active_session(&mesh_json(&[(1.0, l1.clone()), (5.0, l1.clone())]));

    assert!(matches!(session.on_observation(5.0, Some(l1.as_slice())), TickOutcome::Scored { .. }));
    // ループして先頭に戻る
    assert!(matches!(session.on_observation(1.0, Some(l1.as_slice())), TickOutcome::Scored { .. }));
    assert_eq!(session.scoreboard().total(), 200);
}

#[test]
fn end_of_video_resets_session() {
    let l1 = base_pose();
    let mut session = active_session(&mesh_json(&[(1.0, l1.clone())]));
    session.on_observation(1.0, Some(l1.as_slice()));

    session.end_playback();
    assert_eq!(session.state(), SessionState::Reset);
    assert_eq!(session.scoreboard().total(), 0);
    assert_eq!(session.scoreboard().last_run(), Some(100));
    assert_eq!(session.scoreboard().feedback_label(), "Ready");
    assert_eq!(session.last_scored_time(), 0.0);

    session.restart();
    assert!(matches!(session.on_observation(1.0, Some(l1.as_slice())), TickOutcome::Scored { .. }));
}

#[test]
fn replay_observation_log() {
    let l1 = base_pose();
    let mut session = active_session(&mesh_json(&[(1.0, l1.clone()), (2.0, l1.clone())]));

    let lines: Vec<String> = [
        (0.95, Some(&l1)),
        (1.0, Some(&l1)),
        (1.5, None),
        (2.0, Some(&l1)),
    ]
    .iter()
    .map(|(time, landmarks)| serde_json::json!({ "time": time, "landmarks": landmarks }).to_string())
    .collect();
    let observations = read_observations(lines.join("\n").as_bytes()).unwrap();

    let outcomes: Vec<TickOutcome> = observations
        .iter()
        .map(|o| session.on_observation(o.time, o.landmarks.as_deref()))
        .collect();

    assert!(matches!(outcomes[0], TickOutcome::Scored { .. }));
    assert_eq!(outcomes[1], TickOutcome::Debounced);
    assert_eq!(outcomes[2], TickOutcome::NoPose);
    assert!(matches!(outcomes[3], TickOutcome::Scored { .. }));
    assert_eq!(session.scoreboard().total(), 200);
}

#[test]
fn unusable_mesh_is_reported() {
    let short = vec![Landmark::default(); 10];
    let err = parse_action_mesh(&mesh_json(&[(1.0, short)])).unwrap_err();
    assert!(matches!(err, MeshError::Empty));
}
