use crate::config::ScoringConfig;
use crate::mesh::{find_nearest_index, ActionMesh, ActionMeshCheckpoint};
use crate::pose::{visible_ratio, Landmark, KEY_JOINTS};

use super::feedback::ScoreEvent;
use super::scoreboard::ScoreBoard;
use super::similarity::calculate_pose_similarity;

/// セッションの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// メッシュまたは参照動画が未準備
    Idle,
    /// 採点中
    Active,
    /// 再生終了・退出後
    Reset,
}

/// 1観測あたりの処理結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// セッションが Active でない
    Inactive,
    /// 検出器が人物を返さなかった
    NoPose,
    /// 直前の加点から debounce_window 未満
    Debounced,
    /// 許容差内にチェックポイントが無い
    NoCheckpoint,
    /// 主要関節の可視割合が不足
    PersonNotDetected,
    /// 採点したが 0 点
    NoPoints { similarity: f32 },
    Scored { event: ScoreEvent, similarity: f32 },
}

/// 参照動画1本分の採点ループ
///
/// 観測は1件ずつ同期的に処理する前提。`&mut self` で排他されるため
/// `last_scored_time` にロックは不要。
pub struct ScoringSession {
    config: ScoringConfig,
    mesh: Option<ActionMesh>,
    video_ready: bool,
    state: SessionState,
    last_scored_time: f32,
    scoreboard: ScoreBoard,
    // デバッグ表示用（直近の観測で計算した値）
    current_checkpoint: Option<usize>,
    current_user_landmarks: Vec<Landmark>,
    person_detected: bool,
    last_similarity: Option<f32>,
}

impl ScoringSession {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            mesh: None,
            video_ready: false,
            state: SessionState::Idle,
            last_scored_time: 0.0,
            scoreboard: ScoreBoard::new(),
            current_checkpoint: None,
            current_user_landmarks: Vec::new(),
            person_detected: false,
            last_similarity: None,
        }
    }

    /// 参照動画が変わったときに呼ぶ。採点時刻はリセットされる
    pub fn load_mesh(&mut self, mesh: ActionMesh) {
        log::info!("action mesh set: {} checkpoints", mesh.len());
        self.mesh = Some(mesh);
        self.last_scored_time = 0.0;
        self.clear_debug();
        self.refresh_state();
    }

    /// メッシュを破棄する（読み込み失敗時など）。以降は採点しない
    pub fn clear_mesh(&mut self) {
        self.mesh = None;
        self.clear_debug();
        self.refresh_state();
    }

    pub fn set_video_ready(&mut self, ready: bool) {
        self.video_ready = ready;
        self.refresh_state();
    }

    /// 再生終了。採点時刻と累積スコアをリセット
    pub fn end_playback(&mut self) {
        log::info!("playback ended: total score {}", self.scoreboard.total());
        self.reset();
    }

    /// セッション退出。メッシュと動画の準備状態も破棄する
    pub fn exit(&mut self) {
        log::info!("session exit: total score {}", self.scoreboard.total());
        self.mesh = None;
        self.video_ready = false;
        self.reset();
    }

    /// Reset 状態から再生を再開する
    pub fn restart(&mut self) {
        if self.state == SessionState::Reset {
            self.refresh_state();
        }
    }

    fn reset(&mut self) {
        self.last_scored_time = 0.0;
        self.scoreboard.reset();
        self.clear_debug();
        self.set_state(SessionState::Reset);
    }

    fn refresh_state(&mut self) {
        let next = if self.mesh.is_some() && self.video_ready {
            SessionState::Active
        } else {
            SessionState::Idle
        };
        self.set_state(next);
    }

    fn set_state(&mut self, next: SessionState) {
        if self.state != next {
            log::info!("session state: {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn clear_debug(&mut self) {
        self.current_checkpoint = None;
        self.current_user_landmarks.clear();
        self.person_detected = false;
        self.last_similarity = None;
    }

    /// 検出器から観測が届くたびに呼ぶ
    ///
    /// `landmarks` が None の場合は人物未検出として何もしない。
    /// 加点した場合はスコアボードに反映し、`last_scored_time` を更新する。
    pub fn on_observation(&mut self, playback_time: f32, landmarks: Option<&[Landmark]>) -> TickOutcome {
        let outcome = self.evaluate(playback_time, landmarks);
        log::debug!("t={:.2}s {:?}", playback_time, outcome);
        outcome
    }

    fn evaluate(&mut self, playback_time: f32, landmarks: Option<&[Landmark]>) -> TickOutcome {
        if self.state != SessionState::Active {
            return TickOutcome::Inactive;
        }
        let Some(mesh) = self.mesh.as_ref() else {
            return TickOutcome::Inactive;
        };
        let Some(landmarks) = landmarks else {
            return TickOutcome::NoPose;
        };

        // 負の差分は巻き戻し・ループなので debounce しない
        let delta = playback_time - self.last_scored_time;
        if delta >= 0.0 && delta < self.config.debounce_window {
            return TickOutcome::Debounced;
        }

        let Some(index) = find_nearest_index(
            mesh.checkpoints(),
            playback_time,
            self.config.checkpoint_tolerance,
        ) else {
            return TickOutcome::NoCheckpoint;
        };
        self.current_checkpoint = Some(index);
        self.current_user_landmarks.clear();
        self.current_user_landmarks.extend_from_slice(landmarks);

        let ratio = visible_ratio(landmarks, &KEY_JOINTS, self.config.presence_visibility);
        if ratio < self.config.presence_ratio {
            self.person_detected = false;
            return TickOutcome::PersonNotDetected;
        }
        self.person_detected = true;

        let target = &mesh.checkpoints()[index];
        let similarity = calculate_pose_similarity(landmarks, target.landmarks());
        self.last_similarity = Some(similarity);

        let event = ScoreEvent::from_similarity(similarity);
        if event.points == 0 {
            // 更新しないので次の観測ですぐ再挑戦できる
            return TickOutcome::NoPoints { similarity };
        }

        self.scoreboard.apply(&event);
        self.last_scored_time = playback_time;
        TickOutcome::Scored { event, similarity }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn mesh(&self) -> Option<&ActionMesh> {
        self.mesh.as_ref()
    }

    pub fn scoreboard(&self) -> &ScoreBoard {
        &self.scoreboard
    }

    pub fn last_scored_time(&self) -> f32 {
        self.last_scored_time
    }

    /// 直近の観測で見つかったチェックポイント
    pub fn current_checkpoint(&self) -> Option<&ActionMeshCheckpoint> {
        let index = self.current_checkpoint?;
        self.mesh.as_ref()?.checkpoints().get(index)
    }

    /// 直近の観測で採点対象になったユーザーのランドマーク
    pub fn current_user_landmarks(&self) -> Option<&[Landmark]> {
        if self.current_user_landmarks.is_empty() {
            None
        } else {
            Some(&self.current_user_landmarks)
        }
    }

    pub fn is_person_detected(&self) -> bool {
        self.person_detected
    }

    pub fn last_similarity(&self) -> Option<f32> {
        self.last_similarity
    }
}
