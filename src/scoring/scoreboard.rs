use super::feedback::{Feedback, ScoreEvent};

/// フィードバック未受信時の表示
pub const READY_LABEL: &str = "Ready";

/// セッションの累積スコア
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    total: u32,
    feedback: Option<Feedback>,
    last_run: Option<u32>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &ScoreEvent) {
        self.total = self.total.saturating_add(event.points);
        self.feedback = Some(event.feedback);
    }

    /// 再生終了時に呼ぶ。現在の合計を前回スコアとして残す
    pub fn reset(&mut self) {
        self.last_run = Some(self.total);
        self.total = 0;
        self.feedback = None;
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn feedback_label(&self) -> &'static str {
        self.feedback.map_or(READY_LABEL, |f| f.label())
    }

    pub fn last_run(&self) -> Option<u32> {
        self.last_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let board = ScoreBoard::new();
        assert_eq!(board.total(), 0);
        assert_eq!(board.feedback_label(), "Ready");
        assert_eq!(board.last_run(), None);
    }

    #[test]
    fn test_apply_accumulates() {
        let mut board = ScoreBoard::new();
        board.apply(&ScoreEvent::from_similarity(95.0));
        board.apply(&ScoreEvent::from_similarity(60.0));
        assert_eq!(board.total(), 130);
        assert_eq!(board.feedback(), Some(Feedback::Good));
        assert_eq!(board.feedback_label(), "Good");
    }

    #[test]
    fn test_reset_keeps_last_run() {
        let mut board = ScoreBoard::new();
        board.apply(&ScoreEvent::from_similarity(95.0));
        board.reset();
        assert_eq!(board.total(), 0);
        assert_eq!(board.feedback_label(), "Ready");
        assert_eq!(board.last_run(), Some(100));

        board.reset();
        assert_eq!(board.last_run(), Some(0));
    }

    #[test]
    fn test_saturating_total() {
        let mut board = ScoreBoard::new();
        board.total = u32::MAX - 10;
        board.apply(&ScoreEvent::from_similarity(95.0));
        assert_eq!(board.total(), u32::MAX);
    }
}
