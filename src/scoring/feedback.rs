use std::fmt;

/// 類似度に対する評価
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    Perfect,
    Great,
    Good,
    Almost,
    KeepTrying,
}

/// (類似度の下限, 評価)。上から順に判定する
const TIERS: [(f32, Feedback); 4] = [
    (90.0, Feedback::Perfect),
    (75.0, Feedback::Great),
    (50.0, Feedback::Good),
    (30.0, Feedback::Almost),
];

impl Feedback {
    pub fn from_similarity(similarity: f32) -> Self {
        TIERS
            .iter()
            .find(|(threshold, _)| similarity >= *threshold)
            .map(|&(_, feedback)| feedback)
            .unwrap_or(Feedback::KeepTrying)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Feedback::Perfect => "Perfect",
            Feedback::Great => "Great",
            Feedback::Good => "Good",
            Feedback::Almost => "Almost",
            Feedback::KeepTrying => "Keep trying",
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            Feedback::Perfect => 100,
            Feedback::Great => 60,
            Feedback::Good => 30,
            Feedback::Almost => 10,
            Feedback::KeepTrying => 0,
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 1回の採点結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEvent {
    pub points: u32,
    pub feedback: Feedback,
}

impl ScoreEvent {
    pub fn from_similarity(similarity: f32) -> Self {
        let feedback = Feedback::from_similarity(similarity);
        Self {
            points: feedback.points(),
            feedback,
        }
    }
}

/// 類似度を (ラベル, 得点) に変換
pub fn get_score_feedback(similarity: f32) -> (&'static str, u32) {
    let feedback = Feedback::from_similarity(similarity);
    (feedback.label(), feedback.points())
}
