/// Position within a play-through, for progress indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based position of the current question, or 0 before questions are loaded.
    pub position: usize,
    pub total: usize,
}

impl QuizProgress {
    #[must_use]
    pub fn new(position: usize, total: usize) -> Self {
        Self { position, total }
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.total > 0 && self.position == self.total
    }

    /// Fraction of the quiz reached, in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.position as f32 / self.total as f32
        }
    }
}
