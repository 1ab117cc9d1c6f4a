//! Deduction-based form scoring.

/// Score a frame starts from before deductions
pub const FULL_SCORE: u32 = 100;

/// Running form score for one frame.
///
/// Deductions accumulate without bound; the reported value is floored at 0.
#[derive(Debug, Clone, Default)]
pub struct FormScore {
    deductions: Vec<(&'static str, u32)>,
}

impl FormScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deduct(&mut self, reason: &'static str, points: u32) {
        self.deductions.push((reason, points));
    }

    pub fn total_deducted(&self) -> u32 {
        self.deductions.iter().map(|(_, points)| points).sum()
    }

    pub fn value(&self) -> u32 {
        FULL_SCORE.saturating_sub(self.total_deducted())
    }

    pub fn deductions(&self) -> &[(&'static str, u32)] {
        &self.deductions
    }

    pub fn is_clean(&self) -> bool {
        self.deductions.is_empty()
    }
}
