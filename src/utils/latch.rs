use serde::Serialize;

/// One-way flag: starts released and, once engaged, stays engaged for the
/// rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Latch {
    engaged: bool,
}

impl Latch {
    pub fn new() -> Self {
        Latch { engaged: false }
    }

    /// Engages the latch. Returns `true` only on the call that flipped it.
    pub fn engage(&mut self) -> bool {
        let flipped = !self.engaged;
        self.engaged = true;
        flipped
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_starts_released() {
        assert!(!Latch::new().is_engaged());
    }

    #[test]
    fn test_latch_reports_first_engagement_only() {
        let mut latch = Latch::new();
        assert!(latch.engage());
        assert!(!latch.engage());
        assert!(latch.is_engaged());
    }
}
