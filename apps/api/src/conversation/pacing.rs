use std::time::Duration;

use rand::Rng;

use crate::conversation::session::Pause;

/// Artificial delays used when revealing coach replies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    /// Before the first step of every reply script.
    pub processing: Duration,
    /// Base "typing" time before each coach message.
    pub typing: Duration,
    /// Upper bound of the random extra typing time.
    pub typing_jitter: Duration,
    pub phase_change: Duration,
    pub analysis_follow_up: Duration,
    pub recommendations_follow_up: Duration,
    pub action_plan_hold: Duration,
    pub closing: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            processing: Duration::from_millis(500),
            typing: Duration::from_millis(1000),
            typing_jitter: Duration::from_millis(1000),
            phase_change: Duration::from_millis(1500),
            analysis_follow_up: Duration::from_millis(3000),
            recommendations_follow_up: Duration::from_millis(4000),
            action_plan_hold: Duration::from_millis(5000),
            closing: Duration::from_millis(3000),
        }
    }
}

impl Pacing {
    /// No delays at all.
    #[cfg(test)]
    pub fn immediate() -> Self {
        Self {
            processing: Duration::ZERO,
            typing: Duration::ZERO,
            typing_jitter: Duration::ZERO,
            phase_change: Duration::ZERO,
            analysis_follow_up: Duration::ZERO,
            recommendations_follow_up: Duration::ZERO,
            action_plan_hold: Duration::ZERO,
            closing: Duration::ZERO,
        }
    }

    pub fn pause(&self, pause: Pause) -> Duration {
        match pause {
            Pause::PhaseChange => self.phase_change,
            Pause::AnalysisFollowUp => self.analysis_follow_up,
            Pause::RecommendationsFollowUp => self.recommendations_follow_up,
            Pause::ActionPlanHold => self.action_plan_hold,
            Pause::Closing => self.closing,
        }
    }

    /// `typing` plus a uniform random share of `typing_jitter`.
    pub fn typing_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let jitter_ms = self.typing_jitter.as_millis() as u64;
        self.typing + Duration::from_millis(rng.gen_range(0..=jitter_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_typing_delay_within_bounds() {
        let pacing = Pacing::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let delay = pacing.typing_delay(&mut rng);
            assert!(delay >= Duration::from_millis(1000));
            assert!(delay <= Duration::from_millis(2000));
        }
    }

    #[test]
    fn test_immediate_has_no_delay() {
        let pacing = Pacing::immediate();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pacing.typing_delay(&mut rng), Duration::ZERO);
        assert_eq!(pacing.pause(Pause::ActionPlanHold), Duration::ZERO);
    }

    #[test]
    fn test_pause_mapping() {
        let pacing = Pacing::default();
        assert_eq!(pacing.pause(Pause::PhaseChange), Duration::from_millis(1500));
        assert_eq!(
            pacing.pause(Pause::RecommendationsFollowUp),
            Duration::from_millis(4000)
        );
    }
}
