use std::collections::HashMap;

/// Per-voice debounce state: each voice (a grid cell, a string)
/// stays busy until a monotonic millisecond timestamp.
#[derive(Debug, Default, Clone)]
pub struct VoiceScheduler {
    busy_until: HashMap<usize, u64>,
}

impl VoiceScheduler {
    pub fn new() -> VoiceScheduler {
        VoiceScheduler::default()
    }

    pub fn is_busy(&self, voice: usize, now_ms: u64) -> bool {
        self.busy_until.get(&voice)
            .map_or(false, |&until| now_ms < until)
    }

    /// Claim a voice for `hold_ms`. Returns false, leaving the
    /// voice untouched, while an earlier claim is still sounding.
    pub fn try_claim(&mut self, voice: usize, now_ms: u64, hold_ms: u64) -> bool {
        if self.is_busy(voice, now_ms) {
            return false;
        }
        self.busy_until.insert(voice, now_ms.saturating_add(hold_ms));
        true
    }

    pub fn release(&mut self, voice: usize) {
        self.busy_until.remove(&voice);
    }

    pub fn clear(&mut self) {
        self.busy_until.clear();
    }

    /// Voices still sounding at `now_ms`, in ascending order.
    pub fn active(&self, now_ms: u64) -> Vec<usize> {
        let mut voices: Vec<usize> = self.busy_until.iter()
            .filter(|&(_, &until)| now_ms < until)
            .map(|(&voice, _)| voice)
            .collect();
        voices.sort_unstable();
        voices
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_debounce() {
        let mut sched = VoiceScheduler::new();
        assert!(sched.try_claim(0, 1000, 500));
        assert!(!sched.try_claim(0, 1200, 500));
        assert!(sched.is_busy(0, 1499));
        assert!(!sched.is_busy(0, 1500));
        assert!(sched.try_claim(0, 1500, 500));
    }

    #[test]
    fn test_voices_are_independent() {
        let mut sched = VoiceScheduler::new();
        assert!(sched.try_claim(0, 0, 1000));
        assert!(sched.try_claim(4, 10, 1000));
        assert_eq!(sched.active(20), vec![0, 4]);

        sched.release(0);
        assert!(sched.try_claim(0, 30, 1000));

        sched.clear();
        assert!(sched.active(40).is_empty());
    }
}
