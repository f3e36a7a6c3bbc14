use serde::{Deserialize, Serialize};

/// Narration speed used to turn words into seconds.
pub const WORDS_PER_MINUTE: u32 = 140;
/// Size of one billing bucket.
pub const SECONDS_PER_CREDIT: u32 = 40;

/// Derived figures shown next to the script while it is being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Estimate {
    pub word_count: u32,
    pub estimated_seconds: u32,
    pub credits: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimator {
    words_per_minute: u32,
    seconds_per_credit: u32,
}

impl Default for Estimator {
    fn default() -> Self {
        Self {
            words_per_minute: WORDS_PER_MINUTE,
            seconds_per_credit: SECONDS_PER_CREDIT,
        }
    }
}

impl Estimator {
    /// Zero rates fall back to the defaults so the arithmetic below never divides by zero.
    pub fn new(words_per_minute: u32, seconds_per_credit: u32) -> Self {
        let defaults = Self::default();
        Self {
            words_per_minute: if words_per_minute == 0 { defaults.words_per_minute } else { words_per_minute },
            seconds_per_credit: if seconds_per_credit == 0 { defaults.seconds_per_credit } else { seconds_per_credit },
        }
    }

    pub fn estimate(&self, text: &str) -> Estimate {
        let word_count = word_count(text);
        let estimated_seconds = self.seconds_for_words(word_count);
        Estimate {
            word_count,
            estimated_seconds,
            credits: self.credits_for_seconds(estimated_seconds),
        }
    }

    /// ceil(words / wpm * 60), in integers.
    pub fn seconds_for_words(&self, words: u32) -> u32 {
        let numerator = u64::from(words) * 60;
        let wpm = u64::from(self.words_per_minute);
        numerator.div_ceil(wpm) as u32
    }

    /// Credits are billed per started bucket.
    pub fn credits_for_seconds(&self, seconds: u32) -> u32 {
        if seconds == 0 {
            return 0;
        }
        (seconds - 1) / self.seconds_per_credit + 1
    }
}

pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["palavra"; n].join(" ")
    }

    #[test]
    fn test_word_count_ignores_extra_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("  uma   duas\ntrês\t"), 3);
    }

    #[test]
    fn test_empty_text_costs_nothing() {
        let estimate = Estimator::default().estimate("");
        assert_eq!(estimate, Estimate::default());
    }

    #[test]
    fn test_seconds_round_up() {
        let estimator = Estimator::default();
        assert_eq!(estimator.seconds_for_words(1), 1);
        assert_eq!(estimator.seconds_for_words(7), 3);
        assert_eq!(estimator.seconds_for_words(8), 4);
        assert_eq!(estimator.seconds_for_words(140), 60);
        assert_eq!(estimator.seconds_for_words(141), 61);
    }

    #[test]
    fn test_seconds_match_rate_for_many_counts() {
        let estimator = Estimator::default();
        for w in 0..2_000u32 {
            let seconds = estimator.seconds_for_words(w);
            // seconds is the smallest integer with seconds * 140 >= w * 60
            assert!(seconds * 140 >= w * 60, "w={}", w);
            if seconds > 0 {
                assert!((seconds - 1) * 140 < w * 60, "w={}", w);
            }
        }
    }

    #[test]
    fn test_credit_buckets() {
        let estimator = Estimator::default();
        assert_eq!(estimator.credits_for_seconds(0), 0);
        for s in 1..=40 {
            assert_eq!(estimator.credits_for_seconds(s), 1, "s={}", s);
        }
        for s in 41..=80 {
            assert_eq!(estimator.credits_for_seconds(s), 2, "s={}", s);
        }
        assert_eq!(estimator.credits_for_seconds(81), 3);
    }

    #[test]
    fn test_credits_are_monotonic() {
        let estimator = Estimator::default();
        let mut previous = 0;
        for s in 0..1_000 {
            let credits = estimator.credits_for_seconds(s);
            assert!(credits >= previous);
            previous = credits;
        }
    }

    #[test]
    fn test_estimate_of_script() {
        // 100 words -> ceil(6000 / 140) = 43s -> 2 credits
        let estimate = Estimator::default().estimate(&words(100));
        assert_eq!(
            estimate,
            Estimate { word_count: 100, estimated_seconds: 43, credits: 2 }
        );
    }

    #[test]
    fn test_custom_rates_and_zero_fallback() {
        let estimator = Estimator::new(60, 10);
        assert_eq!(estimator.seconds_for_words(5), 5);
        assert_eq!(estimator.credits_for_seconds(11), 2);
        assert_eq!(Estimator::new(0, 0), Estimator::default());
    }
}
