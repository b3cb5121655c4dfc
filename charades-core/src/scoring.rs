use charades_types::{PerformanceTier, PlayerScore, PlayerSession, PlayerSummary};

pub struct ScoringEngine;

impl ScoringEngine {
    /// Share of answered words that were guessed. Zero when nothing was
    /// answered, so an idle turn never divides by zero.
    pub fn accuracy(score: u32, skipped_count: u32) -> f64 {
        let answered = score + skipped_count;
        if answered == 0 {
            0.0
        } else {
            f64::from(score) / f64::from(answered)
        }
    }

    /// Share of the whole dealt batch that was guessed, whether or not the
    /// player reached every word before the clock ran out.
    pub fn progress(score: u32, total: u32) -> f64 {
        if total == 0 {
            0.0
        } else {
            (f64::from(score) / f64::from(total)).min(1.0)
        }
    }

    pub fn accuracy_tier(accuracy: f64) -> PerformanceTier {
        Self::tier(accuracy, 0.8, 0.5)
    }

    pub fn progress_tier(progress: f64) -> PerformanceTier {
        Self::tier(progress, 0.7, 0.4)
    }

    fn tier(rate: f64, good: f64, fair: f64) -> PerformanceTier {
        if rate >= good {
            PerformanceTier::Good
        } else if rate >= fair {
            PerformanceTier::Fair
        } else {
            PerformanceTier::Poor
        }
    }

    pub fn player_score(player: &PlayerSession) -> PlayerScore {
        PlayerScore {
            player: player.name.clone(),
            score: player.score,
            total: player.turn_total,
            skipped_count: player.skipped_count,
        }
    }

    pub fn summarize(player: &PlayerSession) -> PlayerSummary {
        let accuracy = Self::accuracy(player.score, player.skipped_count);
        let progress = Self::progress(player.score, player.turn_total);

        PlayerSummary {
            player: player.name.clone(),
            score: player.score,
            total: player.turn_total,
            skipped_count: player.skipped_count,
            accuracy,
            accuracy_tier: Self::accuracy_tier(accuracy),
            progress,
            progress_tier: Self::progress_tier(progress),
            answered_words: player.answered_words.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charades_types::AnsweredWord;

    #[test]
    fn test_accuracy_zero_when_nothing_answered() {
        assert_eq!(ScoringEngine::accuracy(0, 0), 0.0);
    }

    #[test]
    fn test_accuracy_bounds() {
        for score in 0..15 {
            for skipped in 0..15 {
                let accuracy = ScoringEngine::accuracy(score, skipped);
                assert!((0.0..=1.0).contains(&accuracy));
                if score + skipped > 0 {
                    let expected = score as f64 / (score + skipped) as f64;
                    assert!((accuracy - expected).abs() < f64::EPSILON);
                }
            }
        }
        assert_eq!(ScoringEngine::accuracy(7, 3), 0.7);
        assert_eq!(ScoringEngine::accuracy(0, 4), 0.0);
        assert_eq!(ScoringEngine::accuracy(4, 0), 1.0);
    }

    #[test]
    fn test_progress_uses_full_batch() {
        // Clock ran out after 2 of 5 words, both guessed
        assert_eq!(ScoringEngine::accuracy(2, 0), 1.0);
        assert_eq!(ScoringEngine::progress(2, 5), 0.4);
        assert_eq!(ScoringEngine::progress(0, 0), 0.0);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(ScoringEngine::accuracy_tier(0.8), PerformanceTier::Good);
        assert_eq!(ScoringEngine::accuracy_tier(0.79), PerformanceTier::Fair);
        assert_eq!(ScoringEngine::accuracy_tier(0.5), PerformanceTier::Fair);
        assert_eq!(ScoringEngine::accuracy_tier(0.49), PerformanceTier::Poor);

        assert_eq!(ScoringEngine::progress_tier(0.7), PerformanceTier::Good);
        assert_eq!(ScoringEngine::progress_tier(0.4), PerformanceTier::Fair);
        assert_eq!(ScoringEngine::progress_tier(0.39), PerformanceTier::Poor);
    }

    #[test]
    fn test_summarize() {
        let mut player = PlayerSession::new("Mina");
        player.score = 7;
        player.skipped_count = 3;
        player.turn_total = 10;
        player.answered_words.push(AnsweredWord {
            word_value: "Gee".to_string(),
            was_correct: true,
        });

        let summary = ScoringEngine::summarize(&player);
        assert_eq!(summary.accuracy, 0.7);
        assert_eq!(summary.accuracy_tier, PerformanceTier::Fair);
        assert_eq!(summary.progress, 0.7);
        assert_eq!(summary.progress_tier, PerformanceTier::Good);
        assert_eq!(summary.answered_words.len(), 1);

        let score = ScoringEngine::player_score(&player);
        assert_eq!(score.total, 10);
        assert_eq!(score.skipped_count, 3);
    }
}
