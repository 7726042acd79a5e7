use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Totals for a finished quiz, shown on the completion screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizReport {
    pub asked: usize,
    pub correct: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl QuizReport {
    pub fn accuracy(&self) -> f64 {
        if self.asked == 0 {
            return 0.0;
        }
        self.correct as f64 / self.asked as f64 * 100.0
    }

    pub fn elapsed_secs(&self) -> f64 {
        let millis = (self.finished_at - self.started_at).num_milliseconds().max(0);
        millis as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[test]
    fn accuracy_percent() {
        let now = Utc::now();
        let report = QuizReport {
            asked: 4,
            correct: 3,
            started_at: now,
            finished_at: now + TimeDelta::seconds(30),
        };
        assert_eq!(report.accuracy(), 75.0);
        assert_eq!(report.elapsed_secs(), 30.0);
    }

    #[test]
    fn empty_report_has_zero_accuracy() {
        let now = Utc::now();
        let report = QuizReport { asked: 0, correct: 0, started_at: now, finished_at: now };
        assert_eq!(report.accuracy(), 0.0);
    }
}
