use chrono::{DateTime, Utc};

use crate::corpus::Corpus;
use crate::engine::{LearnedWord, QuizResults};
use crate::generator::{Question, Randomizer, questions_for};
use crate::session::result::QuizReport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizStatus {
    /// Nothing could be generated; the only way out is closing the quiz.
    NoQuestions,
    Asking,
    Answered,
    Complete,
}

#[derive(Clone, Debug)]
pub struct QuizSession {
    questions: Vec<Question>,
    index: usize,
    selected: Option<usize>,
    results: QuizResults,
    answers: Vec<bool>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            index: 0,
            selected: None,
            results: QuizResults::new(),
            answers: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Questions for every learned word, shuffled together.
    pub fn practice_all<R: Randomizer>(
        learned: &[LearnedWord],
        corpus: &Corpus,
        option_count: usize,
        rng: &mut R,
    ) -> Self {
        let mut questions: Vec<Question> = learned
            .iter()
            .flat_map(|word| questions_for(word, learned, corpus, option_count, rng))
            .collect();
        rng.shuffle(&mut questions);
        tracing::info!(words = learned.len(), questions = questions.len(), "practice quiz started");
        Self::new(questions)
    }

    /// Questions for a single word. Distractors still come from `learned`.
    pub fn targeted<R: Randomizer>(
        word: &LearnedWord,
        learned: &[LearnedWord],
        corpus: &Corpus,
        option_count: usize,
        rng: &mut R,
    ) -> Self {
        let mut questions = questions_for(word, learned, corpus, option_count, rng);
        rng.shuffle(&mut questions);
        tracing::info!(arabic = %word.arabic, questions = questions.len(), "targeted quiz started");
        Self::new(questions)
    }

    pub fn status(&self) -> QuizStatus {
        if self.questions.is_empty() {
            QuizStatus::NoQuestions
        } else if self.index >= self.questions.len() {
            QuizStatus::Complete
        } else if self.selected.is_some() {
            QuizStatus::Answered
        } else {
            QuizStatus::Asking
        }
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        let answered = self.index + usize::from(self.selected.is_some());
        (answered as f64 / self.questions.len() as f64).min(1.0)
    }

    /// Records the answer at `option` for the current question. Returns
    /// whether it was correct, or `None` once the question is locked.
    pub fn select_answer(&mut self, option: usize) -> Option<bool> {
        if self.status() != QuizStatus::Asking {
            return None;
        }
        let question = self.questions.get(self.index)?;
        let answer = question.options.get(option)?;
        let correct = question.is_correct(answer);
        self.results.record(question.key(), correct);
        self.answers.push(correct);
        self.selected = Some(option);
        Some(correct)
    }

    /// Moves past an answered question. After the last one the session's
    /// results are handed back for merging, exactly once.
    pub fn advance(&mut self) -> Option<QuizResults> {
        if self.status() != QuizStatus::Answered {
            return None;
        }
        self.index += 1;
        self.selected = None;
        if self.index < self.questions.len() {
            return None;
        }
        self.finished_at = Some(Utc::now());
        let results = std::mem::take(&mut self.results);
        tracing::info!(
            answered = self.answers.len(),
            correct = self.answers.iter().filter(|c| **c).count(),
            "quiz complete"
        );
        Some(results)
    }

    /// Ends the session early. Answers given so far are dropped.
    pub fn abandon(self) {
        if self.status() != QuizStatus::Complete {
            tracing::debug!(answered = self.answers.len(), "quiz abandoned");
        }
    }

    pub fn report(&self) -> Option<QuizReport> {
        self.finished_at.map(|finished_at| QuizReport {
            asked: self.answers.len(),
            correct: self.answers.iter().filter(|c| **c).count(),
            started_at: self.started_at,
            finished_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{FixedOrder, QuestionKind};

    fn learned_all(corpus: &Corpus) -> Vec<LearnedWord> {
        corpus
            .rules
            .iter()
            .flat_map(|rule| rule.examples.iter().map(move |ex| LearnedWord::snapshot(ex, rule)))
            .collect()
    }

    fn question(arabic: &str, correct: &str) -> Question {
        Question {
            kind: QuestionKind::Vocabulary,
            word: LearnedWord {
                arabic: arabic.into(),
                translation: correct.into(),
                rule: String::new(),
                surah: "Al-Fatihah".into(),
                ayah: 1,
                explanation: String::new(),
            },
            prompt: format!("What does \"{arabic}\" mean?"),
            options: vec!["wrong".into(), correct.into()],
            correct_answer: correct.into(),
        }
    }

    #[test]
    fn empty_session_is_terminal() {
        let mut quiz = QuizSession::new(Vec::new());
        assert_eq!(quiz.status(), QuizStatus::NoQuestions);
        assert_eq!(quiz.select_answer(0), None);
        assert_eq!(quiz.advance(), None);
        assert_eq!(quiz.progress(), 0.0);
    }

    #[test]
    fn answer_locks_question() {
        let mut quiz = QuizSession::new(vec![question("a", "one")]);
        assert_eq!(quiz.select_answer(1), Some(true));
        assert_eq!(quiz.status(), QuizStatus::Answered);
        assert_eq!(quiz.select_answer(0), None);
        assert_eq!(quiz.selected(), Some(1));
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let mut quiz = QuizSession::new(vec![question("a", "one")]);
        assert_eq!(quiz.select_answer(7), None);
        assert_eq!(quiz.status(), QuizStatus::Asking);
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut quiz = QuizSession::new(vec![question("a", "one"), question("b", "two")]);
        assert_eq!(quiz.advance(), None);
        assert_eq!(quiz.index(), 0);
    }

    #[test]
    fn results_emitted_once_at_end() {
        let mut quiz =
            QuizSession::new(vec![question("a", "one"), question("a", "one"), question("b", "two")]);
        quiz.select_answer(1);
        assert_eq!(quiz.advance(), None);
        quiz.select_answer(0);
        assert_eq!(quiz.advance(), None);
        assert!((quiz.progress() - 2.0 / 3.0).abs() < 1e-9);
        quiz.select_answer(1);
        let results = quiz.advance().unwrap();
        assert_eq!(results.get("a"), Some(&[true, false][..]));
        assert_eq!(results.get("b"), Some(&[true][..]));
        assert_eq!(quiz.status(), QuizStatus::Complete);
        assert_eq!(quiz.advance(), None);
        assert_eq!(quiz.progress(), 1.0);

        let report = quiz.report().unwrap();
        assert_eq!((report.asked, report.correct), (3, 2));
    }

    #[test]
    fn practice_all_covers_every_word() {
        let corpus = Corpus::bundled().unwrap();
        let learned = learned_all(&corpus);
        let quiz = QuizSession::practice_all(&learned, &corpus, 4, &mut FixedOrder::default());
        // Seven word-order examples get three questions, three article examples two.
        assert_eq!(quiz.len(), 7 * 3 + 3 * 2);
        assert_eq!(quiz.status(), QuizStatus::Asking);
    }

    #[test]
    fn targeted_only_asks_about_one_word() {
        let corpus = Corpus::bundled().unwrap();
        let learned = learned_all(&corpus);
        let mut quiz = QuizSession::targeted(&learned[4], &learned, &corpus, 4, &mut FixedOrder::default());
        assert_eq!(quiz.len(), 3);
        while quiz.status() == QuizStatus::Asking {
            let answer = quiz
                .current()
                .and_then(|q| q.options.iter().position(|o| *o == q.correct_answer))
                .unwrap();
            quiz.select_answer(answer);
            if let Some(results) = quiz.advance() {
                assert_eq!(results.keys().collect::<Vec<_>>(), vec![learned[4].arabic.as_str()]);
                assert_eq!(results.get(&learned[4].arabic), Some(&[true, true, true][..]));
            }
        }
        assert_eq!(quiz.status(), QuizStatus::Complete);
    }

    #[test]
    fn targeted_with_nothing_to_ask() {
        let corpus = Corpus::bundled().unwrap();
        let rule = &corpus.rules[2];
        let word = LearnedWord::snapshot(&rule.examples[0], rule);
        let empty = Corpus { rules: Vec::new() };
        let quiz = QuizSession::targeted(
            &word,
            std::slice::from_ref(&word),
            &empty,
            4,
            &mut FixedOrder::default(),
        );
        assert_eq!(quiz.status(), QuizStatus::NoQuestions);
        quiz.abandon();
    }
}
