pub mod quiz;
pub mod result;

pub use quiz::{QuizSession, QuizStatus};
pub use result::QuizReport;
