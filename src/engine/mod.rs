pub mod navigation;
pub mod progress;
pub mod results;
pub mod state;

pub use navigation::{Cursor, IntroOffer, NavAction, Phase};
pub use progress::{LearnedWord, ProgressTracker};
pub use results::{Performance, QuizResults};
pub use state::{Action, LearnerState};
