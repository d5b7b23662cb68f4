pub mod flashcard;
pub mod language;
pub mod plan;
pub mod question;

pub use flashcard::Flashcard;
pub use language::{Difficulty, Language};
pub use plan::{PlanProgress, Schedule, StudyPlan};
pub use question::{PracticeQuestion, QuestionType};
