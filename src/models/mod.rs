pub mod category;
pub mod loaders;
pub mod question;
pub mod quiz;
pub mod responses;

pub use category::{Category, CategoryId, CategoryMap};
pub use loaders::{load_question_bank, QuestionBank};
pub use question::{NewQuestion, Question, QuestionId};
pub use quiz::{QuizCategory, QuizRequest, QuizScope};
