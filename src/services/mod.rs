pub mod paginator;
pub mod quiz_selector;
pub mod trivia_service;

pub use paginator::Paginator;
pub use quiz_selector::{select, QuizOutcome, QuizSelector};
pub use trivia_service::TriviaService;
