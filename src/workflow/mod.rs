pub mod quiz_session;

pub use quiz_session::{AnswerResult, QuizSession, SessionState};
