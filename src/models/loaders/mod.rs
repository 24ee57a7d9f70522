pub mod toml_loader;

pub use toml_loader::{load_question_bank, load_toml_to_question_bank, BankQuestion, QuestionBank};
