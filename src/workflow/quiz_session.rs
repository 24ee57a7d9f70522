//! 答题会话 - 流程层
//!
//! 抽题服务本身不记状态，会话状态（已出题目、得分、是否结束）由这里维护，
//! 每次抽题都把完整的已出题目列表交给服务。
//!
//! 状态转换：
//! - `Active --抽到题目--> Active`
//! - `Active --题目耗尽--> Finished`（终态）

use rand::Rng;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::{Question, QuestionId, QuizRequest, QuizScope};
use crate::services::TriviaService;

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Finished,
}

/// 作答结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerResult {
    Correct,
    /// 回答错误，附带正确答案
    Incorrect { expected: String },
    /// 当前没有待作答的题目
    NoPendingQuestion,
}

/// 答题会话
#[derive(Debug, Clone)]
pub struct QuizSession {
    scope: QuizScope,
    previous_questions: Vec<QuestionId>,
    current: Option<Question>,
    /// 已作答的题目数量（出题后退出的不算）
    answered: usize,
    score: usize,
    state: SessionState,
}

impl QuizSession {
    pub fn new(scope: QuizScope) -> Self {
        Self {
            scope,
            previous_questions: Vec::new(),
            current: None,
            answered: 0,
            score: 0,
            state: SessionState::Active,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// 已出过的题目数量
    pub fn asked(&self) -> usize {
        self.previous_questions.len()
    }

    pub fn answered(&self) -> usize {
        self.answered
    }

    /// 抽下一道题
    ///
    /// # 返回
    /// 抽到的题目；题目耗尽时会话进入 `Finished` 并返回 `None`，之后再调用不会请求服务
    pub fn next_question<R: Rng + ?Sized>(
        &mut self,
        service: &TriviaService,
        rng: &mut R,
    ) -> AppResult<Option<&Question>> {
        if self.is_finished() {
            return Ok(None);
        }

        let request = QuizRequest::new(self.scope, self.previous_questions.clone());
        let response = service.next_quiz_question(&request, rng)?;

        match response.question {
            Some(question) => {
                debug!("第 {} 题: #{}", self.previous_questions.len() + 1, question.id);
                self.previous_questions.push(question.id);
                self.current = Some(question);
                Ok(self.current.as_ref())
            }
            None => {
                info!(
                    "🏁 {} 题目已全部完成，共 {} 题，答对 {} 题",
                    self.scope,
                    self.previous_questions.len(),
                    self.score
                );
                self.current = None;
                self.state = SessionState::Finished;
                Ok(None)
            }
        }
    }

    /// 回答当前题目
    ///
    /// 每道题只能作答一次，作答后需要调用 [`QuizSession::next_question`]
    pub fn answer(&mut self, answer: &str) -> AnswerResult {
        let Some(question) = self.current.take() else {
            return AnswerResult::NoPendingQuestion;
        };
        self.answered += 1;

        if question.is_correct_answer(answer) {
            self.score += 1;
            AnswerResult::Correct
        } else {
            AnswerResult::Incorrect {
                expected: question.answer,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::loaders::{BankQuestion, QuestionBank};
    use crate::models::Category;
    use crate::services::Paginator;
    use crate::store::InMemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn service() -> TriviaService {
        let bank = QuestionBank {
            categories: vec![
                Category { id: 1, label: "Science".into() },
                Category { id: 2, label: "History".into() },
            ],
            questions: (1..=7)
                .map(|i| BankQuestion {
                    id: None,
                    question: format!("q{}", i),
                    answer: format!("a{}", i),
                    difficulty: 2,
                    category: if i <= 4 { 1 } else { 2 },
                })
                .collect(),
            file_path: None,
        };
        TriviaService::new(Arc::new(InMemoryStore::from_bank(bank)), Paginator::default())
    }

    #[test]
    fn test_session_visits_each_question_then_finishes() {
        let service = service();
        let mut rng = StdRng::seed_from_u64(99);
        let mut session = QuizSession::new(QuizScope::Category(1));
        let mut seen = HashSet::new();

        while let Some(question) = session.next_question(&service, &mut rng).unwrap() {
            assert_eq!(question.category, 1);
            let id = question.id;
            let answer = question.answer.clone();
            assert!(seen.insert(id));
            assert_eq!(session.answer(&answer), AnswerResult::Correct);
        }

        assert_eq!(seen.len(), 4);
        assert_eq!(session.score(), 4);
        assert_eq!(session.asked(), 4);
        assert_eq!(session.answered(), 4);
        assert_eq!(session.state(), SessionState::Finished);

        // 终态之后不再抽题
        assert!(session.next_question(&service, &mut rng).unwrap().is_none());
        assert_eq!(session.asked(), 4);
    }

    #[test]
    fn test_answer_without_question() {
        let service = service();
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = QuizSession::new(QuizScope::All);
        assert_eq!(session.answer("x"), AnswerResult::NoPendingQuestion);

        session.next_question(&service, &mut rng).unwrap();
        assert!(matches!(session.answer("wrong"), AnswerResult::Incorrect { .. }));
        assert_eq!(session.answer("again"), AnswerResult::NoPendingQuestion);
        assert_eq!(session.score(), 0);
        assert_eq!(session.answered(), 1);
        assert_eq!(session.state(), SessionState::Active);
    }

    #[test]
    fn test_pending_question_is_not_counted_as_answered() {
        let service = service();
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = QuizSession::new(QuizScope::Category(2));

        let answer = session
            .next_question(&service, &mut rng)
            .unwrap()
            .map(|q| q.answer.clone())
            .unwrap();
        assert_eq!(session.answer(&answer), AnswerResult::Correct);

        session.next_question(&service, &mut rng).unwrap();
        assert_eq!(session.asked(), 2);
        assert_eq!(session.answered(), 1);
        assert_eq!(session.score(), 1);
    }
}
