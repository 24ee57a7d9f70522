//! 抽题服务 - 业务能力层
//!
//! 从候选题目中随机抽取一道未出过的题，或者报告题目已耗尽。
//!
//! 职责：
//! - 先过滤出可抽题目，再做一次均匀随机抽取
//! - 不保存任何会话状态，已出题目由调用方每次传入
//! - 已出题目中不属于当前候选集的ID直接忽略

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::AppResult;
use crate::models::{Question, QuestionId, QuizScope};
use crate::store::QuestionStore;

/// 抽题结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    /// 抽到一道新题
    Question(Question),
    /// 候选题目已全部出过
    Exhausted,
}

impl QuizOutcome {
    pub fn into_question(self) -> Option<Question> {
        match self {
            QuizOutcome::Question(q) => Some(q),
            QuizOutcome::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, QuizOutcome::Exhausted)
    }
}

/// 从候选集中抽取一道不在 `excluded` 中的题目
///
/// # 参数
/// - `candidates`: 当前范围内的候选题目（ID 不重复）
/// - `excluded`: 已出过的题目ID，可以包含其他范围的ID
/// - `rng`: 随机数生成器
///
/// # 返回
/// 可抽题目为空时返回 [`QuizOutcome::Exhausted`]，否则每道可抽题目的概率均为 `1/|eligible|`
pub fn select<R: Rng + ?Sized>(
    candidates: &[Question],
    excluded: &HashSet<QuestionId>,
    rng: &mut R,
) -> QuizOutcome {
    let eligible: Vec<&Question> = candidates
        .iter()
        .filter(|q| !excluded.contains(&q.id))
        .collect();

    debug!(
        "候选题目 {} 道, 已排除 {} 个ID, 可抽 {} 道",
        candidates.len(),
        excluded.len(),
        eligible.len()
    );

    match eligible.choose(rng) {
        Some(question) => QuizOutcome::Question((*question).clone()),
        None => QuizOutcome::Exhausted,
    }
}

/// 抽题服务
///
/// 按范围从题库取候选集，然后调用 [`select`]
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizSelector;

impl QuizSelector {
    pub fn new() -> Self {
        Self
    }

    /// 候选集：全部题目或指定分类下的题目
    pub fn candidates(&self, store: &dyn QuestionStore, scope: QuizScope) -> AppResult<Vec<Question>> {
        match scope {
            QuizScope::All => store.list_questions(),
            QuizScope::Category(id) => store.list_questions_by_category(id),
        }
    }

    /// 在指定范围内抽一道题
    pub fn draw<R: Rng + ?Sized>(
        &self,
        store: &dyn QuestionStore,
        scope: QuizScope,
        excluded: &HashSet<QuestionId>,
        rng: &mut R,
    ) -> AppResult<QuizOutcome> {
        let candidates = self.candidates(store, scope)?;
        let outcome = select(&candidates, excluded, rng);
        if let QuizOutcome::Question(question) = &outcome {
            debug_assert!(
                scope.contains(question.category),
                "抽到范围外的题目 #{}",
                question.id
            );
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;
    use crate::models::question::QuestionDraft;
    use crate::models::Category;
    use crate::store::InMemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn question(id: QuestionId, category: CategoryId) -> Question {
        Question {
            id,
            question: format!("question {}", id),
            answer: format!("answer {}", id),
            category,
            difficulty: 1,
        }
    }

    fn excluded(ids: &[QuestionId]) -> HashSet<QuestionId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_single_remaining_candidate_is_always_chosen() {
        let candidates = vec![question(1, 3), question(2, 3), question(3, 3)];
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let outcome = select(&candidates, &excluded(&[1, 2]), &mut rng);
            assert_eq!(outcome.into_question().map(|q| q.id), Some(3));
        }
        assert!(select(&candidates, &excluded(&[1, 2, 3]), &mut rng).is_exhausted());
    }

    #[test]
    fn test_empty_candidates_are_exhausted() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select(&[], &excluded(&[]), &mut rng).is_exhausted());
        assert!(select(&[], &excluded(&[1, 2, 3]), &mut rng).is_exhausted());
    }

    #[test]
    fn test_foreign_ids_do_not_cause_early_exhaustion() {
        // 已出题目数量等于候选数量，但都来自其他分类
        let candidates = vec![question(1, 3), question(2, 3)];
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = select(&candidates, &excluded(&[40, 41]), &mut rng);
        assert!(!outcome.is_exhausted());

        // 混合：一个本分类的ID + 一个外来ID，只剩下 2 号题
        let outcome = select(&candidates, &excluded(&[1, 99]), &mut rng);
        assert_eq!(outcome.into_question().map(|q| q.id), Some(2));
    }

    #[test]
    fn test_coverage_visits_every_candidate_once() {
        let candidates: Vec<Question> = (1..=12).map(|id| question(id, 1)).collect();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut seen = HashSet::new();
            let mut draws = 0;

            while let QuizOutcome::Question(q) = select(&candidates, &seen, &mut rng) {
                assert!(seen.insert(q.id), "题目 {} 重复出现", q.id);
                draws += 1;
                assert!(draws <= candidates.len());
            }

            assert_eq!(draws, candidates.len());
            assert_eq!(seen.len(), candidates.len());
        }
    }

    #[test]
    fn test_selection_is_roughly_uniform() {
        let candidates: Vec<Question> = (1..=4).map(|id| question(id, 1)).collect();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<QuestionId, usize> = HashMap::new();

        for _ in 0..4000 {
            if let QuizOutcome::Question(q) = select(&candidates, &excluded(&[4]), &mut rng) {
                *counts.entry(q.id).or_default() += 1;
            }
        }

        assert!(!counts.contains_key(&4));
        for id in 1..=3 {
            let n = counts[&id];
            assert!((1100..=1570).contains(&n), "题目 {} 被抽中 {} 次", id, n);
        }
    }

    #[test]
    fn test_draw_respects_scope() {
        let store = InMemoryStore::new();
        for (id, label) in [(1, "Science"), (2, "Art")] {
            store
                .upsert_category(Category { id, label: label.into() })
                .unwrap();
        }
        for i in 0..10 {
            store
                .insert_question(QuestionDraft {
                    question: format!("q{}", i),
                    answer: "a".into(),
                    difficulty: 2,
                    category: if i % 2 == 0 { 1 } else { 2 },
                })
                .unwrap();
        }

        let selector = QuizSelector::new();
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = HashSet::new();
        while let QuizOutcome::Question(q) = selector
            .draw(&store, QuizScope::Category(2), &seen, &mut rng)
            .unwrap()
        {
            assert_eq!(q.category, 2);
            seen.insert(q.id);
        }
        assert_eq!(seen.len(), 5);

        // 换到全部范围时，之前的ID仍然有效，只剩分类 1 的题
        let outcome = selector.draw(&store, QuizScope::All, &seen, &mut rng).unwrap();
        assert_eq!(outcome.into_question().map(|q| q.category), Some(1));

        let outcome = selector
            .draw(&store, QuizScope::Category(77), &HashSet::new(), &mut rng)
            .unwrap();
        assert!(outcome.is_exhausted());
    }
}
