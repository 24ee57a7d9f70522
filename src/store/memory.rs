//! 内存题库

use std::collections::BTreeMap;
use std::sync::RwLock;

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::loaders::QuestionBank;
use crate::models::question::QuestionDraft;
use crate::models::{Category, CategoryId, Question, QuestionId};
use crate::store::QuestionStore;

#[derive(Debug, Default)]
struct Records {
    categories: BTreeMap<CategoryId, Category>,
    questions: BTreeMap<QuestionId, Question>,
    /// 下一个待分配的题目ID，删除后不复用
    next_id: QuestionId,
}

impl Records {
    /// 分配新ID；ID空间用尽时返回 `None`
    fn allocate_id(&mut self) -> Option<QuestionId> {
        let id = self.next_id.max(1);
        self.reserve_id(id)?;
        Some(id)
    }

    /// 保证之后分配的ID都大于 `id`
    fn reserve_id(&mut self, id: QuestionId) -> Option<()> {
        self.next_id = self.next_id.max(id.checked_add(1)?);
        Some(())
    }
}

/// 基于 `RwLock` 的内存题库
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Records>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从题库文件内容构建
    ///
    /// 先导入显式指定ID的题目，再为其余题目按文件顺序分配ID。
    /// 引用了未知分类、内容不合法、ID重复或超出范围的题目会被跳过。
    pub fn from_bank(bank: QuestionBank) -> Self {
        let mut records = Records::default();

        for category in bank.categories {
            records.categories.insert(category.id, category);
        }

        let (with_id, without_id): (Vec<_>, Vec<_>) =
            bank.questions.into_iter().partition(|q| q.id.is_some());

        for item in with_id.into_iter().chain(without_id) {
            let preview = crate::utils::logging::truncate_text(&item.question, 40);

            if !records.categories.contains_key(&item.category) {
                warn!("⚠️ 跳过题目（分类 {} 不存在）: {}", item.category, preview);
                continue;
            }

            let draft = match item.validate() {
                Ok(draft) => draft,
                Err(reason) => {
                    warn!("⚠️ 跳过题目（{}）: {}", reason, preview);
                    continue;
                }
            };

            let id = match item.id {
                Some(id) if records.questions.contains_key(&id) => {
                    warn!("⚠️ 跳过题目（ID {} 重复）: {}", id, preview);
                    continue;
                }
                Some(id) => records.reserve_id(id).map(|_| id),
                None => records.allocate_id(),
            };
            let Some(id) = id else {
                warn!("⚠️ 跳过题目（ID 超出范围）: {}", preview);
                continue;
            };

            records.questions.insert(id, draft.into_question(id));
        }

        debug!(
            "内存题库已构建: {} 个分类, {} 道题目",
            records.categories.len(),
            records.questions.len()
        );

        Self {
            records: RwLock::new(records),
        }
    }

    /// 添加分类（已存在时覆盖名称）
    pub fn upsert_category(&self, category: Category) -> AppResult<()> {
        let mut records = self.records.write()?;
        records.categories.insert(category.id, category);
        Ok(())
    }
}

fn search_pattern(term: &str) -> AppResult<Regex> {
    RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
        .map_err(|e| AppError::Store(format!("无法构建搜索表达式: {}", e)))
}

impl QuestionStore for InMemoryStore {
    fn list_questions(&self) -> AppResult<Vec<Question>> {
        let records = self.records.read()?;
        Ok(records.questions.values().cloned().collect())
    }

    fn list_questions_by_category(&self, category: CategoryId) -> AppResult<Vec<Question>> {
        let records = self.records.read()?;
        Ok(records
            .questions
            .values()
            .filter(|q| q.category == category)
            .cloned()
            .collect())
    }

    fn list_categories(&self) -> AppResult<Vec<Category>> {
        let records = self.records.read()?;
        Ok(records.categories.values().cloned().collect())
    }

    fn find_category(&self, id: CategoryId) -> AppResult<Option<Category>> {
        let records = self.records.read()?;
        Ok(records.categories.get(&id).cloned())
    }

    fn find_question(&self, id: QuestionId) -> AppResult<Option<Question>> {
        let records = self.records.read()?;
        Ok(records.questions.get(&id).cloned())
    }

    fn search_questions(&self, term: &str) -> AppResult<Vec<Question>> {
        let pattern = search_pattern(term)?;
        let records = self.records.read()?;
        Ok(records
            .questions
            .values()
            .filter(|q| q.matches(&pattern))
            .cloned()
            .collect())
    }

    fn insert_question(&self, draft: QuestionDraft) -> AppResult<QuestionId> {
        let mut records = self.records.write()?;
        let id = records
            .allocate_id()
            .ok_or_else(|| AppError::Store("题目ID已用尽".to_string()))?;
        records.questions.insert(id, draft.into_question(id));
        Ok(id)
    }

    fn replace_question(&self, id: QuestionId, draft: QuestionDraft) -> AppResult<Option<Question>> {
        let mut records = self.records.write()?;
        match records.questions.get_mut(&id) {
            Some(slot) => {
                *slot = draft.into_question(id);
                Ok(Some(slot.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete_question(&self, id: QuestionId) -> AppResult<bool> {
        let mut records = self.records.write()?;
        Ok(records.questions.remove(&id).is_some())
    }

    fn count_questions(&self) -> AppResult<usize> {
        let records = self.records.read()?;
        Ok(records.questions.len())
    }
}
