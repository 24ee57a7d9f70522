//! 题库层
//!
//! 持有题目和分类数据，对上层只暴露查询与增删改能力。
//! 所有列表接口返回按题目ID升序排列的快照，调用方拿到的数据不会随后续写入变化；
//! 两次独立读取之间不保证一致。

pub mod memory;

pub use memory::InMemoryStore;

use crate::error::AppResult;
use crate::models::question::QuestionDraft;
use crate::models::{Category, CategoryId, Question, QuestionId};

/// 题库接口
pub trait QuestionStore: Send + Sync {
    /// 全部题目
    fn list_questions(&self) -> AppResult<Vec<Question>>;

    /// 指定分类下的题目
    fn list_questions_by_category(&self, category: CategoryId) -> AppResult<Vec<Question>>;

    /// 全部分类
    fn list_categories(&self) -> AppResult<Vec<Category>>;

    fn find_category(&self, id: CategoryId) -> AppResult<Option<Category>>;

    fn find_question(&self, id: QuestionId) -> AppResult<Option<Question>>;

    /// 题干包含 `term` 的题目（不区分大小写的子串匹配）
    fn search_questions(&self, term: &str) -> AppResult<Vec<Question>>;

    /// 新增题目，返回分配的ID
    fn insert_question(&self, draft: QuestionDraft) -> AppResult<QuestionId>;

    /// 整体替换题目，题目不存在时返回 `None`
    fn replace_question(&self, id: QuestionId, draft: QuestionDraft) -> AppResult<Option<Question>>;

    /// 删除题目，返回是否删除成功
    fn delete_question(&self, id: QuestionId) -> AppResult<bool>;

    fn count_questions(&self) -> AppResult<usize>;
}
