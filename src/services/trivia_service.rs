//! 题库接口服务
//!
//! 对应原有的各个接口：分类列表、题目分页、按分类查看、搜索、增删改、抽题。
//! 只返回响应结构体，不负责序列化和传输。

use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::category::to_category_map;
use crate::models::question::QuestionDraft;
use crate::models::responses::{
    CategoriesResponse, CategoryQuestionsResponse, CreatedResponse, DeletedResponse,
    QuestionListResponse, QuizResponse, SearchResponse, UpdatedResponse,
};
use crate::models::{CategoryId, NewQuestion, Question, QuestionId, QuizRequest, QuizScope};
use crate::services::paginator::Paginator;
use crate::services::quiz_selector::{QuizOutcome, QuizSelector};
use crate::store::QuestionStore;

/// 题库接口服务
#[derive(Clone)]
pub struct TriviaService {
    store: Arc<dyn QuestionStore>,
    paginator: Paginator,
    selector: QuizSelector,
}

impl TriviaService {
    pub fn new(store: Arc<dyn QuestionStore>, paginator: Paginator) -> Self {
        Self {
            store,
            paginator,
            selector: QuizSelector::new(),
        }
    }

    pub fn store(&self) -> &dyn QuestionStore {
        self.store.as_ref()
    }

    fn page_of(&self, items: &[Question], page: i64) -> Vec<Question> {
        self.paginator.paginate(items, page).to_vec()
    }

    /// 全部分类
    pub fn list_categories(&self) -> AppResult<CategoriesResponse> {
        let categories = self.store.list_categories()?;
        if categories.is_empty() {
            return Err(AppError::not_found("categories"));
        }

        Ok(CategoriesResponse {
            success: true,
            categories: to_category_map(&categories),
        })
    }

    /// 分页列出全部题目，附带分类映射
    ///
    /// 题目和分类是两次独立读取，不保证是同一时刻的快照
    pub fn list_questions(&self, page: i64) -> AppResult<QuestionListResponse> {
        let questions = self.store.list_questions()?;
        let current = self.page_of(&questions, page);
        let categories = self.store.list_categories()?;

        if current.is_empty() {
            return Err(AppError::not_found(format!("questions page {}", page)));
        }

        Ok(QuestionListResponse {
            success: true,
            questions: current,
            total_questions: questions.len(),
            categories: to_category_map(&categories),
        })
    }

    /// 指定分类下的题目
    pub fn questions_by_category(
        &self,
        category_id: CategoryId,
        page: i64,
    ) -> AppResult<CategoryQuestionsResponse> {
        let category = self
            .store
            .find_category(category_id)?
            .ok_or_else(|| AppError::not_found(format!("category {}", category_id)))?;

        let questions = self.store.list_questions_by_category(category.id)?;

        Ok(CategoryQuestionsResponse {
            success: true,
            questions: self.page_of(&questions, page),
            total_questions: self.store.count_questions()?,
            current_category: category.label,
        })
    }

    /// 按题干搜索
    pub fn search_questions(&self, term: &str, page: i64) -> AppResult<SearchResponse> {
        // 首尾空白参与匹配，只在判空时忽略
        if term.trim().is_empty() {
            return Err(AppError::bad_request("搜索词不能为空"));
        }

        let result = self.store.search_questions(term)?;
        debug!("搜索 {:?} 命中 {} 道题目", term, result.len());
        if result.is_empty() {
            return Err(AppError::not_found(format!("questions matching {:?}", term)));
        }

        Ok(SearchResponse {
            success: true,
            questions: self.page_of(&result, page),
            total_questions: self.store.count_questions()?,
        })
    }

    fn validate(&self, payload: &NewQuestion) -> AppResult<QuestionDraft> {
        let draft = payload.validate().map_err(AppError::unprocessable)?;
        if self.store.find_category(draft.category)?.is_none() {
            return Err(AppError::unprocessable(format!(
                "分类不存在: {}",
                draft.category
            )));
        }
        Ok(draft)
    }

    /// 新建题目
    pub fn create_question(&self, payload: &NewQuestion, page: i64) -> AppResult<CreatedResponse> {
        let draft = self.validate(payload)?;
        let created = self.store.insert_question(draft)?;
        info!("✓ 新增题目 #{}", created);

        let questions = self.store.list_questions()?;
        Ok(CreatedResponse {
            success: true,
            created,
            questions: self.page_of(&questions, page),
            total_questions: questions.len(),
        })
    }

    /// 整体替换题目
    pub fn replace_question(&self, id: QuestionId, payload: &NewQuestion) -> AppResult<UpdatedResponse> {
        if self.store.find_question(id)?.is_none() {
            return Err(AppError::not_found(format!("question {}", id)));
        }

        let draft = self.validate(payload)?;
        let question = self
            .store
            .replace_question(id, draft)?
            .ok_or_else(|| AppError::not_found(format!("question {}", id)))?;
        info!("✓ 替换题目 #{}", id);

        Ok(UpdatedResponse {
            success: true,
            question,
        })
    }

    /// 删除题目
    ///
    /// 题目不存在时返回 `Unprocessable`
    pub fn delete_question(&self, id: QuestionId, page: i64) -> AppResult<DeletedResponse> {
        if !self.store.delete_question(id)? {
            warn!("删除失败，题目 #{} 不存在", id);
            return Err(AppError::unprocessable(format!("题目不存在: {}", id)));
        }
        info!("✓ 删除题目 #{}", id);

        let questions = self.store.list_questions()?;
        Ok(DeletedResponse {
            success: true,
            deleted: id,
            questions: self.page_of(&questions, page),
            total_questions: questions.len(),
        })
    }

    /// 抽一道未出过的题
    ///
    /// # 参数
    /// - `request`: 已出题目 + 抽题分类（id 为 0 表示全部）
    /// - `rng`: 随机数生成器
    ///
    /// # 返回
    /// 题目耗尽时返回不带 `question` 的成功响应
    pub fn next_quiz_question<R: Rng + ?Sized>(
        &self,
        request: &QuizRequest,
        rng: &mut R,
    ) -> AppResult<QuizResponse> {
        let scope = request
            .scope()
            .ok_or_else(|| AppError::bad_request("缺少 quiz_category"))?;

        if let QuizScope::Category(id) = scope {
            if self.store.find_category(id)?.is_none() {
                return Err(AppError::not_found(format!("category {}", id)));
            }
        }

        let excluded: HashSet<QuestionId> = request.previous_questions.iter().copied().collect();
        let outcome = self.selector.draw(self.store.as_ref(), scope, &excluded, rng)?;

        if let QuizOutcome::Exhausted = outcome {
            debug!("{} 的题目已全部出过", scope);
        }

        Ok(QuizResponse {
            success: true,
            question: outcome.into_question(),
        })
    }
}
