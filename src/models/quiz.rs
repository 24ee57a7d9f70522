use serde::{Deserialize, Serialize};

use crate::models::category::CategoryId;
use crate::models::question::QuestionId;

/// 代表"全部分类"的分类ID
pub const ALL_CATEGORIES_ID: CategoryId = 0;

/// 抽题范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizScope {
    /// 全部题目
    All,
    /// 指定分类
    Category(CategoryId),
}

impl QuizScope {
    /// 从接口传入的分类ID解析（0 表示全部）
    pub fn from_category_id(id: CategoryId) -> Self {
        if id == ALL_CATEGORIES_ID {
            QuizScope::All
        } else {
            QuizScope::Category(id)
        }
    }

    /// 题目是否属于该范围
    pub fn contains(&self, category: CategoryId) -> bool {
        match self {
            QuizScope::All => true,
            QuizScope::Category(id) => *id == category,
        }
    }
}

impl std::fmt::Display for QuizScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizScope::All => write!(f, "全部分类"),
            QuizScope::Category(id) => write!(f, "分类 #{}", id),
        }
    }
}

/// 请求体中的分类信息：`{"id": 3, "type": "Geography"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCategory {
    pub id: CategoryId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// 抽题请求
///
/// `previous_questions` 由调用方维护，每次请求都要完整传入
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<QuestionId>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

impl QuizRequest {
    pub fn new(scope: QuizScope, previous_questions: Vec<QuestionId>) -> Self {
        let id = match scope {
            QuizScope::All => ALL_CATEGORIES_ID,
            QuizScope::Category(id) => id,
        };
        Self {
            previous_questions,
            quiz_category: Some(QuizCategory { id, label: None }),
        }
    }

    /// 请求中的抽题范围，缺少分类信息时返回 `None`
    pub fn scope(&self) -> Option<QuizScope> {
        self.quiz_category
            .as_ref()
            .map(|c| QuizScope::from_category_id(c.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quiz_request() {
        let request: QuizRequest = serde_json::from_str(
            r#"{"previous_questions":[5,9],"quiz_category":{"id":0,"type":"click"}}"#,
        )
        .unwrap();
        assert_eq!(request.previous_questions, vec![5, 9]);
        assert_eq!(request.scope(), Some(QuizScope::All));

        let missing: QuizRequest = serde_json::from_str(r#"{"previous_questions":[]}"#).unwrap();
        assert_eq!(missing.scope(), None);
    }

    #[test]
    fn test_scope_contains() {
        assert!(QuizScope::All.contains(4));
        assert!(QuizScope::Category(3).contains(3));
        assert!(!QuizScope::Category(3).contains(4));
        assert_eq!(
            QuizRequest::new(QuizScope::Category(2), vec![]).scope(),
            Some(QuizScope::Category(2))
        );
    }
}
