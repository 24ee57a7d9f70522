use serde::{Deserialize, Serialize};

use crate::models::category::CategoryId;

/// 题目ID（由题库分配，唯一且稳定）
pub type QuestionId = u32;

/// 题目
///
/// 序列化字段与接口返回的 JSON 一致：`{id, question, answer, category, difficulty}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: u8,
}

impl Question {
    /// 题干是否包含关键词（不区分大小写）
    pub fn matches(&self, pattern: &regex::Regex) -> bool {
        pattern.is_match(&self.question)
    }

    /// 判断作答是否正确
    ///
    /// 忽略首尾空白和大小写
    pub fn is_correct_answer(&self, answer: &str) -> bool {
        self.answer.trim().to_lowercase() == answer.trim().to_lowercase()
    }
}

/// 新建 / 整体替换题目时的请求体
///
/// 所有字段在反序列化层面都是可选的，缺失字段由 [`NewQuestion::validate`] 统一报告为
/// `Unprocessable`，而不是解析失败。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewQuestion {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_category_id")]
    pub category: Option<CategoryId>,
}

/// 校验通过的题目内容（尚未分配ID）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub answer: String,
    pub difficulty: u8,
    pub category: CategoryId,
}

impl QuestionDraft {
    /// 分配ID，生成完整题目
    pub fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// 难度上限
pub const MAX_DIFFICULTY: u8 = 5;

impl NewQuestion {
    /// 校验请求体
    ///
    /// # 返回
    /// 校验通过返回 [`QuestionDraft`]，否则返回第一条失败原因
    pub fn validate(&self) -> Result<QuestionDraft, String> {
        let question = required_text(self.question.as_deref(), "question")?;
        let answer = required_text(self.answer.as_deref(), "answer")?;

        let difficulty = self.difficulty.ok_or("缺少字段: difficulty")?;
        if !(1..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(format!(
                "difficulty 必须在 1..={} 之间，实际为 {}",
                MAX_DIFFICULTY, difficulty
            ));
        }

        let category = self.category.ok_or("缺少字段: category")?;

        Ok(QuestionDraft {
            question,
            answer,
            difficulty,
            category,
        })
    }
}

fn required_text(value: Option<&str>, field: &str) -> Result<String, String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        Some(_) => Err(format!("字段不能为空: {}", field)),
        None => Err(format!("缺少字段: {}", field)),
    }
}

// 分类ID既可能是整数，也可能是数字字符串（前端传的是 "3"）
fn deserialize_category_id<'de, D>(deserializer: D) -> Result<Option<CategoryId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct CategoryIdVisitor;

    impl<'de> Visitor<'de> for CategoryIdVisitor {
        type Value = Option<CategoryId>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a category id as integer or numeric string")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value
                .trim()
                .parse::<CategoryId>()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid category id: {:?}", value)))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            CategoryId::try_from(value)
                .map(Some)
                .map_err(|_| E::custom(format!("category id out of range: {}", value)))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            CategoryId::try_from(value)
                .map(Some)
                .map_err(|_| E::custom(format!("category id out of range: {}", value)))
        }
    }

    deserializer.deserialize_any(CategoryIdVisitor)
}
