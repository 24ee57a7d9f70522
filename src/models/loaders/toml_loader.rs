use crate::models::category::{Category, CategoryId};
use crate::models::question::{NewQuestion, QuestionDraft, QuestionId};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 题库文件中的一道题
///
/// 未填写 `id` 的题目由题库在导入时分配
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankQuestion {
    #[serde(default)]
    pub id: Option<QuestionId>,
    pub question: String,
    pub answer: String,
    pub difficulty: u8,
    pub category: CategoryId,
}

impl BankQuestion {
    /// 按新建题目的规则校验（文本非空，难度在范围内）
    pub fn validate(&self) -> std::result::Result<QuestionDraft, String> {
        NewQuestion {
            question: Some(self.question.clone()),
            answer: Some(self.answer.clone()),
            difficulty: Some(self.difficulty),
            category: Some(self.category),
        }
        .validate()
    }
}

/// 题库文件
///
/// ```toml
/// [[categories]]
/// id = 1
/// type = "Science"
///
/// [[questions]]
/// question = "What is the heaviest organ in the human body?"
/// answer = "The Liver"
/// difficulty = 4
/// category = 1
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionBank {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub questions: Vec<BankQuestion>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl QuestionBank {
    /// 合并另一个题库（分类按ID去重，先出现的优先）
    pub fn merge(&mut self, other: QuestionBank) {
        let known: HashSet<CategoryId> = self.categories.iter().map(|c| c.id).collect();
        self.categories
            .extend(other.categories.into_iter().filter(|c| !known.contains(&c.id)));
        self.questions.extend(other.questions);
    }

    /// 检查题库内容
    ///
    /// - 分类ID不能重复，且不能使用保留的 0
    /// - 显式指定的题目ID不能重复，也不能是 `QuestionId::MAX`
    /// - 每道题都要满足新建题目的校验规则
    pub fn check(&self) -> Result<()> {
        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if category.id == crate::models::quiz::ALL_CATEGORIES_ID {
                anyhow::bail!("分类ID 0 为保留值: {}", category.label);
            }
            if !category_ids.insert(category.id) {
                anyhow::bail!("分类ID重复: {}", category.id);
            }
        }

        let mut question_ids = HashSet::new();
        for (index, question) in self.questions.iter().enumerate() {
            if let Err(reason) = question.validate() {
                anyhow::bail!("第 {} 道题目无效: {}", index + 1, reason);
            }

            let Some(id) = question.id else { continue };
            if id == QuestionId::MAX {
                anyhow::bail!("题目ID超出范围: {}", id);
            }
            if !question_ids.insert(id) {
                anyhow::bail!("题目ID重复: {}", id);
            }
        }

        Ok(())
    }
}

/// 从 TOML 文件加载题库
pub async fn load_toml_to_question_bank(toml_file_path: &Path) -> Result<QuestionBank> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let mut bank: QuestionBank = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    bank.file_path = Some(toml_file_path.to_string_lossy().to_string());

    Ok(bank)
}

/// 加载题库
///
/// `path` 可以是单个 TOML 文件，也可以是包含多个 TOML 文件的文件夹（按文件名顺序合并）。
/// 文件夹中解析失败的文件会被跳过并记录警告。
pub async fn load_question_bank(path: &str) -> Result<QuestionBank> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        anyhow::bail!("题库路径不存在: {}", path);
    }

    if path_buf.is_file() {
        let bank = load_toml_to_question_bank(&path_buf).await?;
        bank.check()
            .with_context(|| format!("题库内容无效: {}", path))?;
        tracing::info!(
            "成功加载 {} 个分类, {} 道题目",
            bank.categories.len(),
            bank.questions.len()
        );
        return Ok(bank);
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&path_buf)
        .await
        .with_context(|| format!("无法读取文件夹: {}", path))?;

    while let Some(entry) = entries.next_entry().await? {
        let file = entry.path();
        if file.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(file);
        }
    }
    toml_files.sort();

    if toml_files.is_empty() {
        tracing::warn!("在文件夹 {} 中没有找到 TOML 文件", path);
    }

    let mut bank = QuestionBank::default();
    for file in toml_files {
        tracing::info!(
            "正在加载: {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_toml_to_question_bank(&file).await {
            Ok(part) => {
                tracing::info!("成功加载 {} 道题目", part.questions.len());
                bank.merge(part);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", file.display(), e);
            }
        }
    }

    bank.check()
        .with_context(|| format!("题库内容无效: {}", path))?;
    bank.file_path = Some(path.to_string());

    Ok(bank)
}
