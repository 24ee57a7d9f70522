//! 交互式答题应用
//!
//! 负责加载题库、持有随机数生成器，并在终端上驱动一次答题会话

use crate::config::Config;
use crate::models::loaders::{load_question_bank, QuestionBank};
use crate::models::{CategoryId, QuizScope};
use crate::services::{Paginator, TriviaService};
use crate::store::{InMemoryStore, QuestionStore};
use crate::utils::logging::{
    append_log_line, init_log_file, log_bank_loaded, log_startup, print_final_stats,
    truncate_text,
};
use crate::workflow::{AnswerResult, QuizSession};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

/// 退出指令
const QUIT_COMMAND: &str = "q";

/// 应用主结构
pub struct App {
    config: Config,
    service: TriviaService,
    rng: StdRng,
}

/// 一次答题的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    pub score: usize,
    /// 已作答的题目数量，出题后直接退出的那道不计入
    pub answered: usize,
    /// 是否答完了所选范围内的全部题目
    pub finished: bool,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        let bank = load_question_bank(&config.question_bank_path)
            .await
            .with_context(|| format!("加载题库失败: {}", config.question_bank_path))?;

        Self::from_bank(config, bank)
    }

    /// 从已加载的题库构建应用
    pub fn from_bank(config: Config, bank: QuestionBank) -> Result<Self> {
        let store = InMemoryStore::from_bank(bank);
        log_bank_loaded(store.list_categories()?.len(), store.count_questions()?);

        let rng = match config.quiz_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let service = TriviaService::new(Arc::new(store), Paginator::new(config.questions_per_page));

        Ok(Self {
            config,
            service,
            rng,
        })
    }

    /// 在标准输入输出上运行
    pub async fn run(&mut self) -> Result<QuizSummary> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.run_with(stdin, &mut stdout).await
    }

    /// 运行一次答题会话
    ///
    /// 先选择分类（0 为全部），然后逐题作答，直到题目耗尽、输入 `q` 或输入结束
    pub async fn run_with<I, W>(&mut self, input: I, output: &mut W) -> Result<QuizSummary>
    where
        I: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        let categories = self.service.list_categories()?.categories;
        let mut menu = String::from("分类列表:\n  0. 全部分类\n");
        for (id, label) in &categories {
            menu.push_str(&format!("  {}. {}\n", id, label));
        }
        output.write_all(menu.as_bytes()).await?;

        let scope = loop {
            output.write_all("请选择分类编号: ".as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                return Ok(QuizSummary {
                    score: 0,
                    answered: 0,
                    finished: false,
                });
            };

            match line.trim().parse::<CategoryId>() {
                Ok(id) if id == 0 || categories.contains_key(&id) => {
                    break QuizScope::from_category_id(id)
                }
                _ => {
                    output
                        .write_all(format!("无效的分类: {}\n", line.trim()).as_bytes())
                        .await?;
                }
            }
        };

        debug!("开始答题: {}", scope);
        self.log(&format!("开始答题: {}", scope));

        let mut session = QuizSession::new(scope);
        loop {
            let Some(question) = session.next_question(&self.service, &mut self.rng)?.cloned() else {
                output.write_all("\n🏁 题目已全部完成!\n".as_bytes()).await?;
                break;
            };
            let prompt = format!(
                "\n第 {} 题 [难度 {}]: {}\n你的答案 (输入 {} 退出): ",
                session.asked(),
                question.difficulty,
                question.question,
                QUIT_COMMAND
            );
            output.write_all(prompt.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().eq_ignore_ascii_case(QUIT_COMMAND) {
                break;
            }

            let feedback = match session.answer(&line) {
                AnswerResult::Correct => "✓ 回答正确!\n".to_string(),
                AnswerResult::Incorrect { expected } => {
                    format!("✗ 回答错误，正确答案: {}\n", expected)
                }
                AnswerResult::NoPendingQuestion => continue,
            };
            output.write_all(feedback.as_bytes()).await?;

            self.log(&format!(
                "题目 #{} 作答: {} -> {}",
                question.id,
                truncate_text(line.trim(), 40),
                feedback.trim()
            ));
        }

        let summary = QuizSummary {
            score: session.score(),
            answered: session.answered(),
            finished: session.is_finished(),
        };

        output
            .write_all(format!("\n得分: {}/{}\n", summary.score, summary.answered).as_bytes())
            .await?;
        output.flush().await?;

        self.log(&format!("结束答题: 得分 {}/{}", summary.score, summary.answered));
        print_final_stats(summary.score, summary.answered, &self.config.output_log_file);

        Ok(summary)
    }

    fn log(&self, line: &str) {
        if let Err(e) = append_log_line(&self.config.output_log_file, line) {
            warn!("写入日志文件失败: {:#}", e);
        }
    }
}
