//! # Trivia Quiz
//!
//! 一个知识问答题库服务：题目存储、分类浏览、全文搜索，以及不重复出题的随机答题
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 题库层（Store）
//! - `store/` - 持有题目和分类数据，只暴露查询与增删改能力
//! - `InMemoryStore` - 基于 `RwLock` 的内存实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `Paginator` - 固定页大小的分页
//! - `QuizSelector` - 从候选题目中随机抽一道未出过的题，或报告题目耗尽
//! - `TriviaService` - 对应各个接口的请求处理，返回响应结构体
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次答题"的完整流程
//! - `QuizSession` - 由调用方持有的会话状态（已出题目、得分、是否结束）
//!
//! ### ④ 应用层（App）
//! - `app` - 加载题库、持有随机数生成器，在终端上驱动答题会话
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::{App, QuizSummary};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Category, NewQuestion, Question, QuizRequest, QuizScope};
pub use services::{Paginator, QuizOutcome, QuizSelector, TriviaService};
pub use store::{InMemoryStore, QuestionStore};
pub use workflow::QuizSession;
