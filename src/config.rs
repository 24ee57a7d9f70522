/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库路径（TOML 文件或文件夹）
    pub question_bank_path: String,
    /// 每页题目数量
    pub questions_per_page: usize,
    /// 抽题随机种子，不设置时使用系统熵
    pub quiz_seed: Option<u64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

/// 默认每页题目数量
pub const QUESTIONS_PER_PAGE: usize = 10;

impl Default for Config {
    fn default() -> Self {
        Self {
            question_bank_path: "data/trivia.toml".to_string(),
            questions_per_page: QUESTIONS_PER_PAGE,
            quiz_seed: None,
            verbose_logging: false,
            output_log_file: "quiz_log.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过自定义查找函数构建配置，解析失败的值回退为默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        Self {
            question_bank_path: lookup("QUESTION_BANK_PATH").unwrap_or(default.question_bank_path),
            questions_per_page: lookup("QUESTIONS_PER_PAGE")
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(default.questions_per_page),
            quiz_seed: lookup("QUIZ_SEED").and_then(|v| v.parse().ok()),
            verbose_logging: lookup("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: lookup("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_overrides_and_fallbacks() {
        let vars: HashMap<&str, &str> = [
            ("QUESTION_BANK_PATH", "bank/"),
            ("QUESTIONS_PER_PAGE", "0"),
            ("QUIZ_SEED", "42"),
            ("VERBOSE_LOGGING", "yes"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.question_bank_path, "bank/");
        assert_eq!(config.questions_per_page, QUESTIONS_PER_PAGE);
        assert_eq!(config.quiz_seed, Some(42));
        assert!(!config.verbose_logging);
        assert_eq!(config.output_log_file, "quiz_log.txt");
    }
}
