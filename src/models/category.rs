use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 分类ID
pub type CategoryId = u32;

/// 分类
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// 分类显示名称（接口字段名沿用 `type`）
    #[serde(rename = "type")]
    pub label: String,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.id, self.label)
    }
}

/// 分类ID → 分类名称，序列化为 `{"1": "Science", ...}`
pub type CategoryMap = BTreeMap<CategoryId, String>;

/// 将分类列表转换为接口使用的映射
pub fn to_category_map(categories: &[Category]) -> CategoryMap {
    categories
        .iter()
        .map(|c| (c.id, c.label.clone()))
        .collect()
}
