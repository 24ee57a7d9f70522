//! 分页服务 - 业务能力层
//!
//! 只负责"把有序列表切成固定大小的页"，不关心页是否为空意味着什么

use crate::config::QUESTIONS_PER_PAGE;

/// 分页器
///
/// 页大小来自配置，不由调用方传入
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    /// 创建分页器，页大小至少为 1
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// 页码规整：小于 1 的页码按第 1 页处理
    pub fn normalize_page(page: i64) -> u64 {
        page.max(1) as u64
    }

    /// 取出第 `page` 页（从 1 开始）
    ///
    /// # 参数
    /// - `items`: 有序列表
    /// - `page`: 页码，`<= 0` 按第 1 页处理
    ///
    /// # 返回
    /// 覆盖 `[(page-1)*size, page*size)` 的子切片，超出范围时返回空切片
    pub fn paginate<'a, T>(&self, items: &'a [T], page: i64) -> &'a [T] {
        let page = Self::normalize_page(page);
        let start = usize::try_from(page - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(self.page_size);

        if start >= items.len() {
            return &[];
        }

        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    /// 共有多少页
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(QUESTIONS_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_partial_page_and_beyond() {
        let items: Vec<u32> = (1..=23).collect();
        let paginator = Paginator::new(10);

        assert_eq!(paginator.paginate(&items, 3), &[21, 22, 23]);
        assert!(paginator.paginate(&items, 5).is_empty());
        assert_eq!(paginator.page_count(items.len()), 3);
    }

    #[test]
    fn test_non_positive_page_is_first_page() {
        let items: Vec<u32> = (1..=23).collect();
        let paginator = Paginator::new(10);
        let first = paginator.paginate(&items, 1);

        assert_eq!(paginator.paginate(&items, 0), first);
        assert_eq!(paginator.paginate(&items, -7), first);
        assert_eq!(paginator.paginate(&items, i64::MIN), first);
    }

    #[test]
    fn test_huge_page_is_empty() {
        let items: Vec<u32> = (1..=5).collect();
        assert!(Paginator::new(10).paginate(&items, i64::MAX).is_empty());
    }

    #[test]
    fn test_page_length_matches_bounds() {
        for size in 1..=7usize {
            let paginator = Paginator::new(size);
            for n in 0..=30usize {
                let items: Vec<usize> = (0..n).collect();
                for page in 1..=8i64 {
                    let start = (page as usize - 1) * size;
                    let expected = if start < n { size.min(n - start) } else { 0 };
                    let slice = paginator.paginate(&items, page);
                    assert_eq!(slice.len(), expected, "n={} size={} page={}", n, size, page);
                    if expected > 0 {
                        assert_eq!(slice[0], start);
                    }
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let items: Vec<u32> = (1..=15).collect();
        let paginator = Paginator::default();
        assert_eq!(paginator.paginate(&items, 2), paginator.paginate(&items, 2));
        assert_eq!(paginator.page_size(), QUESTIONS_PER_PAGE);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let items = [1, 2, 3];
        assert_eq!(Paginator::new(0).paginate(&items, 2), &[2]);
    }
}
