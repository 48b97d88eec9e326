use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// One page of a listing. `page` is 1-based.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub pages: u32,
    pub size: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, size: u32, total: u64) -> Self {
        let pages = if size == 0 {
            0
        } else {
            total.div_ceil(size as u64) as u32
        };
        Self {
            items,
            page,
            pages,
            size,
            total,
        }
    }

    /// SQL OFFSET for a 1-based page.
    pub fn offset(page: u32, size: u32) -> u64 {
        page.saturating_sub(1) as u64 * size as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_round_up() {
        let p: Page<()> = Page::new(vec![], 3, 2, 10);
        assert_eq!(p.pages, 5);
        let p: Page<()> = Page::new(vec![], 1, 50, 0);
        assert_eq!(p.pages, 0);
        let p: Page<()> = Page::new(vec![], 1, 4, 9);
        assert_eq!(p.pages, 3);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(Page::<()>::offset(1, 50), 0);
        assert_eq!(Page::<()>::offset(3, 2), 4);
        assert_eq!(Page::<()>::offset(0, 2), 0);
    }
}
