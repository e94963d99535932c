//! Page-number pagination with a total-page count, shared by all list
//! endpoints: `?page=&page_size=` in, `{count, total_pages, results}` out.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const DEFAULT_PAGE_SIZE: i64 = 100;
pub const MAX_PAGE_SIZE: i64 = 500;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageParams {
    /// Validates the params and returns `(page, page_size, limit, offset)`.
    pub fn resolve(&self) -> Result<(i64, i64, i64, i64), AppError> {
        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err(AppError::Validation("page must be >= 1".to_string()));
        }

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(AppError::Validation(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        Ok((page, page_size, page_size, (page - 1) * page_size))
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub total_pages: i64,
    pub page: i64,
    pub page_size: i64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(count: i64, page: i64, page_size: i64, results: Vec<T>) -> Self {
        // An empty collection still has one (empty) page.
        let total_pages = ((count + page_size - 1) / page_size).max(1);
        Self {
            count,
            total_pages,
            page,
            page_size,
            results,
        }
    }
}

/// Query params for matched-CV / matched-offer listings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MatchListParams {
    pub min_score: Option<f64>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl MatchListParams {
    pub fn min_score(&self) -> Result<f64, AppError> {
        let min_score = self.min_score.unwrap_or(0.0);
        if !(0.0..=1.0).contains(&min_score) {
            return Err(AppError::Validation(
                "min_score must be between 0 and 1".to_string(),
            ));
        }
        Ok(min_score)
    }

    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<i64>, page_size: Option<i64>) -> PageParams {
        PageParams { page, page_size }
    }

    #[test]
    fn test_defaults() {
        let (page, page_size, limit, offset) = params(None, None).resolve().unwrap();
        assert_eq!((page, page_size, limit, offset), (1, 100, 100, 0));
    }

    #[test]
    fn test_offset_math() {
        let (_, _, limit, offset) = params(Some(3), Some(25)).resolve().unwrap();
        assert_eq!((limit, offset), (25, 50));
    }

    #[test]
    fn test_rejects_page_zero_and_oversized_page_size() {
        assert!(params(Some(0), None).resolve().is_err());
        assert!(params(None, Some(0)).resolve().is_err());
        assert!(params(None, Some(MAX_PAGE_SIZE + 1)).resolve().is_err());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Page::new(101, 1, 100, vec![(); 100]);
        assert_eq!(page.total_pages, 2);

        let page = Page::new(100, 1, 100, vec![(); 100]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let page: Page<()> = Page::new(0, 1, 100, vec![]);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.count, 0);
    }

    #[test]
    fn test_min_score_bounds() {
        let ok = MatchListParams {
            min_score: Some(0.5),
            page: None,
            page_size: None,
        };
        assert_eq!(ok.min_score().unwrap(), 0.5);

        let none = MatchListParams {
            min_score: None,
            page: None,
            page_size: None,
        };
        assert_eq!(none.min_score().unwrap(), 0.0);

        let too_big = MatchListParams {
            min_score: Some(1.5),
            page: None,
            page_size: None,
        };
        assert!(too_big.min_score().is_err());

        let negative = MatchListParams {
            min_score: Some(-0.1),
            page: None,
            page_size: None,
        };
        assert!(negative.min_score().is_err());
    }
}
