//! Query-string parameters for list and read operations.
//!
//! The reserved parameters `page`, `perPage`, and `includeSoftDeleted` are
//! pulled out; every remaining pair becomes an exact-match field filter.

use std::collections::HashMap;

use lookup_store::core::ListFilter;
use lookup_store::types::PageRequest;

use crate::error::RestError;

/// Reserved parameter names that never become field filters.
const PAGE: &str = "page";
const PER_PAGE: &str = "perPage";
const INCLUDE_SOFT_DELETED: &str = "includeSoftDeleted";

/// Parsed list parameters.
#[derive(Debug, Clone)]
pub struct ListParams {
    /// The requested page.
    pub page: PageRequest,
    /// Whether the caller asked for soft-deleted visibility.
    pub include_soft_deleted: bool,
    /// Exact-match field filters from the remaining query pairs.
    pub filters: ListFilter,
}

impl ListParams {
    /// Parses the raw query map, clamping `perPage` to the configured
    /// bounds.
    pub fn parse(
        mut query: HashMap<String, String>,
        default_per_page: u32,
        max_per_page: u32,
    ) -> Result<Self, RestError> {
        let page = parse_positive(query.remove(PAGE), PAGE)?.unwrap_or(1);
        let per_page = parse_positive(query.remove(PER_PAGE), PER_PAGE)?
            .unwrap_or(default_per_page)
            .min(max_per_page);
        let include_soft_deleted = parse_soft_deleted_flag(query.remove(INCLUDE_SOFT_DELETED))?;

        let mut filters: ListFilter = query.into_iter().collect();
        filters.sort();

        Ok(Self {
            page: PageRequest::new(page, per_page),
            include_soft_deleted,
            filters,
        })
    }
}

fn parse_positive(value: Option<String>, name: &str) -> Result<Option<u32>, RestError> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let parsed: u32 = raw.parse().map_err(|_| RestError::BadRequest {
                message: format!("'{}' must be a positive integer", name),
            })?;
            if parsed == 0 {
                return Err(RestError::BadRequest {
                    message: format!("'{}' must be a positive integer", name),
                });
            }
            Ok(Some(parsed))
        }
    }
}

/// Parses the `includeSoftDeleted` flag. Absent means `false`; anything
/// other than `true`/`false` is rejected.
pub fn parse_soft_deleted_flag(value: Option<String>) -> Result<bool, RestError> {
    match value.as_deref() {
        None => Ok(false),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(RestError::BadRequest {
            message: format!("'{}' is not a valid boolean for includeSoftDeleted", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let params = ListParams::parse(query(&[]), 20, 100).unwrap();
        assert_eq!(params.page.page, 1);
        assert_eq!(params.page.per_page, 20);
        assert!(!params.include_soft_deleted);
        assert!(params.filters.is_empty());
    }

    #[test]
    fn test_per_page_clamped_to_max() {
        let params = ListParams::parse(query(&[("perPage", "5000")]), 20, 100).unwrap();
        assert_eq!(params.page.per_page, 100);
    }

    #[test]
    fn test_remaining_pairs_become_filters() {
        let params =
            ListParams::parse(query(&[("page", "2"), ("countryCode", "AR")]), 20, 100).unwrap();
        assert_eq!(params.page.page, 2);
        assert_eq!(
            params.filters,
            vec![("countryCode".to_string(), "AR".to_string())]
        );
    }

    #[test]
    fn test_invalid_page_rejected() {
        assert!(ListParams::parse(query(&[("page", "0")]), 20, 100).is_err());
        assert!(ListParams::parse(query(&[("page", "abc")]), 20, 100).is_err());
    }

    #[test]
    fn test_include_soft_deleted_flag() {
        let params =
            ListParams::parse(query(&[("includeSoftDeleted", "true")]), 20, 100).unwrap();
        assert!(params.include_soft_deleted);
        assert!(ListParams::parse(query(&[("includeSoftDeleted", "yes")]), 20, 100).is_err());
        assert!(!parse_soft_deleted_flag(None).unwrap());
    }
}
