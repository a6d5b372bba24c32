//! Pagination response headers for index-served lists.
//!
//! Emits the numeric `X-*` pagination headers plus an RFC 5988 `Link` header
//! with `first`, `last`, `prev`, and `next` relations. Links preserve every
//! query parameter of the original request, replacing only `page`.
//!
//! Primary-store fallback lists carry none of these headers.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use lookup_store::types::PagedRecords;
use url::Url;

use crate::error::RestError;

/// Header names exposed to browser clients.
const EXPOSED_HEADERS: &str =
    "X-Prev-Page, X-Next-Page, X-Page, X-Per-Page, X-Total, X-Total-Pages, Link";

/// Builds the pagination header set for one result page.
pub fn pagination_headers(
    base_url: &str,
    path: &str,
    query: &[(String, String)],
    page: &PagedRecords,
) -> Result<HeaderMap, RestError> {
    let base = Url::parse(base_url).map_err(|e| RestError::InternalError {
        message: format!("Invalid base URL '{}': {}", base_url, e),
    })?;

    let mut headers = HeaderMap::new();
    insert_number(&mut headers, "x-page", u64::from(page.page));
    insert_number(&mut headers, "x-per-page", u64::from(page.per_page));
    insert_number(&mut headers, "x-total", page.total);
    insert_number(&mut headers, "x-total-pages", page.total_pages());
    if let Some(prev) = page.prev_page() {
        insert_number(&mut headers, "x-prev-page", u64::from(prev));
    }
    if let Some(next) = page.next_page() {
        insert_number(&mut headers, "x-next-page", u64::from(next));
    }

    if page.total > 0 {
        let last = u32::try_from(page.total_pages()).unwrap_or(u32::MAX);
        let mut links = vec![
            link_for(&base, path, query, 1, "first"),
            link_for(&base, path, query, last, "last"),
        ];
        if let Some(prev) = page.prev_page() {
            links.push(link_for(&base, path, query, prev, "prev"));
        }
        if let Some(next) = page.next_page() {
            links.push(link_for(&base, path, query, next, "next"));
        }
        if let Ok(value) = HeaderValue::from_str(&links.join(", ")) {
            headers.insert(HeaderName::from_static("link"), value);
        }
    }

    headers.insert(
        HeaderName::from_static("access-control-expose-headers"),
        HeaderValue::from_static(EXPOSED_HEADERS),
    );
    Ok(headers)
}

fn insert_number(headers: &mut HeaderMap, name: &'static str, value: u64) {
    if let Ok(value) = HeaderValue::from_str(&value.to_string()) {
        headers.insert(HeaderName::from_static(name), value);
    }
}

/// Renders one `<url>; rel="{rel}"` link, replacing the `page` parameter.
fn link_for(base: &Url, path: &str, query: &[(String, String)], page: u32, rel: &str) -> String {
    let mut url = base.clone();
    url.set_path(path);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        let mut wrote_page = false;
        for (key, value) in query {
            if key == "page" {
                pairs.append_pair("page", &page.to_string());
                wrote_page = true;
            } else {
                pairs.append_pair(key, value);
            }
        }
        if !wrote_page {
            pairs.append_pair("page", &page.to_string());
        }
    }
    format!("<{}>; rel=\"{}\"", url, rel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32) -> PagedRecords {
        PagedRecords {
            items: Vec::new(),
            page: number,
            per_page: 10,
            total: 25,
        }
    }

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_middle_page_headers() {
        let headers = pagination_headers(
            "http://localhost:8080",
            "/lookups/countries",
            &query(&[("page", "2"), ("perPage", "10")]),
            &page(2),
        )
        .unwrap();

        assert_eq!(headers["x-page"], "2");
        assert_eq!(headers["x-per-page"], "10");
        assert_eq!(headers["x-total"], "25");
        assert_eq!(headers["x-total-pages"], "3");
        assert_eq!(headers["x-prev-page"], "1");
        assert_eq!(headers["x-next-page"], "3");

        let link = headers["link"].to_str().unwrap();
        assert!(link.contains("page=1>; rel=\"first\""));
        assert!(link.contains("page=3>; rel=\"last\""));
        assert!(link.contains("rel=\"prev\""));
        assert!(link.contains("rel=\"next\""));
    }

    #[test]
    fn test_first_page_omits_prev() {
        let headers = pagination_headers(
            "http://localhost:8080",
            "/lookups/countries",
            &query(&[]),
            &page(1),
        )
        .unwrap();
        assert!(!headers.contains_key("x-prev-page"));
        assert_eq!(headers["x-next-page"], "2");

        let link = headers["link"].to_str().unwrap();
        assert!(!link.contains("rel=\"prev\""));
    }

    #[test]
    fn test_links_preserve_other_query_params() {
        let headers = pagination_headers(
            "http://localhost:8080",
            "/lookups/countries",
            &query(&[("countryCode", "AR"), ("page", "2")]),
            &page(2),
        )
        .unwrap();
        let link = headers["link"].to_str().unwrap();
        assert!(link.contains("countryCode=AR"));
    }

    #[test]
    fn test_last_link_saturates_on_huge_totals() {
        let huge = PagedRecords {
            items: Vec::new(),
            page: 1,
            per_page: 1,
            total: u64::MAX,
        };
        let headers =
            pagination_headers("http://localhost:8080", "/lookups/countries", &[], &huge)
                .unwrap();

        assert_eq!(headers["x-total-pages"], u64::MAX.to_string());
        let link = headers["link"].to_str().unwrap();
        assert!(link.contains(&format!("page={}>; rel=\"last\"", u32::MAX)));
    }

    #[test]
    fn test_empty_result_has_no_link_header() {
        let empty = PagedRecords {
            items: Vec::new(),
            page: 1,
            per_page: 10,
            total: 0,
        };
        let headers =
            pagination_headers("http://localhost:8080", "/lookups/countries", &[], &empty)
                .unwrap();
        assert!(!headers.contains_key("link"));
        assert_eq!(headers["x-total"], "0");
    }
}
