//! Pure pagination window computation.
//!
//! # Responsibility
//! - Normalize caller-supplied page/size values.
//! - Derive offset, page count and navigation flags for one page request.
//!
//! # Invariants
//! - `offset = (page - 1) * size` for the normalized page and size.
//! - `total_pages = ceil(total_items / size)`, zero for an empty set.
//! - The requested page is never clamped: pages beyond the end yield an
//!   empty slice with `has_next=false` while `has_prev` still reflects the
//!   literal page number.

use serde::Serialize;

/// Page number used when the request carries none or an invalid one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the request carries none or an invalid one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Raw pagination input as received from the transport layer.
///
/// `None` stands for an absent or unparseable value; both normalize to
/// the defaults, as do zero and negative values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl PageRequest {
    /// Builds a request from raw query-string values.
    ///
    /// Parse failures map to `None` and later normalize to defaults.
    pub fn from_raw(page: Option<&str>, size: Option<&str>) -> Self {
        Self {
            page: page.and_then(|value| value.trim().parse().ok()),
            size: size.and_then(|value| value.trim().parse().ok()),
        }
    }
}

/// Computed slice parameters plus navigation metadata for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
    /// Row offset fed to the store; not part of the wire contract.
    #[serde(skip)]
    pub offset: u64,
}

/// Derives the page window for `total_items` and the requested page/size.
pub fn paginate(total_items: u64, request: &PageRequest) -> PageWindow {
    let page = normalize(request.page, DEFAULT_PAGE);
    let size = normalize(request.size, DEFAULT_PAGE_SIZE);

    let total_pages = total_items.div_ceil(u64::from(size));

    PageWindow {
        current_page: page,
        page_size: size,
        total_pages,
        total_items,
        has_next: u64::from(page) < total_pages,
        has_prev: page > 1,
        offset: u64::from(page - 1) * u64::from(size),
    }
}

fn normalize(value: Option<i64>, default: u32) -> u32 {
    match value {
        Some(value) if value >= 1 => u32::try_from(value).unwrap_or(u32::MAX),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::{paginate, PageRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

    fn request(page: i64, size: i64) -> PageRequest {
        PageRequest {
            page: Some(page),
            size: Some(size),
        }
    }

    #[test]
    fn computes_offset_and_page_count() {
        let window = paginate(25, &request(3, 10));
        assert_eq!(window.offset, 20);
        assert_eq!(window.total_pages, 3);
        assert_eq!(window.total_items, 25);
        assert!(!window.has_next);
        assert!(window.has_prev);
    }

    #[test]
    fn empty_collection_has_zero_pages() {
        let window = paginate(0, &request(1, 10));
        assert_eq!(window.total_pages, 0);
        assert!(!window.has_next);
        assert!(!window.has_prev);
        assert_eq!(window.offset, 0);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(paginate(21, &request(1, 10)).total_pages, 3);
        assert_eq!(paginate(20, &request(1, 10)).total_pages, 2);
        assert_eq!(paginate(1, &request(1, 10)).total_pages, 1);
    }

    #[test]
    fn invalid_inputs_normalize_to_defaults() {
        for req in [
            PageRequest::default(),
            request(0, 0),
            request(-3, -7),
            PageRequest::from_raw(Some("abc"), Some("")),
        ] {
            let window = paginate(100, &req);
            assert_eq!(window.current_page, DEFAULT_PAGE);
            assert_eq!(window.page_size, DEFAULT_PAGE_SIZE);
            assert_eq!(window.offset, 0);
        }
    }

    #[test]
    fn from_raw_parses_numeric_values() {
        let req = PageRequest::from_raw(Some("2"), Some(" 15 "));
        assert_eq!(req.page, Some(2));
        assert_eq!(req.size, Some(15));
    }

    #[test]
    fn navigation_flags_follow_requested_page() {
        let middle = paginate(50, &request(3, 10));
        assert!(middle.has_next);
        assert!(middle.has_prev);

        let first = paginate(50, &request(1, 10));
        assert!(first.has_next);
        assert!(!first.has_prev);
    }

    #[test]
    fn page_beyond_end_keeps_literal_prev_flag() {
        // Requested page is never clamped to total_pages.
        let window = paginate(25, &request(9, 10));
        assert_eq!(window.current_page, 9);
        assert_eq!(window.offset, 80);
        assert!(!window.has_next);
        assert!(window.has_prev);
    }

    #[test]
    fn window_serializes_with_wire_field_names() {
        let value = serde_json::to_value(paginate(25, &request(2, 10))).unwrap();
        assert_eq!(value["currentPage"], 2);
        assert_eq!(value["pageSize"], 10);
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["totalItems"], 25);
        assert_eq!(value["hasNext"], true);
        assert_eq!(value["hasPrev"], true);
        assert!(value.get("offset").is_none());
    }
}
