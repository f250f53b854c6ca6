//! Paginated response envelope

use serde::{Deserialize, Serialize};

/// One page of a remote list
///
/// `total_items` counts the filtered set, not the whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub size: u64,
}

impl<T> PageEnvelope<T> {
    pub fn new(items: Vec<T>, total_items: u64, page: u64, size: u64) -> Self {
        Self {
            items,
            total_items,
            page,
            size,
        }
    }

    pub fn empty(page: u64, size: u64) -> Self {
        Self::new(Vec::new(), 0, page, size)
    }

    /// Number of pages needed to show every item
    pub fn page_count(&self) -> u64 {
        page_count(self.total_items, self.size)
    }
}

/// `ceil(total_items / size)`, zero when `size` is zero
pub fn page_count(total_items: u64, size: u64) -> u64 {
    if size == 0 {
        return 0;
    }
    total_items.div_ceil(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(page_count(25, 10), 3);
        assert_eq!(page_count(30, 10), 3);
        assert_eq!(page_count(31, 10), 4);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(0, 10), 0);
    }

    #[test]
    fn test_page_count_zero_size() {
        assert_eq!(page_count(25, 0), 0);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"items":[1,2,3],"totalItems":25,"page":2,"size":10}"#;
        let envelope: PageEnvelope<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.items, vec![1, 2, 3]);
        assert_eq!(envelope.total_items, 25);
        assert_eq!(envelope.page_count(), 3);
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let envelope: PageEnvelope<u32> = serde_json::from_str(r#"{"items":[]}"#).unwrap();
        assert_eq!(envelope, PageEnvelope::empty(0, 0));
    }
}
