use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct OffsetPage<T> {
    pub items: Vec<T>,
    pub limit: u32,
    pub offset: u32,
    /// Offset of the following page when this page came back full.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<u32>,
}

impl<T> OffsetPage<T> {
    pub fn new(items: Vec<T>, limit: u32, offset: u32) -> Self {
        let next_offset = if items.len() >= limit as usize && limit > 0 {
            Some(offset.saturating_add(limit))
        } else {
            None
        };
        Self {
            items,
            limit,
            offset,
            next_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_page_points_at_next_offset() {
        let page = OffsetPage::new(vec![1, 2], 2, 4);
        assert_eq!(page.next_offset, Some(6));
    }

    #[test]
    fn short_page_is_last() {
        let page = OffsetPage::new(vec![1], 2, 0);
        assert_eq!(page.next_offset, None);
    }
}
