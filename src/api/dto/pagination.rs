//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
/// Non-positive values are passed on as `0`, which the engine replaces with
/// its defaults.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub size: Option<i64>,
}

impl PaginationParams {
    /// 1-based page, or `0` when absent or non-positive.
    pub fn page(&self) -> u32 {
        positive_or_zero(self.page)
    }

    /// Page size, or `0` when absent or non-positive.
    pub fn size(&self) -> u32 {
        positive_or_zero(self.size)
    }
}

fn positive_or_zero(value: Option<i64>) -> u32 {
    value
        .filter(|v| *v > 0)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
        .unwrap_or(0)
}
