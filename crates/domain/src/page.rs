//! Paginated list responses.

use serde::{Deserialize, Serialize};

/// One page of a list endpoint: `{results: [...], next: url|null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in server order.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    /// Link to the following page, absent on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// Returns true if the server reports a following page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }
}
