//! Offset/limit pagination for list endpoints.

pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 1000;
/// SQL drivers bind OFFSET as a signed 64-bit integer.
pub const MAX_SKIP: u64 = i64::MAX as u64;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// rows to skip
    pub skip: u64,
    /// maximum rows to return
    pub limit: u64,
}

impl Pagination {
    pub fn new(skip: Option<u64>, limit: Option<u64>) -> Self {
        Self { skip: skip.unwrap_or(0), limit: limit.unwrap_or(DEFAULT_LIMIT) }
    }

    /// Clamp `skip` to `MAX_SKIP` and `limit` to `MAX_LIMIT`; returns `(offset, limit)`.
    pub fn normalize(self) -> (u64, u64) {
        (self.skip.min(MAX_SKIP), self.limit.min(MAX_LIMIT))
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { skip: 0, limit: DEFAULT_LIMIT } }
}
