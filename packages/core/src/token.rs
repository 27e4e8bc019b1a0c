//! Reference tokens - opaque identity of an underlying data source.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identifies the data source instance behind a reader or writer.
///
/// Stores mint one token when they are created and report it for their whole
/// lifetime. Adapters only forward the token of the store they wrap, so two
/// adapters compare equal here exactly when they reach the same source.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceToken(u64);

impl ReferenceToken {
    /// Mint a token no other source in this process has been given.
    pub fn next() -> Self {
        ReferenceToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for ReferenceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReferenceToken(#{})", self.0)
    }
}
