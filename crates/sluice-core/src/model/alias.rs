use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one table or derived table within a statement.
///
/// Aliases come from a single process-wide counter that is never reset, so
/// two aliases drawn by any threads at any time never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Alias(u64);

impl Alias {
    pub fn next() -> Alias {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Alias(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(self) -> u64 {
        self.0
    }
}
