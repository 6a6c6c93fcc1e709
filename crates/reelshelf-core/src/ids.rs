//! Id assignment for newly created records.

use reelshelf_config::IdStrategy;
use reelshelf_protocol::MovieId;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Supplies the id sent with a create request.
///
/// `None` means the request omits the id and the service assigns one.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> Option<MovieId>;
}

/// Millisecond-timestamp ids, strictly increasing within one process.
///
/// Two creates in the same millisecond would collide on a raw timestamp, so
/// each id is at least one greater than the previous one.
pub struct ClientTimestampIds {
    last: AtomicU64,
    clock: Box<dyn Fn() -> u64 + Send + Sync>,
}

impl ClientTimestampIds {
    pub fn new() -> Self {
        Self::with_clock(now_millis)
    }

    /// Use a custom millisecond clock.
    pub fn with_clock(clock: impl Fn() -> u64 + Send + Sync + 'static) -> Self {
        Self {
            last: AtomicU64::new(0),
            clock: Box::new(clock),
        }
    }
}

impl Default for ClientTimestampIds {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ClientTimestampIds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientTimestampIds")
            .field("last", &self.last.load(Ordering::Relaxed))
            .finish()
    }
}

impl IdSource for ClientTimestampIds {
    fn next_id(&self) -> Option<MovieId> {
        let now = (self.clock)();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        Some(MovieId::Number(now.max(previous.saturating_add(1))))
    }
}

/// Leaves id assignment to the service.
#[derive(Debug, Default, Clone, Copy)]
pub struct ServerAssignedIds;

impl IdSource for ServerAssignedIds {
    fn next_id(&self) -> Option<MovieId> {
        None
    }
}

/// Id source for the configured strategy.
pub fn id_source_for(strategy: IdStrategy) -> Arc<dyn IdSource> {
    match strategy {
        IdStrategy::Client => Arc::new(ClientTimestampIds::new()),
        IdStrategy::Server => Arc::new(ServerAssignedIds),
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn uses_clock_value_when_it_advances() {
        let ids = ClientTimestampIds::with_clock(|| 1_700_000_000_123);
        assert_eq!(ids.next_id(), Some(MovieId::Number(1_700_000_000_123)));
    }

    #[test]
    fn same_millisecond_ids_stay_unique() {
        let ids = ClientTimestampIds::with_clock(|| 42);
        let first = ids.next_id();
        let second = ids.next_id();
        let third = ids.next_id();
        assert_eq!(first, Some(MovieId::Number(42)));
        assert_eq!(second, Some(MovieId::Number(43)));
        assert_eq!(third, Some(MovieId::Number(44)));
    }

    #[test]
    fn clock_going_backwards_never_repeats_an_id() {
        let ticks = AtomicU64::new(100);
        let ids = ClientTimestampIds::with_clock(move || ticks.fetch_sub(10, Ordering::SeqCst));
        assert_eq!(ids.next_id(), Some(MovieId::Number(100)));
        assert_eq!(ids.next_id(), Some(MovieId::Number(101)));
    }

    #[test]
    fn server_strategy_omits_the_id() {
        assert_eq!(id_source_for(IdStrategy::Server).next_id(), None);
        assert!(id_source_for(IdStrategy::Client).next_id().is_some());
    }
}
