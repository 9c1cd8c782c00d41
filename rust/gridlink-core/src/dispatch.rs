use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::errors::InvalidGrid;
use crate::models::Cell;

/// A decoded update waiting for the consumer tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchEntry {
    GridReplace(Vec<Vec<i32>>),
    AgentMove(Cell),
}

/// Consumer side of the queue.
pub trait UpdateHandler {
    fn on_grid_replace(&mut self, matrix: Vec<Vec<i32>>) -> Result<(), InvalidGrid>;
    fn on_agent_move(&mut self, cell: Cell);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainSummary {
    pub executed: usize,
    pub rejected: usize,
}

/// FIFO shared between the network task and the tick. The lock is held only
/// to push or to swap out the pending entries, never while they run.
#[derive(Debug, Default)]
pub struct DispatchQueue {
    pending: Mutex<VecDeque<DispatchEntry>>,
}

impl DispatchQueue {
    pub fn new() -> Self { Self::default() }

    // A panic elsewhere never leaves the deque half-updated, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, VecDeque<DispatchEntry>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn enqueue(&self, entry: DispatchEntry) {
        self.lock().push_back(entry);
    }

    pub fn len(&self) -> usize { self.lock().len() }
    pub fn is_empty(&self) -> bool { self.lock().is_empty() }

    /// Take everything pending, leaving the queue empty.
    pub fn drain(&self) -> VecDeque<DispatchEntry> {
        std::mem::take(&mut *self.lock())
    }

    /// Run every pending entry in enqueue order on the calling thread.
    /// Entries enqueued while this runs wait for the next call.
    pub fn drain_and_run<H: UpdateHandler + ?Sized>(&self, handler: &mut H) -> DrainSummary {
        let batch = self.drain();
        let mut summary = DrainSummary::default();
        for entry in batch {
            summary.executed += 1;
            match entry {
                DispatchEntry::GridReplace(matrix) => {
                    if let Err(e) = handler.on_grid_replace(matrix) {
                        warn!(error = %e, "grid update rejected");
                        summary.rejected += 1;
                    }
                }
                DispatchEntry::AgentMove(cell) => handler.on_agent_move(cell),
            }
        }
        summary
    }
}
