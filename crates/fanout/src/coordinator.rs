//! Batch coordinator — bounded concurrent fan-out over the recipient set.
//!
//! Recipients are partitioned into fixed-size batches in resolver order.
//! Within a batch every recipient's dual-channel dispatch runs concurrently;
//! the coordinator waits for the whole batch to settle before starting the
//! next one, which caps in-flight gateway calls and database writes at the
//! batch size.
//!
//! One recipient's failure is recorded in the summary and never aborts
//! siblings or later batches. There is no early exit: once dispatch starts,
//! every batch runs.

use futures::future::join_all;

use pawhaven_common::types::{DispatchSummary, NotificationMessage, Recipient};

use crate::dispatcher::Dispatcher;
use crate::inbox::InboxStore;
use crate::push::PushGateway;

/// Drives batched dispatch of one message to a resolved recipient set.
pub struct BatchCoordinator {
    batch_size: usize,
}

impl BatchCoordinator {
    /// `batch_size` is clamped to at least 1.
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    /// Dispatch `message` to every recipient, `batch_size` at a time.
    ///
    /// Infallible by construction: per-recipient failures settle into the
    /// returned summary instead of propagating.
    pub async fn dispatch_all<G: PushGateway, S: InboxStore>(
        &self,
        dispatcher: &Dispatcher<G, S>,
        recipients: &[Recipient],
        message: &NotificationMessage,
    ) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for batch in recipients.chunks(self.batch_size) {
            let outcomes = join_all(
                batch
                    .iter()
                    .map(|recipient| dispatcher.deliver(recipient, message)),
            )
            .await;

            for outcome in &outcomes {
                summary.record(outcome);
            }
            summary.batches += 1;

            tracing::debug!(
                batch = summary.batches,
                size = batch.len(),
                "Batch settled"
            );
        }

        summary
    }
}
