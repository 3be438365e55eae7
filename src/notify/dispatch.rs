//! Runs save handlers off the UI loop and reports their outcome back

use crate::service::{SubmitError, SubmitHandler};
use crate::state::FormValues;
use anyhow::anyhow;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Save handler shared between the action set and in-flight saves
pub type SharedHandler = Arc<dyn SubmitHandler>;

/// Identifies one save attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SaveTicket(pub u64);

/// A validated save, ready to hand to the handler
pub struct PendingSave {
    pub ticket: SaveTicket,
    /// Label of the action that started it
    pub label: String,
    pub handler: SharedHandler,
    pub values: FormValues,
}

impl fmt::Debug for PendingSave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingSave")
            .field("ticket", &self.ticket)
            .field("label", &self.label)
            .field("values", &self.values)
            .finish()
    }
}

impl PendingSave {
    /// Run the handler to settlement.
    ///
    /// The handler runs in its own task so a panic inside it still settles
    /// the save as a failure.
    pub async fn run(self) -> SaveCompletion {
        let PendingSave {
            ticket,
            label,
            handler,
            values,
        } = self;

        let submitted = values.clone();
        let result = match tokio::spawn(async move { handler.submit(submitted).await }).await {
            Ok(result) => result,
            Err(e) => Err(SubmitError::Other(anyhow!("save task failed: {e}"))),
        };

        SaveCompletion {
            ticket,
            label,
            values,
            result,
        }
    }
}

/// Settled save: exactly one of success or failure
#[derive(Debug)]
pub struct SaveCompletion {
    pub ticket: SaveTicket,
    pub label: String,
    /// Values that were submitted
    pub values: FormValues,
    pub result: Result<(), SubmitError>,
}

/// Spawns pending saves and collects their completions
pub struct SaveDispatcher {
    completion_tx: mpsc::UnboundedSender<SaveCompletion>,
    completion_rx: mpsc::UnboundedReceiver<SaveCompletion>,
}

impl Default for SaveDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveDispatcher {
    pub fn new() -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            completion_tx,
            completion_rx,
        }
    }

    /// Spawn the save on the runtime. Must be called from within Tokio.
    pub fn dispatch(&self, pending: PendingSave) {
        tracing::debug!(ticket = pending.ticket.0, action = %pending.label, "Dispatching save");
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let completion = pending.run().await;
            let _ = tx.send(completion);
        });
    }

    /// Drain every completion that has arrived so far
    pub fn poll_completions(&mut self) -> Vec<SaveCompletion> {
        let mut completions = Vec::new();
        while let Ok(completion) = self.completion_rx.try_recv() {
            completions.push(completion);
        }
        completions
    }
}
