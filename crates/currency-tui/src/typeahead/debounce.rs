//! FilterScheduler — the simulated search backend.
//!
//! Each non-empty query schedules a deferred filter pass: a tokio task that
//! sleeps for the configured latency, filters the catalog and posts a
//! `FilterReady` back to the App's event channel. Passes are numbered; a new
//! request aborts the previous task *and* bumps the sequence number, so a
//! completion that was already in flight is still rejected by `take_if_current`.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use currency_proto::Catalog;

use crate::action::ComponentId;

/// Identifies one scheduled filter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTicket {
    pub seq: u64,
    pub query: String,
}

/// A finished filter pass on its way back to the controller.
#[derive(Debug, Clone)]
pub struct FilterReady {
    /// Which picker scheduled the pass.
    pub target: ComponentId,
    pub ticket: FilterTicket,
    /// Catalog indices, catalog order.
    pub results: Vec<usize>,
}

pub struct FilterScheduler {
    target: ComponentId,
    catalog: Catalog,
    latency: Duration,
    tx: mpsc::Sender<FilterReady>,
    latest_seq: u64,
    pending: Option<JoinHandle<()>>,
}

impl FilterScheduler {
    pub fn new(
        target: ComponentId,
        catalog: Catalog,
        latency: Duration,
        tx: mpsc::Sender<FilterReady>,
    ) -> Self {
        Self {
            target,
            catalog,
            latency,
            tx,
            latest_seq: 0,
            pending: None,
        }
    }

    /// Supersede whatever is pending and schedule a pass for `query`.
    pub fn schedule(&mut self, query: &str) -> FilterTicket {
        self.abort_pending();
        self.latest_seq += 1;
        let ticket = FilterTicket {
            seq: self.latest_seq,
            query: query.to_string(),
        };

        let catalog = self.catalog.clone();
        let tx = self.tx.clone();
        let target = self.target;
        let latency = self.latency;
        let task_ticket = ticket.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            let results = catalog.filter(&task_ticket.query);
            let _ = tx
                .send(FilterReady {
                    target,
                    ticket: task_ticket,
                    results,
                })
                .await;
        }));

        debug!(
            "[{:?}] scheduled filter #{} for {:?} in {:?}",
            self.target, ticket.seq, ticket.query, self.latency
        );
        ticket
    }

    /// Drop the pending pass, if any. Its completion will never apply.
    pub fn cancel(&mut self) {
        if self.abort_pending() {
            self.latest_seq += 1;
            trace!("[{:?}] cancelled pending filter", self.target);
        }
    }

    /// Accept a completion only if it belongs to the latest pending pass.
    /// Accepting consumes the pending slot, so a duplicate is rejected too.
    pub fn take_if_current(&mut self, ticket: &FilterTicket) -> bool {
        if ticket.seq == self.latest_seq && self.pending.is_some() {
            self.pending = None;
            true
        } else {
            false
        }
    }

    fn abort_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for FilterScheduler {
    fn drop(&mut self) {
        self.abort_pending();
    }
}
