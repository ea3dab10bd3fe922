//! Batch dispatch and result collection
//!
//! Both variants tag every completion message with its originating input
//! index and write it into a pre-sized slot vector, so results line up with
//! inputs no matter which requests finish first.

use super::fetch::fetch_url;
use super::Dispatcher;
use crate::error::DispatchError;
use crate::outcome::Outcome;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{info, warn};

/// One completion message: the originating input index plus its outcome.
type Completion = (usize, Outcome<String>);

impl Dispatcher {
    /// Dispatch a batch and wait for every task to terminate before
    /// collecting results.
    ///
    /// Spawns one task per URL into a [`JoinSet`], joins the whole set, and
    /// only then drains the completion channel. All concurrency has fully
    /// terminated before this returns; nothing observable leaks out of the
    /// call. Returns one outcome per input, in input order. An empty batch
    /// returns an empty vec immediately.
    pub async fn dispatch(&self, urls: &[String]) -> Vec<Outcome<String>> {
        if urls.is_empty() {
            return Vec::new();
        }

        info!(
            "dispatching batch of {} requests (joined, max parallel: {:?})",
            urls.len(),
            self.options().max_parallel
        );

        let gate = concurrency_gate(self.options().max_parallel);
        let (tx, rx) = mpsc::channel::<Completion>(urls.len());

        let mut tasks = JoinSet::new();
        for (index, url) in urls.iter().enumerate() {
            tasks.spawn(run_task(
                self.client().clone(),
                url.clone(),
                index,
                tx.clone(),
                gate.clone(),
            ));
        }
        drop(tx);

        // Explicit join: every task has fully terminated before the channel
        // is drained.
        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                warn!("dispatch task panicked: {}", err);
            }
        }

        collect(rx, urls).await
    }

    /// Dispatch a batch without retaining join handles, relying solely on
    /// the completion channel to gather results.
    ///
    /// Same per-task behavior as [`Dispatcher::dispatch`]; the orchestrator
    /// drains the channel until one outcome per input has arrived. Channel
    /// closure (every sender dropped) is the backstop, so a task that dies
    /// without sending cannot stall the collection loop; its slot is
    /// reported as a [`DispatchError::Task`] failure.
    pub async fn dispatch_detached(&self, urls: &[String]) -> Vec<Outcome<String>> {
        if urls.is_empty() {
            return Vec::new();
        }

        info!(
            "dispatching batch of {} requests (detached, max parallel: {:?})",
            urls.len(),
            self.options().max_parallel
        );

        let gate = concurrency_gate(self.options().max_parallel);
        let (tx, rx) = mpsc::channel::<Completion>(urls.len());

        for (index, url) in urls.iter().enumerate() {
            tokio::spawn(run_task(
                self.client().clone(),
                url.clone(),
                index,
                tx.clone(),
                gate.clone(),
            ));
        }
        drop(tx);

        collect(rx, urls).await
    }
}

fn concurrency_gate(max_parallel: Option<usize>) -> Option<Arc<Semaphore>> {
    max_parallel.map(|limit| Arc::new(Semaphore::new(limit.max(1))))
}

/// Fetch one URL and report exactly one tagged outcome.
async fn run_task(
    client: Client,
    url: String,
    index: usize,
    tx: mpsc::Sender<Completion>,
    gate: Option<Arc<Semaphore>>,
) {
    let _permit = match gate {
        Some(semaphore) => Some(semaphore.acquire_owned().await.unwrap()),
        None => None,
    };

    let outcome = fetch_url(&client, &url).await;
    // The receiver only disappears if the orchestrator was dropped early;
    // in that case there is nobody left to report to.
    let _ = tx.send((index, outcome)).await;
}

/// Drain tagged completions into input-order slots.
async fn collect(mut rx: mpsc::Receiver<Completion>, urls: &[String]) -> Vec<Outcome<String>> {
    let mut slots: Vec<Option<Outcome<String>>> = urls.iter().map(|_| None).collect();

    let mut received = 0;
    while received < urls.len() {
        match rx.recv().await {
            Some((index, outcome)) => {
                slots[index] = Some(outcome);
                received += 1;
            }
            // Every sender is gone; nothing more can arrive.
            None => break,
        }
    }

    let results: Vec<Outcome<String>> = slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.unwrap_or_else(|| {
                warn!("no outcome reported for {}", urls[index]);
                Outcome::Failure(DispatchError::Task {
                    url: urls[index].clone(),
                    message: "task terminated without reporting an outcome".to_string(),
                })
            })
        })
        .collect();

    let succeeded = results.iter().filter(|r| r.is_success()).count();
    info!(
        "batch complete: {}/{} requests succeeded",
        succeeded,
        results.len()
    );

    results
}
