//! Fan-out/fan-in dispatch of HTTP GET batches
//!
//! Given an ordered batch of URLs, the dispatcher launches one task per
//! input, lets them run concurrently, and collects exactly one [`Outcome`]
//! per input in input order, regardless of completion order. Two collection
//! disciplines are offered: [`Dispatcher::dispatch`] joins every task before
//! draining results, while [`Dispatcher::dispatch_detached`] relies solely
//! on the completion channel.
//!
//! [`Outcome`]: crate::outcome::Outcome

mod batch;
pub mod fetch;

#[cfg(test)]
mod batch_tests;

pub use fetch::fetch_url;

use reqwest::Client;
use tokio::sync::watch;

/// Tuning knobs for batch dispatch.
#[derive(Debug, Clone, Default)]
pub struct DispatchOptions {
    /// Maximum number of requests in flight at once. `None` fans out
    /// unbounded, one task per input, which is the intended default for the
    /// documented low-batch-size use case.
    pub max_parallel: Option<usize>,
    /// Cancellation signal, reserved for future use. Dispatch currently
    /// runs every task to completion regardless of this receiver.
    pub cancel: Option<watch::Receiver<bool>>,
}

/// Dispatches batches of concurrent GET requests over a shared HTTP client.
///
/// A `Dispatcher` holds no per-batch state: a batch and its outcomes exist
/// only for the duration of one dispatch call.
pub struct Dispatcher {
    client: Client,
    options: DispatchOptions,
}

impl Dispatcher {
    /// Create a dispatcher with a default client and default options.
    pub fn new() -> Self {
        Self::with_options(DispatchOptions::default())
    }

    /// Create a dispatcher with a default client and the given options.
    pub fn with_options(options: DispatchOptions) -> Self {
        Self::with_client(Client::new(), options)
    }

    /// Create a dispatcher over an existing client, e.g. one shared with
    /// other parts of the application.
    pub fn with_client(client: Client, options: DispatchOptions) -> Self {
        Self { client, options }
    }

    /// The options this dispatcher was built with.
    pub fn options(&self) -> &DispatchOptions {
        &self.options
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
