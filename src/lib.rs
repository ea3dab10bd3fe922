//! # Volley
//!
//! Fan-out/fan-in dispatcher for batches of concurrent HTTP GET requests.
//!
//! Given an ordered batch of URLs, volley launches one task per input,
//! performs the requests concurrently, and returns exactly one
//! success-or-failure [`Outcome`] per input, in input order, regardless of
//! completion order. A failing request never panics the caller: partial
//! failure is the normal case, and every error is reported as data.
//!
//! ```no_run
//! use volley::{unpack_outcomes, Dispatcher};
//!
//! # async fn demo() {
//! let urls = vec!["https://example.com/a".to_string(), "https://example.com/b".to_string()];
//! let outcomes = Dispatcher::new().dispatch(&urls).await;
//! let (bodies, errors) = unpack_outcomes(outcomes);
//! # let _ = (bodies, errors);
//! # }
//! ```
//!
//! ## Modules
//!
//! - `dispatch` - batch dispatch, the per-task GET operation, and options
//! - `error` - the error payload carried by failed outcomes
//! - `outcome` - the per-request result type and batch projection helpers

pub mod dispatch;
pub mod error;
pub mod outcome;

pub use dispatch::{fetch_url, DispatchOptions, Dispatcher};
pub use error::DispatchError;
pub use outcome::{unpack_outcomes, Outcome};
