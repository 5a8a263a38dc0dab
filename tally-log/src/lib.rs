//! Logging facade for Tally.
//!
//! Library crates log through the macros re-exported here and never talk to
//! a logging backend directly. Binaries enable the `init` feature and call
//! [`init`] once at startup with a [`LogConfig`], which installs a
//! `tracing-subscriber` pipeline honoring the `RUST_LOG` environment
//! variable.
//!
//! # Conventions
//!
//! Log messages start lowercase and end without punctuation. Prefer short
//! and precise messages over verbose text. Choose the level by these rules:
//!
//! - [`error!`] for bugs and invalid behavior.
//! - [`warn!`] for undesirable behavior.
//! - [`info!`] for messages relevant to the average operator.
//! - [`debug!`] for messages usually relevant to debugging.
//! - [`trace!`] for full auxiliary information, including per-hit decisions.
//!
//! # Example
//!
//! ```
//! tally_log::trace!(site_id = 7u64, "visit excluded");
//! ```
#![warn(missing_docs)]

#[cfg(feature = "init")]
mod setup;

#[cfg(feature = "init")]
pub use setup::*;

pub use tracing::{debug, error, info, trace, warn, Level};
