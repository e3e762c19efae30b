//! # CLI Behavior
//!
//! This is **one possible UI client** for gct, not the application itself. The
//! CLI is the only place that knows about stdout, stderr and exit codes.
//!
//! For the overall architecture, see the `gctapp` crate documentation.
//!
//! ## Naked Execution (`gct`)
//!
//! Running `gct` with no arguments is `gct list`.
//!
//! ## Errors
//!
//! Parse errors from clap are not printed by clap. They become `InvalidInput`
//! errors and go through the same presenter as every other failure
//! ([`render::render_error`]). Help and version output are printed as usual.
//!
//! ## Module Structure
//!
//! - `commands`: Parse, set up logging and context, dispatch, print
//! - `render`: Output formatting (table, json, plain, messages, errors)
//! - `setup`: Argument definitions via clap, version string
//! - `styles`: Terminal styling

mod commands;
pub mod render;
pub mod setup;
mod styles;

pub use commands::run;
