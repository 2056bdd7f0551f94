//! Mode routing
//!
//! - Server mode (HTTP server), the default
//! - CLI mode (direct database commands)

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub use cli::run_cli;
#[cfg(feature = "server")]
pub use server::run_server;
