//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace + timeout layers)
//!     → converter layer (rewrite Authorization)
//!     → forward_handler (hyper client → upstream)
//!     → response streamed back unchanged
//! ```

pub mod middleware;
pub mod server;

pub use middleware::convert_authorization;
pub use server::{shutdown_signal, HttpServer};
