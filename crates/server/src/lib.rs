// Library exports so router-level tests (and embedders) can assemble the
// service without going through the binary.

pub mod config;
pub mod http;
pub mod state;
pub mod version;

pub use config::{CorsConfig, ServerConfig};
pub use state::ServiceState;
