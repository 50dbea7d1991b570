// file: src/launcher/mod.rs
// description: backend launcher module exports
// reference: internal module structure

pub mod bootstrap;
pub mod env_file;
pub mod port;
pub mod provision;

pub use bootstrap::launch;
pub use env_file::{BackendEnv, PLACEHOLDER_SECRET};
pub use port::{ensure_port_free, port_in_use};
pub use provision::{Provisioner, VenvProvisioner};
