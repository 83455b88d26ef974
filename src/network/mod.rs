pub mod config;
pub mod network;

pub use config::NetworkConfig;
pub use network::{Network, Parameters};
