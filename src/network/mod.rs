pub mod config;
pub mod mlp;
pub mod params;

pub use config::NetworkConfig;
pub use mlp::{ForwardCache, Mlp};
pub use params::NetworkParameters;
