pub mod config;
pub mod defaults;
pub mod games;
pub mod id_generator;
pub mod identifiers;
pub mod logger;
pub mod mint;
pub mod scores;

pub use identifiers::*;

pub mod version {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
