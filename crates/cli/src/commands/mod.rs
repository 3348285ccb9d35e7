pub mod audit;
pub mod cleanup;
pub mod config;
pub mod consolidate;
pub mod migrate;
pub mod util;

pub use audit::*;
pub use cleanup::*;
pub use config::*;
pub use consolidate::*;
pub use migrate::*;
pub use util::*;
