pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod proxy;
pub mod server;
pub mod translate;

pub use config::ShimConfig;
pub use error::{Result, ShimError};
pub use gateway::UpstreamGateway;
pub use logging::SharedLogger;
pub use server::{build_router, AppState};
