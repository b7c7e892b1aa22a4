pub mod config;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use error::AppError;
pub use routes::{router, AppState};
