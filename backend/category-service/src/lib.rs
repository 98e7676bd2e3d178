pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use handlers::AppState;
pub use services::{CategoryFeedService, CategoryRanker, CategoryStore, InterestSignals, MemoryStore};
