pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

pub use sanzo_core as core;
pub use sanzo_core::catalog;
pub use sanzo_core::database as db;
pub use sanzo_core::engine;
pub use sanzo_core::export;
pub use sanzo_core::model;

pub use sanzo_core::AppConfig;
