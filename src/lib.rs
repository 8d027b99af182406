pub use sanzo_cli::cli;
pub use sanzo_cli::commands;
pub use sanzo_cli::config;
pub use sanzo_cli::logging;
pub use sanzo_cli::AppConfig;

pub use sanzo_core as core;
pub use sanzo_core::catalog;
pub use sanzo_core::database as db;
pub use sanzo_core::engine;
pub use sanzo_core::export;
pub use sanzo_core::generator;
pub use sanzo_core::model;
