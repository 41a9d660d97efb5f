pub mod aggregate;
pub mod config;
pub mod context;
pub mod data;
pub mod export;
pub mod filter;
pub mod format;
pub mod presentation;
