pub mod config;
pub mod display;
pub mod error;
pub mod fetch;
pub mod infra;
pub mod input;
pub mod model;
pub mod output;
pub mod path;
pub mod render;
pub mod selection;
pub mod services;
pub mod session;
pub mod style;
