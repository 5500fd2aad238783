pub mod app;
pub mod catalog;
pub mod config;
pub mod event;
pub mod keys;
pub mod logging;
pub mod plan;
pub mod service;
pub mod tiling;
pub mod tui;
pub mod ui;
