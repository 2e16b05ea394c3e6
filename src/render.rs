//! Rendering subsystem: the display table projection, the coordinator that applies input and
//! load results, and the terminal front end.

pub mod protocol;
pub mod service;
pub mod table;
pub mod ui;

pub use service::RenderLoopState;
pub use table::{render, DisplayRow, DisplayTable, NavigationCell};
