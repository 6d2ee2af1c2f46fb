// Client library root
// Effectful helpers for the supermarket front end: HTTP, local storage,
// notifications, clipboard, timing wrappers and view state.

pub mod config;
pub mod data;
pub mod error;
pub mod notify;
pub mod services;
pub mod timing;
pub mod ui;

pub use error::{ClientError, Result};
