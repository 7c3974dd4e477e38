//! Adapters for the workflow ports: HTTP for the real backend and script,
//! terminal I/O for the widget and notifications, and in-memory doubles.

pub mod http;
pub mod in_memory;
pub mod terminal;
