//! pdfchat front end: configuration, logging and a terminal session driving
//! the core state machine against the backend.
pub mod commands;
pub mod platform;
