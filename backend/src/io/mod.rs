//! # I/O Layer
//!
//! The HTTP surface of the club manager. Handlers translate requests into
//! domain commands, call the services held in `AppState`, and map domain
//! models and errors back into the shared DTOs.

pub mod rest;
