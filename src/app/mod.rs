//! Application-level plumbing shared by the binary

pub mod error_handling;

pub use error_handling::{fatal_error_message, handle_fatal_error};
