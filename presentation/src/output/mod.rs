//! Result and event output

pub mod console;
pub mod events;
pub mod formatter;
