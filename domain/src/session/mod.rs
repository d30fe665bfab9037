//! Conversation primitives sent to the completion service.

pub mod entities;
