//! Completion service adapters

mod http_completion;
mod wire;

pub use http_completion::HttpCompletionService;
