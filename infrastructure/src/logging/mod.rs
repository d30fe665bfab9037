//! Logging infrastructure: structured deliberation transcripts.
//!
//! Provides [`JsonlTranscriptLogger`], a JSONL file writer that implements
//! the [`EventSink`](council_application::EventSink) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlTranscriptLogger;
