//! Prompt construction for every completion call the council makes.

pub mod template;

pub use template::{NO_PREVIOUS_ANSWER, PromptTemplate, REFINEMENT_INSTRUCTION};
