//! Agentic workflows exposed by the library.

pub mod quote;
