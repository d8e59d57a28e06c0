//! Wire format types for each backend protocol
//!
//! Request/response structs only; the orchestrator consumes complete
//! responses, so no streaming types exist here.

pub mod anthropic;
pub mod google;
pub mod openai;
