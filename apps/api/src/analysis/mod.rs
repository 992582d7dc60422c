//! Response interpreters — the call-site-specific post-processors sitting
//! between the HTTP handlers and the AI orchestrator. Each interpreter builds
//! its prompts, hands them to the orchestrator, and turns whatever comes back
//! into the contract its endpoint promises.

pub mod categorize;
pub mod coaching;
pub mod handlers;
pub mod prompts;
pub mod scoring;
