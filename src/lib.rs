#![doc(test(attr(deny(warnings))))]

//! Leadform Core drives the multi-step lead-generation wizards (listing ads,
//! giveaways, open houses, video edit requests, success stories) behind the
//! agency's agent-facing forms: step sequencing, validation gating, upload
//! coordination, and webhook submission.

pub mod config;
pub mod engine;
pub mod errors;
pub mod forms;
pub mod recall;
pub mod submit;
pub mod upload;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Leadform Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
