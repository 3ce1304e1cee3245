//! Submission pipeline: form state in, one POST out, tri-state result back.

use serde_json::Value;

use crate::config::{FormState, FormTypeConfig};

/// Lifecycle of the final submission, as shown on the review screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Success,
    Error,
}

/// Resolved result of one submit attempt. The status never remains idle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub status: SubmissionStatus,
    pub message: String,
}

/// Serializes mapped form state and POSTs it to the configured webhook.
pub struct SubmissionPipeline {
    client: reqwest::blocking::Client,
}

impl Default for SubmissionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionPipeline {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Maps the form state through the configuration's payload mapper and
    /// POSTs the result as JSON. Mapping is synchronous and performs no I/O;
    /// the form state itself is never mutated. Any 2xx is success; every
    /// other status, and transport failure, reports an error the user can
    /// retry from the review screen.
    pub fn submit(&self, config: &FormTypeConfig, state: &FormState) -> SubmissionOutcome {
        let payload: Value = (config.map_to_payload)(state);
        tracing::info!(
            form_type = config.form_type_id,
            endpoint = %config.submission_endpoint,
            "submitting form"
        );

        match self
            .client
            .post(&config.submission_endpoint)
            .json(&payload)
            .send()
        {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    SubmissionOutcome {
                        status: SubmissionStatus::Success,
                        message: config.success_message.to_string(),
                    }
                } else {
                    let body = response.text().unwrap_or_default();
                    tracing::warn!(
                        form_type = config.form_type_id,
                        status = status.as_u16(),
                        "submission rejected"
                    );
                    SubmissionOutcome {
                        status: SubmissionStatus::Error,
                        message: format!(
                            "Submission failed with status {}: {}",
                            status.as_u16(),
                            body
                        ),
                    }
                }
            }
            Err(err) => {
                tracing::warn!(form_type = config.form_type_id, error = %err, "submission failed");
                SubmissionOutcome {
                    status: SubmissionStatus::Error,
                    message: "Submission failed: the request could not be delivered.".to_string(),
                }
            }
        }
    }
}
