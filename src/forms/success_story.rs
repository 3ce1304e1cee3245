//! Buyer/Seller Success Story wizard: a closed-deal social spotlight.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::config::mapping::{
    nested_str, only_if, slice_str, splat_photo_urls, upload_records, yes_no_to_bool,
};
use crate::config::{ComponentId, FormState, FormTypeConfig, StepDescriptor};

pub const FORM_TYPE_ID: &str = "success-story";

pub fn config() -> FormTypeConfig {
    FormTypeConfig {
        form_type_id: FORM_TYPE_ID,
        name: "Success Story",
        initial_data: initial_data(),
        steps: vec![
            StepDescriptor::new(
                "contact",
                ComponentId::ContactDetails,
                "Your details",
                "user",
                "contact",
            ),
            StepDescriptor::new(
                "client-type",
                ComponentId::ClientType,
                "Buyer or seller?",
                "handshake",
                "clientType",
            ),
            StepDescriptor::new(
                "story",
                ComponentId::StoryDetails,
                "The story",
                "book",
                "story",
            ),
            StepDescriptor::new(
                "quote",
                ComponentId::TestimonialQuote,
                "Client quote",
                "quote",
                "testimonial",
            )
            .with_optional(),
            StepDescriptor::new(
                "photos",
                ComponentId::PhotoGallery,
                "Celebration photos",
                "camera",
                "photos",
            ),
            StepDescriptor::new(
                "permission",
                ComponentId::SharingPermission,
                "Sharing permission",
                "shield",
                "permission",
            ),
        ],
        intro: Some(ComponentId::Intro),
        review: Some(ComponentId::Review),
        map_to_payload: Arc::new(map_to_payload),
        submission_endpoint: format!("{}/success-story", super::WEBHOOK_BASE),
        success_message: "Story received! We'll draft the post and send it over for approval.",
    }
}

fn initial_data() -> FormState {
    let mut state = FormState::new();
    state.insert("contact".into(), json!({"name": "", "email": "", "phone": ""}));
    state.insert("clientType".into(), json!(""));
    state.insert("story".into(), json!(""));
    state.insert("testimonial".into(), json!({"quote": "", "clientName": ""}));
    state.insert("photos".into(), json!([]));
    state.insert("permission".into(), json!(""));
    state
}

fn map_to_payload(state: &FormState) -> Value {
    let quote = nested_str(state, "testimonial", "quote");
    let has_quote = quote
        .as_str()
        .map(|raw| !raw.is_empty())
        .unwrap_or(false);

    let mut payload = Map::new();
    payload.insert("form_type".into(), json!(FORM_TYPE_ID));
    payload.insert("agent_name".into(), nested_str(state, "contact", "name"));
    payload.insert("agent_email".into(), nested_str(state, "contact", "email"));
    payload.insert("agent_phone".into(), nested_str(state, "contact", "phone"));
    payload.insert("client_type".into(), slice_str(state, "clientType"));
    payload.insert("story".into(), slice_str(state, "story"));
    payload.insert("testimonial_quote".into(), only_if(has_quote, quote));
    payload.insert(
        "testimonial_client_name".into(),
        only_if(has_quote, nested_str(state, "testimonial", "clientName")),
    );
    payload.insert(
        "permission_to_share".into(),
        yes_no_to_bool(state.get("permission").unwrap_or(&Value::Null)),
    );
    splat_photo_urls(&mut payload, "photo_url", &upload_records(state, "photos"));
    Value::Object(payload)
}
