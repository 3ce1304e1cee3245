//! Open House wizard: promotion for an upcoming open-house event.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::config::mapping::{
    nested_str, only_if, splat_photo_urls, upload_records, yes_no_to_bool,
};
use crate::config::{ComponentId, FormState, FormTypeConfig, StepDescriptor};

pub const FORM_TYPE_ID: &str = "open-house";

pub fn config() -> FormTypeConfig {
    FormTypeConfig {
        form_type_id: FORM_TYPE_ID,
        name: "Open House",
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
                "address",
                ComponentId::PropertyAddress,
                "Property address",
                "map-pin",
                "address",
            ),
            StepDescriptor::new(
                "schedule",
                ComponentId::EventSchedule,
                "Date and time",
                "calendar",
                "schedule",
            ),
            StepDescriptor::new(
                "registration",
                ComponentId::RegistrationPolicy,
                "Guest registration",
                "clipboard",
                "registration",
            ),
            StepDescriptor::new(
                "co-host",
                ComponentId::CoHost,
                "Co-hosting agent",
                "users",
                "coHost",
            )
            .with_optional(),
            StepDescriptor::new(
                "photos",
                ComponentId::PhotoGallery,
                "Property photos",
                "camera",
                "photos",
            ),
        ],
        intro: Some(ComponentId::Intro),
        review: Some(ComponentId::Review),
        map_to_payload: Arc::new(map_to_payload),
        submission_endpoint: format!("{}/open-house", super::WEBHOOK_BASE),
        success_message: "Open house promo request received! We'll confirm scheduling shortly.",
    }
}

fn initial_data() -> FormState {
    let mut state = FormState::new();
    state.insert("contact".into(), json!({"name": "", "email": "", "phone": ""}));
    state.insert(
        "address".into(),
        json!({"street": "", "city": "", "state": "", "zip": ""}),
    );
    state.insert(
        "schedule".into(),
        json!({"date": "", "startTime": "", "endTime": ""}),
    );
    state.insert("registration".into(), json!(""));
    state.insert("coHost".into(), json!({"name": "", "email": ""}));
    state.insert("photos".into(), json!([]));
    state
}

fn map_to_payload(state: &FormState) -> Value {
    let registration_required =
        yes_no_to_bool(state.get("registration").unwrap_or(&Value::Null));
    let co_host_name = nested_str(state, "coHost", "name");
    let has_co_host = co_host_name
        .as_str()
        .map(|name| !name.is_empty())
        .unwrap_or(false);

    let mut payload = Map::new();
    payload.insert("form_type".into(), json!(FORM_TYPE_ID));
    payload.insert("agent_name".into(), nested_str(state, "contact", "name"));
    payload.insert("agent_email".into(), nested_str(state, "contact", "email"));
    payload.insert("agent_phone".into(), nested_str(state, "contact", "phone"));
    payload.insert("street".into(), nested_str(state, "address", "street"));
    payload.insert("city".into(), nested_str(state, "address", "city"));
    payload.insert("state".into(), nested_str(state, "address", "state"));
    payload.insert("zip".into(), nested_str(state, "address", "zip"));
    payload.insert("event_date".into(), nested_str(state, "schedule", "date"));
    payload.insert(
        "event_start_time".into(),
        nested_str(state, "schedule", "startTime"),
    );
    payload.insert(
        "event_end_time".into(),
        nested_str(state, "schedule", "endTime"),
    );
    payload.insert("registration_required".into(), registration_required);
    payload.insert("co_host_name".into(), only_if(has_co_host, co_host_name));
    payload.insert(
        "co_host_email".into(),
        only_if(has_co_host, nested_str(state, "coHost", "email")),
    );
    splat_photo_urls(&mut payload, "photo_url", &upload_records(state, "photos"));
    Value::Object(payload)
}
