//! Video Edit Request wizard: raw footage in, branded cut out.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::config::mapping::{
    join_non_empty, nested_str, single_photo_url, slice_str,
};
use crate::config::{ComponentId, FormState, FormTypeConfig, StepDescriptor};

pub const FORM_TYPE_ID: &str = "video-edit";

pub fn config() -> FormTypeConfig {
    FormTypeConfig {
        form_type_id: FORM_TYPE_ID,
        name: "Video Edit Request",
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
                "footage",
                ComponentId::FootageLinks,
                "Raw footage links",
                "film",
                "footageLinks",
            ),
            StepDescriptor::new(
                "style",
                ComponentId::VideoStyle,
                "Editing style",
                "sparkles",
                "videoStyle",
            ),
            StepDescriptor::new(
                "music",
                ComponentId::MusicPreference,
                "Music preference",
                "music",
                "musicPreference",
            )
            .with_optional(),
            StepDescriptor::new(
                "branding",
                ComponentId::BrandingAssets,
                "Your logo",
                "badge",
                "logo",
            )
            .with_optional(),
            StepDescriptor::new(
                "notes",
                ComponentId::ExtraNotes,
                "Editing notes",
                "pencil",
                "notes",
            )
            .with_optional(),
        ],
        intro: Some(ComponentId::Intro),
        review: Some(ComponentId::Review),
        map_to_payload: Arc::new(map_to_payload),
        submission_endpoint: format!("{}/video-edit", super::WEBHOOK_BASE),
        success_message: "Edit request received! Your editor will reach out if anything is missing.",
    }
}

fn initial_data() -> FormState {
    let mut state = FormState::new();
    state.insert("contact".into(), json!({"name": "", "email": "", "phone": ""}));
    state.insert("footageLinks".into(), json!([]));
    state.insert("videoStyle".into(), json!(""));
    state.insert("musicPreference".into(), json!(""));
    state.insert("logo".into(), json!(null));
    state.insert("notes".into(), json!(""));
    state
}

fn map_to_payload(state: &FormState) -> Value {
    let mut payload = Map::new();
    payload.insert("form_type".into(), json!(FORM_TYPE_ID));
    payload.insert("agent_name".into(), nested_str(state, "contact", "name"));
    payload.insert("agent_email".into(), nested_str(state, "contact", "email"));
    payload.insert("agent_phone".into(), nested_str(state, "contact", "phone"));
    payload.insert(
        "footage_links".into(),
        join_non_empty(state.get("footageLinks").unwrap_or(&Value::Null), ", "),
    );
    payload.insert("video_style".into(), slice_str(state, "videoStyle"));
    payload.insert("music_preference".into(), slice_str(state, "musicPreference"));
    payload.insert("logo_url".into(), single_photo_url(state, "logo"));
    payload.insert("notes".into(), slice_str(state, "notes"));
    Value::Object(payload)
}
