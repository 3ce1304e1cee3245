//! Giveaway wizard: a prize campaign used to capture local buyer leads.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::config::mapping::{
    nested_str, only_if, single_photo_url, slice_str, yes_no_to_bool,
};
use crate::config::{ComponentId, FormState, FormTypeConfig, StepDescriptor};

pub const FORM_TYPE_ID: &str = "giveaway";

pub fn config() -> FormTypeConfig {
    FormTypeConfig {
        form_type_id: FORM_TYPE_ID,
        name: "Giveaway",
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
                "prize",
                ComponentId::GiveawayPrize,
                "The prize",
                "gift",
                "prize",
            ),
            StepDescriptor::new(
                "deadline",
                ComponentId::EntryDeadline,
                "Entry deadline",
                "calendar",
                "deadline",
            ),
            StepDescriptor::new(
                "area",
                ComponentId::TargetArea,
                "Target area",
                "map-pin",
                "targetArea",
            ),
            StepDescriptor::new(
                "landing-page",
                ComponentId::LandingPage,
                "Landing page",
                "globe",
                "landingPage",
            ),
            StepDescriptor::new(
                "photo",
                ComponentId::SinglePhoto,
                "Promo photo",
                "camera",
                "promoPhoto",
            )
            .with_optional(),
        ],
        intro: Some(ComponentId::Intro),
        review: Some(ComponentId::Review),
        map_to_payload: Arc::new(map_to_payload),
        submission_endpoint: format!("{}/giveaway", super::WEBHOOK_BASE),
        success_message: "Giveaway request received! Watch your inbox for the campaign draft.",
    }
}

fn initial_data() -> FormState {
    let mut state = FormState::new();
    state.insert("contact".into(), json!({"name": "", "email": "", "phone": ""}));
    state.insert("prize".into(), json!({"description": "", "value": ""}));
    state.insert("deadline".into(), json!(""));
    state.insert("targetArea".into(), json!(""));
    state.insert(
        "landingPage".into(),
        json!({"hasLandingPage": "", "url": ""}),
    );
    state.insert("promoPhoto".into(), json!(null));
    state
}

fn map_to_payload(state: &FormState) -> Value {
    let has_landing_page = yes_no_to_bool(
        state
            .get("landingPage")
            .and_then(|slice| slice.get("hasLandingPage"))
            .unwrap_or(&Value::Null),
    );
    let landing_gate = has_landing_page.as_bool().unwrap_or(false);

    let mut payload = Map::new();
    payload.insert("form_type".into(), json!(FORM_TYPE_ID));
    payload.insert("agent_name".into(), nested_str(state, "contact", "name"));
    payload.insert("agent_email".into(), nested_str(state, "contact", "email"));
    payload.insert("agent_phone".into(), nested_str(state, "contact", "phone"));
    payload.insert(
        "prize_description".into(),
        nested_str(state, "prize", "description"),
    );
    payload.insert("prize_value".into(), nested_str(state, "prize", "value"));
    payload.insert("entry_deadline".into(), slice_str(state, "deadline"));
    payload.insert("target_area".into(), slice_str(state, "targetArea"));
    payload.insert("has_landing_page".into(), has_landing_page);
    // The URL only travels when the agent said they have a page.
    payload.insert(
        "landing_page_url".into(),
        only_if(landing_gate, nested_str(state, "landingPage", "url")),
    );
    payload.insert("promo_photo_url".into(), single_photo_url(state, "promoPhoto"));
    Value::Object(payload)
}
