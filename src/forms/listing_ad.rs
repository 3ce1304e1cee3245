//! Listing Ad wizard: a paid social campaign for an active listing.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::config::mapping::{nested_str, slice_str, splat_photo_urls, upload_records};
use crate::config::{ComponentId, FormState, FormTypeConfig, StepDescriptor};

pub const FORM_TYPE_ID: &str = "listing-ad";

/// Listing photo galleries need at least this many uploads before the step
/// reports valid.
pub const MIN_PHOTOS: usize = 4;

pub fn config() -> FormTypeConfig {
    FormTypeConfig {
        form_type_id: FORM_TYPE_ID,
        name: "Listing Ad",
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
                "details",
                ComponentId::ListingDetails,
                "Listing details",
                "home",
                "details",
            ),
            StepDescriptor::new(
                "goal",
                ComponentId::AdGoal,
                "Campaign goal",
                "target",
                "adGoal",
            ),
            StepDescriptor::new(
                "photos",
                ComponentId::PhotoGallery,
                "Listing photos",
                "camera",
                "photos",
            ),
            StepDescriptor::new(
                "notes",
                ComponentId::ExtraNotes,
                "Anything else?",
                "pencil",
                "notes",
            )
            .with_optional(),
        ],
        intro: Some(ComponentId::Intro),
        review: Some(ComponentId::Review),
        map_to_payload: Arc::new(map_to_payload),
        submission_endpoint: format!("{}/listing-ad", super::WEBHOOK_BASE),
        success_message:
            "Thanks! Your listing ad request is in. We'll have a proof over to you within two business days.",
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
        "details".into(),
        json!({"price": "", "bedrooms": "", "bathrooms": "", "sqft": "", "listingUrl": ""}),
    );
    state.insert("adGoal".into(), json!(""));
    state.insert("photos".into(), json!([]));
    state.insert("notes".into(), json!(""));
    state
}

fn map_to_payload(state: &FormState) -> Value {
    let mut payload = Map::new();
    payload.insert("form_type".into(), json!(FORM_TYPE_ID));
    payload.insert("agent_name".into(), nested_str(state, "contact", "name"));
    payload.insert("agent_email".into(), nested_str(state, "contact", "email"));
    payload.insert("agent_phone".into(), nested_str(state, "contact", "phone"));
    payload.insert("street".into(), nested_str(state, "address", "street"));
    payload.insert("city".into(), nested_str(state, "address", "city"));
    payload.insert("state".into(), nested_str(state, "address", "state"));
    payload.insert("zip".into(), nested_str(state, "address", "zip"));
    payload.insert("price".into(), nested_str(state, "details", "price"));
    payload.insert("bedrooms".into(), nested_str(state, "details", "bedrooms"));
    payload.insert("bathrooms".into(), nested_str(state, "details", "bathrooms"));
    payload.insert("sqft".into(), nested_str(state, "details", "sqft"));
    payload.insert("listing_url".into(), nested_str(state, "details", "listingUrl"));
    payload.insert("ad_goal".into(), slice_str(state, "adGoal"));
    payload.insert("notes".into(), slice_str(state, "notes"));
    splat_photo_urls(&mut payload, "photo_url", &upload_records(state, "photos"));
    Value::Object(payload)
}
