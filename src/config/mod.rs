//! Configuration contract for the wizard products.
//!
//! A [`FormTypeConfig`] is pure data: the ordered step list, the initial form
//! state, the component bindings for the intro/review screens, and the payload
//! mapper invoked at submission time. One instance exists per wizard product
//! and is immutable after construction; the engine never carries per-step
//! business rules of its own.

pub mod mapping;
pub mod registry;

pub use registry::get_form_config;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::errors::FormError;

/// In-memory form data: one JSON slice per step data key.
pub type FormState = BTreeMap<String, Value>;

type MapperCallback = dyn Fn(&FormState) -> Value + Send + Sync;

/// Pure mapping from accumulated form state to the submission payload.
pub type PayloadMapper = Arc<MapperCallback>;

/// Closed set of UI components a configuration may bind a screen to.
///
/// Configurations reference components by tag rather than by string id, so an
/// unknown component is unrepresentable and coverage is checked at compile
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Intro,
    Review,
    ContactDetails,
    PropertyAddress,
    ListingDetails,
    AdGoal,
    PhotoGallery,
    SinglePhoto,
    GiveawayPrize,
    EntryDeadline,
    TargetArea,
    LandingPage,
    EventSchedule,
    RegistrationPolicy,
    CoHost,
    FootageLinks,
    VideoStyle,
    MusicPreference,
    BrandingAssets,
    ExtraNotes,
    ClientType,
    StoryDetails,
    TestimonialQuote,
    SharingPermission,
}

/// Declarative description of a single wizard step.
#[derive(Debug, Clone)]
pub struct StepDescriptor {
    pub step_id: &'static str,
    pub component: ComponentId,
    pub title: &'static str,
    pub icon: &'static str,
    pub data_key: &'static str,
    pub is_optional: bool,
}

impl StepDescriptor {
    pub fn new(
        step_id: &'static str,
        component: ComponentId,
        title: &'static str,
        icon: &'static str,
        data_key: &'static str,
    ) -> Self {
        Self {
            step_id,
            component,
            title,
            icon,
            data_key,
            is_optional: false,
        }
    }

    /// Optional steps still pass the validity gate; their component simply
    /// reports valid immediately.
    pub fn with_optional(mut self) -> Self {
        self.is_optional = true;
        self
    }
}

/// Full description of one wizard product.
pub struct FormTypeConfig {
    pub form_type_id: &'static str,
    pub name: &'static str,
    pub initial_data: FormState,
    pub steps: Vec<StepDescriptor>,
    pub intro: Option<ComponentId>,
    pub review: Option<ComponentId>,
    pub map_to_payload: PayloadMapper,
    pub submission_endpoint: String,
    pub success_message: &'static str,
}

impl FormTypeConfig {
    /// Checks the structural invariants every configuration must uphold:
    /// unique step ids, every data key present in the initial data, and a
    /// parseable submission endpoint.
    pub fn validate(&self) -> Result<(), FormError> {
        let mut seen = std::collections::HashSet::new();
        for step in &self.steps {
            if !seen.insert(step.step_id) {
                return Err(FormError::InvalidConfig(format!(
                    "duplicate step id `{}` in `{}`",
                    step.step_id, self.form_type_id
                )));
            }
            if !self.initial_data.contains_key(step.data_key) {
                return Err(FormError::InvalidConfig(format!(
                    "step `{}` binds data key `{}` missing from initial data of `{}`",
                    step.step_id, step.data_key, self.form_type_id
                )));
            }
        }
        Url::parse(&self.submission_endpoint).map_err(|err| {
            FormError::InvalidConfig(format!(
                "submission endpoint of `{}` is not a URL: {}",
                self.form_type_id, err
            ))
        })?;
        Ok(())
    }

    /// Position and descriptor of a step, looked up by id.
    pub fn step_by_id(&self, step_id: &str) -> Option<(usize, &StepDescriptor)> {
        self.steps
            .iter()
            .enumerate()
            .find(|(_, step)| step.step_id == step_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_config(steps: Vec<StepDescriptor>) -> FormTypeConfig {
        let mut initial_data = FormState::new();
        initial_data.insert("city".into(), json!(""));
        FormTypeConfig {
            form_type_id: "test",
            name: "Test",
            initial_data,
            steps,
            intro: None,
            review: None,
            map_to_payload: Arc::new(|_| json!({})),
            submission_endpoint: "https://hooks.example.com/test".into(),
            success_message: "ok",
        }
    }

    #[test]
    fn validate_accepts_well_formed_config() {
        let config = minimal_config(vec![StepDescriptor::new(
            "city",
            ComponentId::TargetArea,
            "City",
            "map-pin",
            "city",
        )]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_step_ids() {
        let step = StepDescriptor::new("city", ComponentId::TargetArea, "City", "map-pin", "city");
        let config = minimal_config(vec![step.clone(), step]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unbound_data_key() {
        let config = minimal_config(vec![StepDescriptor::new(
            "zip",
            ComponentId::TargetArea,
            "Zip",
            "map-pin",
            "zip",
        )]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_malformed_endpoint() {
        let mut config = minimal_config(Vec::new());
        config.submission_endpoint = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn step_lookup_returns_position() {
        let config = minimal_config(vec![StepDescriptor::new(
            "city",
            ComponentId::TargetArea,
            "City",
            "map-pin",
            "city",
        )]);
        let (index, step) = config.step_by_id("city").unwrap();
        assert_eq!(index, 0);
        assert_eq!(step.data_key, "city");
        assert!(config.step_by_id("missing").is_none());
    }
}
