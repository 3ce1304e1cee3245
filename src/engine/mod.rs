//! Generic multi-step form engine.
//!
//! One [`FormEngine`] drives one wizard session end to end: it owns the form
//! state, tracks the current position and the mounted step's reported
//! validity, resolves which screen to render, and orchestrates the final
//! submission. Step components stay outside the engine; they own their slice,
//! push new values through [`FormEngine::handle_change`], and keep the
//! validity gate current through [`FormEngine::handle_validation_change`].

use std::sync::Arc;

use serde_json::Value;

use crate::config::{
    get_form_config, ComponentId, FormState, FormTypeConfig, StepDescriptor,
};
use crate::errors::FormError;
use crate::submit::{SubmissionPipeline, SubmissionStatus};

/// Navigation and submission bookkeeping for one wizard session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    /// 0 is the intro when one is configured, otherwise the first step; the
    /// slot after the last step is the review.
    pub current_step: usize,
    pub is_current_step_valid: bool,
    pub submission_status: SubmissionStatus,
    pub is_submitting: bool,
    pub submission_message: Option<String>,
}

/// What a forward-navigation request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Blocked by the validity gate (or already on the review).
    Stayed,
    Moved,
    ReachedReview,
    /// No review is configured; the engine submitted directly.
    Submitted,
}

/// What a backward-navigation request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// Already at the entry screen; the shell should leave the wizard.
    ExitWizard,
    /// Blocked (the success screen cannot be navigated away from).
    Stayed,
    Moved,
}

/// Screen to render for the current position, resolved purely from
/// navigation state and configuration.
#[derive(Debug)]
pub enum Screen<'a> {
    Intro {
        component: ComponentId,
    },
    Step {
        descriptor: &'a StepDescriptor,
        value: &'a Value,
    },
    Review {
        component: ComponentId,
        form_data: &'a FormState,
    },
    /// Position without a bound component; rendered as a load error.
    NotFound,
}

pub struct FormEngine {
    config: Arc<FormTypeConfig>,
    pipeline: SubmissionPipeline,
    form_state: FormState,
    nav: NavigationState,
}

impl FormEngine {
    /// Starts a fresh session: form state deep-cloned from the
    /// configuration's initial data, position at the entry screen.
    pub fn new(config: Arc<FormTypeConfig>, pipeline: SubmissionPipeline) -> Self {
        let form_state = config.initial_data.clone();
        let nav = Self::entry_navigation(&config);
        Self {
            config,
            pipeline,
            form_state,
            nav,
        }
    }

    /// Resolves the configuration from the registry first.
    pub fn from_registry(
        form_type_id: &str,
        pipeline: SubmissionPipeline,
    ) -> Result<Self, FormError> {
        let config = get_form_config(form_type_id)
            .ok_or_else(|| FormError::ConfigNotFound(form_type_id.to_string()))?;
        Ok(Self::new(config, pipeline))
    }

    fn entry_navigation(config: &FormTypeConfig) -> NavigationState {
        NavigationState {
            current_step: 0,
            // The intro is self-validating; a first step must assert its own
            // validity once mounted.
            is_current_step_valid: config.intro.is_some(),
            submission_status: SubmissionStatus::Idle,
            is_submitting: false,
            submission_message: None,
        }
    }

    fn step_offset(&self) -> usize {
        usize::from(self.config.intro.is_some())
    }

    fn review_slot(&self) -> usize {
        self.step_offset() + self.config.steps.len()
    }

    fn is_on_intro(&self) -> bool {
        self.nav.current_step == 0 && self.config.intro.is_some()
    }

    /// Replaces one top-level slice. Nested merging is each step component's
    /// own responsibility before it calls this. Keys outside the initial data
    /// shape are ignored.
    pub fn handle_change(&mut self, data_key: &str, value: Value) {
        if let Some(slot) = self.form_state.get_mut(data_key) {
            *slot = value;
        } else {
            tracing::warn!(
                form_type = self.config.form_type_id,
                data_key,
                "change for unknown data key ignored"
            );
        }
    }

    /// Called by the mounted step on every value change (including mount).
    pub fn handle_validation_change(&mut self, is_valid: bool) {
        self.nav.is_current_step_valid = is_valid;
    }

    /// Advances one slot. Gated on the current step's validity everywhere
    /// but the intro. From the last step this lands on the review, or
    /// submits directly when no review is configured. The newly mounted step
    /// must re-assert its validity.
    pub fn handle_next(&mut self) -> Advance {
        if !self.is_on_intro() && !self.nav.is_current_step_valid {
            return Advance::Stayed;
        }
        let review_slot = self.review_slot();
        if self.nav.current_step >= review_slot {
            return Advance::Stayed;
        }

        let next = self.nav.current_step + 1;
        if next == review_slot {
            if self.config.review.is_none() {
                self.handle_submit();
                return Advance::Submitted;
            }
            self.nav.current_step = next;
            self.nav.is_current_step_valid = false;
            return Advance::ReachedReview;
        }

        self.nav.current_step = next;
        self.nav.is_current_step_valid = false;
        Advance::Moved
    }

    /// Steps back one slot. At the entry screen this signals the shell to
    /// leave the wizard; after a successful submission it is a no-op.
    pub fn handle_back(&mut self) -> BackAction {
        if self.nav.current_step == 0 {
            return BackAction::ExitWizard;
        }
        if self.nav.submission_status == SubmissionStatus::Success {
            return BackAction::Stayed;
        }
        self.nav.current_step -= 1;
        // A step completed on the way forward is trusted to still be valid.
        self.nav.is_current_step_valid = true;
        BackAction::Moved
    }

    /// Jumps straight to a configured step, as the review screen's per-field
    /// edit affordance does. Unknown ids leave the position unchanged.
    pub fn jump_to_step(&mut self, step_id: &str) -> bool {
        let Some((index, _)) = self.config.step_by_id(step_id) else {
            return false;
        };
        self.nav.current_step = self.step_offset() + index;
        self.nav.is_current_step_valid = true;
        true
    }

    /// Runs the submission pipeline once. Re-entrant calls while a prior
    /// submission is in flight are ignored; the submitting flag is cleared
    /// whatever the outcome.
    pub fn handle_submit(&mut self) {
        if self.nav.is_submitting {
            return;
        }
        self.nav.is_submitting = true;
        let outcome = self.pipeline.submit(&self.config, &self.form_state);
        self.nav.submission_status = outcome.status;
        self.nav.submission_message = Some(outcome.message);
        self.nav.is_submitting = false;
    }

    /// Restores the session to its freshly initialized shape.
    pub fn handle_reset(&mut self) {
        self.form_state = self.config.initial_data.clone();
        self.nav = Self::entry_navigation(&self.config);
    }

    /// Resolves the screen for the current position.
    pub fn screen(&self) -> Screen<'_> {
        if self.nav.current_step == 0 {
            if let Some(component) = self.config.intro {
                return Screen::Intro { component };
            }
        }

        if let Some(index) = self.nav.current_step.checked_sub(self.step_offset()) {
            if let Some(descriptor) = self.config.steps.get(index) {
                if let Some(value) = self.form_state.get(descriptor.data_key) {
                    return Screen::Step { descriptor, value };
                }
            }
        }

        if self.nav.current_step == self.review_slot() {
            if let Some(component) = self.config.review {
                return Screen::Review {
                    component,
                    form_data: &self.form_state,
                };
            }
        }

        Screen::NotFound
    }

    pub fn form_state(&self) -> &FormState {
        &self.form_state
    }

    pub fn slice(&self, data_key: &str) -> Option<&Value> {
        self.form_state.get(data_key)
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn config(&self) -> &FormTypeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn three_step_config(intro: bool, review: bool) -> Arc<FormTypeConfig> {
        let mut initial_data = FormState::new();
        initial_data.insert("a".into(), json!(""));
        initial_data.insert("b".into(), json!(""));
        initial_data.insert("c".into(), json!([]));
        Arc::new(FormTypeConfig {
            form_type_id: "test",
            name: "Test",
            initial_data,
            steps: vec![
                StepDescriptor::new("step-a", ComponentId::ContactDetails, "A", "user", "a"),
                StepDescriptor::new("step-b", ComponentId::TargetArea, "B", "map-pin", "b"),
                StepDescriptor::new("step-c", ComponentId::PhotoGallery, "C", "camera", "c"),
            ],
            intro: intro.then_some(ComponentId::Intro),
            review: review.then_some(ComponentId::Review),
            map_to_payload: Arc::new(|state| json!({ "a": state.get("a") })),
            submission_endpoint: "http://127.0.0.1:1/unreachable".into(),
            success_message: "done",
        })
    }

    fn engine(intro: bool, review: bool) -> FormEngine {
        FormEngine::new(three_step_config(intro, review), SubmissionPipeline::new())
    }

    #[test]
    fn invalid_step_blocks_forward_navigation() {
        let mut engine = engine(false, true);
        assert!(!engine.navigation().is_current_step_valid);

        assert_eq!(engine.handle_next(), Advance::Stayed);
        assert_eq!(engine.navigation().current_step, 0);
    }

    #[test]
    fn intro_is_always_advance_eligible() {
        let mut engine = engine(true, true);
        assert_eq!(engine.handle_next(), Advance::Moved);
        assert_eq!(engine.navigation().current_step, 1);
        // The newly mounted step has to re-assert validity.
        assert!(!engine.navigation().is_current_step_valid);
    }

    #[test]
    fn change_replaces_only_the_named_slice() {
        let mut engine = engine(false, true);
        engine.handle_change("a", json!("x"));

        assert_eq!(engine.slice("a"), Some(&json!("x")));
        assert_eq!(engine.slice("b"), Some(&json!("")));
        assert_eq!(engine.slice("c"), Some(&json!([])));
    }

    #[test]
    fn change_for_unknown_key_is_ignored() {
        let mut engine = engine(false, true);
        engine.handle_change("zzz", json!("x"));
        assert!(engine.slice("zzz").is_none());
        assert_eq!(engine.form_state().len(), 3);
    }

    #[test]
    fn walk_through_all_steps_lands_on_review() {
        let mut engine = engine(false, true);

        engine.handle_change("a", json!("x"));
        engine.handle_validation_change(true);
        assert_eq!(engine.handle_next(), Advance::Moved);

        engine.handle_change("b", json!("y"));
        engine.handle_validation_change(true);
        assert_eq!(engine.handle_next(), Advance::Moved);

        engine.handle_change("c", json!(["z"]));
        engine.handle_validation_change(true);
        assert_eq!(engine.handle_next(), Advance::ReachedReview);

        match engine.screen() {
            Screen::Review { form_data, .. } => {
                assert_eq!(form_data.get("a"), Some(&json!("x")));
                assert_eq!(form_data.get("b"), Some(&json!("y")));
                assert_eq!(form_data.get("c"), Some(&json!(["z"])));
            }
            other => panic!("expected review screen, got {:?}", other),
        }

        // Next on the review slot is meaningless.
        assert_eq!(engine.handle_next(), Advance::Stayed);
    }

    #[test]
    fn back_from_entry_exits_the_wizard() {
        let mut engine = engine(false, true);
        assert_eq!(engine.handle_back(), BackAction::ExitWizard);
        assert_eq!(engine.navigation().current_step, 0);
    }

    #[test]
    fn back_trusts_previously_completed_steps() {
        let mut engine = engine(false, true);
        engine.handle_validation_change(true);
        engine.handle_next();
        assert!(!engine.navigation().is_current_step_valid);

        assert_eq!(engine.handle_back(), BackAction::Moved);
        assert_eq!(engine.navigation().current_step, 0);
        assert!(engine.navigation().is_current_step_valid);
    }

    #[test]
    fn reset_restores_initial_shape() {
        let mut engine = engine(false, true);
        engine.handle_change("a", json!("mutated"));
        engine.handle_validation_change(true);
        engine.handle_next();

        engine.handle_reset();

        assert_eq!(engine.form_state(), &engine.config().initial_data);
        assert_eq!(engine.navigation().current_step, 0);
        assert_eq!(
            engine.navigation().submission_status,
            SubmissionStatus::Idle
        );
        assert!(!engine.navigation().is_submitting);
        assert!(!engine.navigation().is_current_step_valid);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut engine = engine(true, true);
        engine.handle_reset();
        let first = engine.navigation().clone();
        engine.handle_reset();
        assert_eq!(engine.navigation(), &first);
        // Intro configurations re-enter with an advance-eligible entry screen.
        assert!(engine.navigation().is_current_step_valid);
    }

    #[test]
    fn jump_targets_a_configured_step() {
        let mut engine = engine(true, true);
        assert!(engine.jump_to_step("step-b"));
        assert_eq!(engine.navigation().current_step, 2);
        assert!(engine.navigation().is_current_step_valid);

        assert!(!engine.jump_to_step("step-z"));
        assert_eq!(engine.navigation().current_step, 2);
    }

    #[test]
    fn screen_resolution_follows_position() {
        let mut engine = engine(true, true);
        assert!(matches!(engine.screen(), Screen::Intro { .. }));

        engine.handle_next();
        match engine.screen() {
            Screen::Step { descriptor, value } => {
                assert_eq!(descriptor.step_id, "step-a");
                assert_eq!(value, &json!(""));
            }
            other => panic!("expected step screen, got {:?}", other),
        }
    }

    #[test]
    fn positions_without_a_component_render_not_found() {
        let mut engine = engine(false, false);
        // Force the slot past the last step; with no review bound there is
        // nothing to render there.
        engine.nav.current_step = 3;
        assert!(matches!(engine.screen(), Screen::NotFound));
    }

    #[test]
    fn unknown_form_type_is_a_config_error() {
        let result = FormEngine::from_registry("postcard-blast", SubmissionPipeline::new());
        assert!(matches!(result, Err(FormError::ConfigNotFound(_))));
    }

    #[test]
    fn unreachable_endpoint_resolves_to_error_status() {
        let mut engine = engine(false, true);
        engine.handle_submit();

        assert_eq!(
            engine.navigation().submission_status,
            SubmissionStatus::Error
        );
        assert!(!engine.navigation().is_submitting);
        assert!(engine.navigation().submission_message.is_some());
    }

    #[test]
    fn submit_does_not_mutate_form_state() {
        let mut engine = engine(false, true);
        engine.handle_change("a", json!("x"));
        let before = engine.form_state().clone();
        engine.handle_submit();
        assert_eq!(engine.form_state(), &before);
    }
}
