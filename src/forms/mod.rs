//! Per-product wizard configurations.
//!
//! Each module is data: the initial form-state shape, the ordered step list,
//! the screen bindings, and the field-for-field payload mapper for one
//! product. Engine behavior never varies per product.

pub mod giveaway;
pub mod listing_ad;
pub mod open_house;
pub mod success_story;
pub mod video_edit;

/// Webhook base shared by every wizard product.
pub(crate) const WEBHOOK_BASE: &str = "https://hooks.agentflow.marketing/forms";
