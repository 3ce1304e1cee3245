//! Synchronous lookup of wizard configurations by product id.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::FormTypeConfig;
use crate::forms;

static REGISTRY: Lazy<HashMap<&'static str, Arc<FormTypeConfig>>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for config in [
        forms::listing_ad::config(),
        forms::giveaway::config(),
        forms::open_house::config(),
        forms::video_edit::config(),
        forms::success_story::config(),
    ] {
        let config = Arc::new(config);
        map.insert(config.form_type_id, config);
    }
    map
});

/// Resolves the configuration for a wizard product. Unknown ids resolve to
/// `None`; callers render a load-error screen rather than crash.
pub fn get_form_config(form_type_id: &str) -> Option<Arc<FormTypeConfig>> {
    REGISTRY.get(form_type_id).cloned()
}
