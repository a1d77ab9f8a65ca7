//! Widget visibility resolver.
//!
//! # Responsibility
//! - Pick the visible widgets and their render order from configuration.
//!
//! # Invariants
//! - Output order equals configuration insertion order.
//! - Configuration is authoritative: an unconfigured widget never renders.
//! - Unknown or repeated keys fail the whole call, even when hidden.

use crate::model::view::{WidgetView, WidgetViews};
use crate::model::widget::{WidgetConfig, WidgetConfigError, WidgetKey};
use log::warn;
use serde::Serialize;

/// A widget selected for display together with its view model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderedWidget<'a> {
    pub key: WidgetKey,
    pub view: WidgetView<'a>,
}

/// Resolves the ordered list of visible widgets.
///
/// # Errors
/// - `WidgetConfigError::UnknownWidget` when a key has no view model.
/// - `WidgetConfigError::DuplicateWidget` when a key is listed twice.
pub fn resolve_widgets<'a>(
    config: &WidgetConfig,
    views: &'a WidgetViews,
) -> Result<Vec<RenderedWidget<'a>>, WidgetConfigError> {
    let entries = config.resolve().inspect_err(|err| {
        warn!(
            "event=widgets_resolve module=visibility status=error entries={} error={}",
            config.len(),
            err
        );
    })?;

    Ok(entries
        .into_iter()
        .filter(|(_, visible)| *visible)
        .map(|(key, _)| RenderedWidget {
            key,
            view: views.view(key),
        })
        .collect())
}

/// Keys that would render, in order, without borrowing any view model.
pub fn visible_keys(config: &WidgetConfig) -> Result<Vec<WidgetKey>, WidgetConfigError> {
    Ok(config
        .resolve()?
        .into_iter()
        .filter_map(|(key, visible)| visible.then_some(key))
        .collect())
}
