//! Input mining from setter calls on request-like carriers.

use super::literals::classify_literal;
use super::patterns::SETTER_CALL;
use crate::config::ExtractionConfig;
use crate::core::InputMap;
use crate::locator::braces::balanced_args;

/// Collect `<carrier>.set<Property>(<literal>)` values in source order.
pub fn mine_inputs(body: &str, config: &ExtractionConfig) -> InputMap {
    let mut inputs = InputMap::new();

    for captures in SETTER_CALL.captures_iter(body) {
        let (Some(call), Some(object), Some(property)) =
            (captures.get(0), captures.get(1), captures.get(2))
        else {
            continue;
        };
        if !config.is_request_carrier(object.as_str()) {
            continue;
        }
        let Some(argument) = balanced_args(body, call.end() - 1) else {
            continue;
        };
        match classify_literal(argument) {
            Some(value) => {
                inputs.record(
                    property.as_str(),
                    value,
                    config.max_values_per_property,
                    config.max_properties,
                );
            }
            None => tracing::trace!(
                "Ignoring non-literal value for {}.set{}",
                object.as_str(),
                property.as_str()
            ),
        }
    }

    inputs
}
