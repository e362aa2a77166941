//! Service-call argument mining and exception message assertions.
//!
//! Literal arguments passed directly to a `<x>Service.<method>(...)` call
//! are inputs even when no request carrier is built. Integers are taken as
//! identifiers; text-like arguments are keyed by position.

use super::literals::classify_literal;
use super::patterns::{MESSAGE_ASSERTION, SERVICE_CALL};
use crate::common::unquote;
use crate::config::ExtractionConfig;
use crate::core::{ConditionValue, InputMap};
use crate::locator::braces::{balanced_args, split_top_level};

/// Leading arguments inspected per service call.
pub const MAX_SERVICE_ARGUMENTS: usize = 3;

/// Record literal service-call arguments into `inputs`, in source order.
pub fn mine_service_arguments(body: &str, config: &ExtractionConfig, inputs: &mut InputMap) {
    for captures in SERVICE_CALL.captures_iter(body) {
        let (Some(call), Some(method)) = (captures.get(0), captures.get(2)) else {
            continue;
        };
        let Some(arguments) = balanced_args(body, call.end() - 1) else {
            continue;
        };

        for (position, argument) in split_top_level(arguments, b',')
            .into_iter()
            .take(MAX_SERVICE_ARGUMENTS)
            .enumerate()
        {
            let Some(value) = classify_literal(argument) else {
                continue;
            };
            let Some(property) = argument_property(&value, position) else {
                tracing::trace!("Ignoring argument {argument} of {}", method.as_str());
                continue;
            };
            inputs.record(
                &property,
                value,
                config.max_values_per_property,
                config.max_properties,
            );
        }
    }
}

fn argument_property(value: &ConditionValue, position: usize) -> Option<String> {
    match value {
        ConditionValue::Integer(_) => Some("id".to_string()),
        ConditionValue::Null | ConditionValue::Empty | ConditionValue::Text(_) => {
            Some(format!("param{}", position + 1))
        }
        ConditionValue::Date { .. } => Some("date".to_string()),
        ConditionValue::Amount(_) => Some("amount".to_string()),
        _ => None,
    }
}

/// `message: <text>` for every quoted `hasMessage`/`hasMessageContaining`.
pub fn mine_expected_messages(body: &str) -> Vec<ConditionValue> {
    MESSAGE_ASSERTION
        .find_iter(body)
        .filter_map(|call| balanced_args(body, call.end() - 1))
        .filter_map(|argument| unquote(argument.trim()))
        .map(|text| ConditionValue::Marker(format!("message: {text}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn mined(body: &str) -> InputMap {
        let mut inputs = InputMap::new();
        mine_service_arguments(body, &ExtractionConfig::default(), &mut inputs);
        inputs
    }

    fn labels(inputs: &InputMap, property: &str) -> Vec<String> {
        inputs
            .get(property)
            .unwrap_or_default()
            .iter()
            .map(ConditionValue::label)
            .collect()
    }

    #[test]
    fn test_integer_arguments_are_ids() {
        let inputs = mined("Invoice found = invoiceService.findById(42L);");
        assert_eq!(labels(&inputs, "id"), vec!["42"]);
        assert_eq!(inputs.len(), 1);
    }

    #[test]
    fn test_text_arguments_keyed_by_position() {
        let inputs = mined(indoc! {r#"
            userService.rename(7, null);
            userService.rename(8, "");
            userService.register("alice", format(name, 2), "x");
        "#});
        assert_eq!(labels(&inputs, "id"), vec!["7", "8"]);
        assert_eq!(labels(&inputs, "param2"), vec!["null", "[]"]);
        assert_eq!(labels(&inputs, "param1"), vec!["\"alice\""]);
        assert_eq!(labels(&inputs, "param3"), vec!["\"x\""]);
    }

    #[test]
    fn test_only_leading_arguments_are_read() {
        let inputs = mined("reportService.export(1, 2, 3, \"fourth\");");
        assert_eq!(labels(&inputs, "id"), vec!["1", "2", "3"]);
        assert!(inputs.get("param4").is_none());
    }

    #[test]
    fn test_lowercase_receiver_is_not_a_service() {
        assert!(mined("service.create(1); repository.save(\"x\");").is_empty());
    }

    #[test]
    fn test_message_assertions() {
        let body = indoc! {r#"
            assertThatThrownBy(() -> userService.findById(99L))
                .isInstanceOf(NotFoundException.class)
                .hasMessageContaining("User not found");
            assertThat(error).hasMessage("exact");
            assertThat(error).hasMessage(expected);
        "#};
        assert_eq!(
            mine_expected_messages(body),
            vec![
                ConditionValue::Marker("message: User not found".into()),
                ConditionValue::Marker("message: exact".into()),
            ]
        );
    }
}
