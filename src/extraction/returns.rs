//! Expected-return mining from assertions and stubbed producers.

use super::literals::classify_literal;
use super::patterns::{
    CLASSIC_ASSERTION, EQUALITY_ASSERTION, MARKER_ASSERTION, OPTIONAL_OF, SIZED_ASSERTION,
    THEN_RETURN,
};
use crate::core::ConditionValue;
use crate::locator::braces::{balanced_args, split_top_level};
use regex::Regex;

/// Expected-return values in source order, duplicates removed.
pub fn mine_expected_returns(body: &str) -> Vec<ConditionValue> {
    let mut found: Vec<(usize, ConditionValue)> = Vec::new();

    collect_argument_literals(body, &EQUALITY_ASSERTION, &mut found);
    collect_argument_literals(body, &THEN_RETURN, &mut found);
    collect_argument_literals(body, &OPTIONAL_OF, &mut found);

    for captures in MARKER_ASSERTION.captures_iter(body) {
        if let (Some(call), Some(name)) = (captures.get(0), captures.get(1)) {
            found.push((call.start(), assertion_marker(name.as_str())));
        }
    }

    for captures in SIZED_ASSERTION.captures_iter(body) {
        if let (Some(call), Some(name), Some(operand)) =
            (captures.get(0), captures.get(1), captures.get(2))
        {
            found.push((call.start(), comparison_marker(name.as_str(), operand.as_str())));
        }
    }

    for captures in CLASSIC_ASSERTION.captures_iter(body) {
        if let (Some(call), Some(name)) = (captures.get(0), captures.get(1)) {
            if let Some(value) = classic_assertion_value(body, call.end() - 1, name.as_str()) {
                found.push((call.start(), value));
            }
        }
    }

    found.sort_by_key(|(position, _)| *position);

    let mut values: Vec<ConditionValue> = Vec::new();
    for (_, value) in found {
        let label = value.label();
        if !values.iter().any(|v| v.label() == label) {
            values.push(value);
        }
    }
    values
}

/// Classify the argument of every call matched by `pattern`; a producer
/// wrapping `Optional.of(...)` is unwrapped first.
fn collect_argument_literals(body: &str, pattern: &Regex, found: &mut Vec<(usize, ConditionValue)>) {
    for call in pattern.find_iter(body) {
        let Some(argument) = balanced_args(body, call.end() - 1) else {
            continue;
        };
        if let Some(value) = classify_literal(unwrap_optional(argument)) {
            found.push((call.start(), value));
        }
    }
}

fn unwrap_optional(argument: &str) -> &str {
    let trimmed = argument.trim();
    match OPTIONAL_OF.find(trimmed) {
        Some(m) if m.start() == 0 => balanced_args(trimmed, m.end() - 1).unwrap_or(trimmed),
        _ => trimmed,
    }
}

fn assertion_marker(name: &str) -> ConditionValue {
    match name {
        "isNull" => ConditionValue::Null,
        "isEmpty" => ConditionValue::Empty,
        "isNotNull" => ConditionValue::Marker("not null".to_string()),
        "isTrue" => ConditionValue::Marker("true".to_string()),
        "isFalse" => ConditionValue::Marker("false".to_string()),
        "isNotEmpty" => ConditionValue::Marker("not empty".to_string()),
        other => ConditionValue::Marker(other.to_string()),
    }
}

fn comparison_marker(name: &str, operand: &str) -> ConditionValue {
    let marker = match name {
        "hasSize" => format!("size: {operand}"),
        "isGreaterThan" => format!("> {operand}"),
        "isGreaterThanOrEqualTo" => format!(">= {operand}"),
        "isLessThan" => format!("< {operand}"),
        "isLessThanOrEqualTo" => format!("<= {operand}"),
        other => format!("{other} {operand}"),
    };
    ConditionValue::Marker(marker)
}

/// `assertEquals(expected, actual)` contributes its first argument; the
/// single-argument forms contribute a marker.
fn classic_assertion_value(body: &str, open: usize, name: &str) -> Option<ConditionValue> {
    match name {
        "assertEquals" => {
            let args = balanced_args(body, open)?;
            let expected = split_top_level(args, b',').into_iter().next()?;
            classify_literal(expected)
        }
        "assertNull" => Some(ConditionValue::Null),
        "assertNotNull" => Some(ConditionValue::Marker("not null".to_string())),
        "assertTrue" => Some(ConditionValue::Marker("true".to_string())),
        "assertFalse" => Some(ConditionValue::Marker("false".to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn labels(body: &str) -> Vec<String> {
        mine_expected_returns(body).iter().map(ConditionValue::label).collect()
    }

    #[test]
    fn test_fluent_assertions_in_source_order() {
        let body = indoc! {r#"
            assertThat(result).isNotNull();
            assertThat(result.getName()).isEqualTo("Acme");
            assertThat(result.getItems()).hasSize(2);
            assertThat(result.isPaid()).isTrue();
        "#};
        assert_eq!(labels(body), vec!["not null", "\"Acme\"", "size: 2", "true"]);
    }

    #[test]
    fn test_stubbed_producers() {
        let body = indoc! {r#"
            when(repo.findAll()).thenReturn(List.of("a", "b"));
            when(repo.findById(1L)).thenReturn(Optional.of("x"));
            when(repo.count()).thenReturn(5);
            when(repo.findOther()).thenReturn(Collections.emptyList());
        "#};
        assert_eq!(labels(body), vec!["[\"a\", \"b\"]", "\"x\"", "5", "[]"]);
    }

    #[test]
    fn test_duplicates_removed() {
        let body = "assertThat(a).isEqualTo(1); assertThat(b).isEqualTo(1); assertThat(c).isNull();";
        assert_eq!(labels(body), vec!["1", "null"]);
    }

    #[test]
    fn test_non_literal_arguments_skipped() {
        let body = "assertThat(result).isEqualTo(expected); when(x.y()).thenReturn(user);";
        assert!(labels(body).is_empty());
    }

    #[test]
    fn test_classic_assertions() {
        let body = "assertEquals(3, list.size()); assertNotNull(result); assertFalse(flag);";
        assert_eq!(labels(body), vec!["3", "not null", "false"]);
    }

    #[test]
    fn test_comparison_markers() {
        let body = "assertThat(n).isGreaterThan(0); assertThat(m).isLessThanOrEqualTo(10);";
        assert_eq!(labels(body), vec!["> 0", "<= 10"]);
    }

    #[test]
    fn test_empty_string_expectation() {
        assert_eq!(labels("assertThat(name).isEqualTo(\"\");"), vec!["[]"]);
    }
}
