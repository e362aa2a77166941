//! Literal value normalization.
//!
//! The same rules apply to setter arguments and expected-return values.
//! Expressions that are not recognisable literals (variables, arbitrary
//! calls) yield `None` and are not recorded.

use super::patterns::{
    DATE_CONSTRUCTOR, DECIMAL_CONSTRUCTOR, DECIMAL_LITERAL, EMPTY_COLLECTION, ENUM_CONSTANT,
    INTEGER_LITERAL, LIST_CONSTRUCTOR,
};
use crate::common::unquote;
use crate::core::ConditionValue;
use crate::locator::braces::{balanced_args, matching_close, split_top_level};

/// Normalize one literal expression.
pub fn classify_literal(expression: &str) -> Option<ConditionValue> {
    let expr = expression.trim();
    if expr.is_empty() {
        return None;
    }

    if expr == "null" {
        return Some(ConditionValue::Null);
    }
    if expr == "true" || expr == "false" {
        return Some(ConditionValue::Marker(expr.to_string()));
    }
    if let Some(text) = unquote(expr) {
        return Some(if text.is_empty() {
            ConditionValue::Empty
        } else {
            ConditionValue::Text(text.to_string())
        });
    }
    if let Some(caps) = INTEGER_LITERAL.captures(expr) {
        return caps.get(1).map(|m| ConditionValue::Integer(m.as_str().to_string()));
    }
    if EMPTY_COLLECTION.is_match(expr) {
        return Some(ConditionValue::Empty);
    }
    if let Some(value) = classify_list(expr) {
        return Some(value);
    }
    if let Some(m) = DATE_CONSTRUCTOR.find(expr) {
        return classify_date(expr, m.end() - 1);
    }
    if let Some(m) = DECIMAL_CONSTRUCTOR.find(expr) {
        return classify_decimal(expr, m.end() - 1);
    }
    if let Some(constant) = big_decimal_constant(expr) {
        return Some(ConditionValue::Amount(constant.to_string()));
    }
    if let Some(caps) = ENUM_CONSTANT.captures(expr) {
        return caps
            .get(1)
            .map(|m| ConditionValue::Status(m.as_str().to_string()));
    }

    None
}

/// List constructor calls and bracket literals.
fn classify_list(expr: &str) -> Option<ConditionValue> {
    if let Some(m) = LIST_CONSTRUCTOR.find(expr) {
        let open = m.end() - 1;
        let close = matching_close(expr, open)?;
        return Some(ConditionValue::list(&expr[open + 1..close]));
    }
    if expr.starts_with('[') {
        let close = matching_close(expr, 0)?;
        if close == expr.len() - 1 {
            return Some(ConditionValue::list(&expr[1..close]));
        }
    }
    None
}

/// `LocalDate.of(y, m, d)` with three integer arguments.
fn classify_date(expr: &str, open: usize) -> Option<ConditionValue> {
    let args = split_top_level(balanced_args(expr, open)?, b',');
    let [year, month, day] = args.as_slice() else {
        return None;
    };
    let integers = [year, month, day]
        .iter()
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
    if !integers {
        return None;
    }
    Some(ConditionValue::Date {
        year: year.to_string(),
        month: month.to_string(),
        day: day.to_string(),
    })
}

/// `new BigDecimal(x)` / `BigDecimal.valueOf(x)` with a numeric argument.
fn classify_decimal(expr: &str, open: usize) -> Option<ConditionValue> {
    let arg = balanced_args(expr, open)?.trim();
    let value = unquote(arg).unwrap_or(arg).trim();
    let value = value.trim_end_matches(|c: char| matches!(c, 'L' | 'l' | 'd' | 'D'));
    DECIMAL_LITERAL
        .is_match(value)
        .then(|| ConditionValue::Amount(value.to_string()))
}

fn big_decimal_constant(expr: &str) -> Option<&'static str> {
    match expr {
        "BigDecimal.ZERO" => Some("0"),
        "BigDecimal.ONE" => Some("1"),
        "BigDecimal.TEN" => Some("10"),
        _ => None,
    }
}
