//! Decision Table Synthesizer.
//!
//! Rows are regenerated from a [`MethodRecord`] on demand, in a fixed
//! section order that never changes and never skips a section:
//!
//! 1. Preconditions, one row each
//! 2. Input properties: a header per property, then one row per value
//! 3. Confirm header, `Return` row, one row per expected value
//! 4. A single Exception row
//! 5. Log message header, one row per marker (or one empty row)
//!
//! Every collection that feeds a row is sorted explicitly, so the same
//! record always yields the same rows and `applies_to` sets.

pub mod table;

use crate::common::capitalize_first;
use crate::config::SynthesisConfig;
use crate::core::{CaseRecord, DecisionRow, MethodRecord, RowSection};
use std::collections::{BTreeMap, BTreeSet};

pub use table::{case_id, CaseColumn, ClassificationCounts, DecisionTable};

const CONFIRM_LABEL: &str = "Confirm";
const RETURN_LABEL: &str = "Return";
const EXCEPTION_LABEL: &str = "Exception";
const LOG_MESSAGE_LABEL: &str = "Log message";

/// Stands in for the expected return of a case that asserted nothing.
const NO_RETURN: &str = "[]";

const NO_CASES: [usize; 0] = [];

/// Build the decision table for one method.
pub fn synthesize(record: &MethodRecord, config: &SynthesisConfig) -> DecisionTable {
    let cases = &record.cases;
    let mut rows = Vec::new();

    precondition_rows(cases, &mut rows);
    input_rows(cases, &config.property_priority, &mut rows);
    confirm_rows(cases, &mut rows);
    rows.push(exception_row(cases));
    log_message_rows(cases, &mut rows);

    tracing::trace!(
        "Synthesized {} rows for {} ({} cases)",
        rows.len(),
        record.name,
        cases.len()
    );
    DecisionTable::new(record, rows)
}

fn cases_where(cases: &[CaseRecord], predicate: impl Fn(&CaseRecord) -> bool) -> BTreeSet<usize> {
    cases
        .iter()
        .enumerate()
        .filter(|(_, case)| predicate(case))
        .map(|(index, _)| index)
        .collect()
}

/// Preconditions in first-seen order; each marks the cases that carry it.
fn precondition_rows(cases: &[CaseRecord], rows: &mut Vec<DecisionRow>) {
    let mut seen: Vec<&str> = Vec::new();
    for precondition in cases.iter().flat_map(|c| &c.conditions.preconditions) {
        if !seen.contains(&precondition.as_str()) {
            seen.push(precondition);
        }
    }

    for precondition in seen {
        let applies = cases_where(cases, |case| {
            case.conditions
                .preconditions
                .iter()
                .any(|p| p == precondition)
        });
        rows.push(DecisionRow::value(RowSection::Precondition, precondition, applies));
    }
}

fn input_rows(cases: &[CaseRecord], priority: &[String], rows: &mut Vec<DecisionRow>) {
    let mut properties: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
    for case in cases {
        for (property, values) in case.conditions.inputs.iter() {
            properties
                .entry(property.as_str())
                .or_default()
                .extend(values.iter().map(|v| v.label()));
        }
    }

    let mut names: Vec<&str> = properties.keys().copied().collect();
    names.sort_by(|a, b| {
        property_rank(a, priority)
            .cmp(&property_rank(b, priority))
            .then_with(|| a.cmp(b))
    });

    for name in names {
        let Some(values) = properties.get(name) else {
            continue;
        };
        if values.is_empty() {
            continue;
        }
        rows.push(DecisionRow::header(RowSection::Input, capitalize_first(name)));
        for value in values {
            let applies =
                cases_where(cases, |case| case.conditions.inputs.contains_label(name, value));
            rows.push(DecisionRow::value(RowSection::Input, value.as_str(), applies));
        }
    }
}

/// Position in the priority list; unlisted properties sort after all listed ones.
fn property_rank(property: &str, priority: &[String]) -> usize {
    priority
        .iter()
        .position(|p| p.eq_ignore_ascii_case(property))
        .unwrap_or(priority.len())
}

fn expected_labels(case: &CaseRecord) -> Vec<String> {
    let labels: Vec<String> = case
        .conditions
        .expected_returns
        .iter()
        .map(|v| v.label())
        .collect();
    if labels.is_empty() {
        vec![NO_RETURN.to_string()]
    } else {
        labels
    }
}

fn confirm_rows(cases: &[CaseRecord], rows: &mut Vec<DecisionRow>) {
    rows.push(DecisionRow::header(RowSection::Confirm, CONFIRM_LABEL));
    rows.push(DecisionRow::value(RowSection::Confirm, RETURN_LABEL, NO_CASES));

    let per_case: Vec<Vec<String>> = cases.iter().map(expected_labels).collect();
    let distinct: BTreeSet<&String> = per_case.iter().flatten().collect();

    for value in distinct {
        let applies: BTreeSet<usize> = per_case
            .iter()
            .enumerate()
            .filter(|(_, labels)| labels.contains(value))
            .map(|(index, _)| index)
            .collect();
        rows.push(DecisionRow::value(RowSection::Confirm, value.as_str(), applies));
    }
}

/// Labelled with the first exception type found among triggered cases.
fn exception_row(cases: &[CaseRecord]) -> DecisionRow {
    let triggered = cases_where(cases, |case| case.conditions.exception_triggered());
    let exception_type = triggered
        .iter()
        .filter_map(|&index| cases[index].conditions.exception_type())
        .find(|t| !t.is_empty())
        .unwrap_or_default();

    DecisionRow {
        section: RowSection::Exception,
        condition_label: Some(EXCEPTION_LABEL.to_string()),
        value_label: exception_type.to_string(),
        applies_to: triggered,
    }
}

fn log_message_rows(cases: &[CaseRecord], rows: &mut Vec<DecisionRow>) {
    rows.push(DecisionRow::header(RowSection::LogMessage, LOG_MESSAGE_LABEL));

    let markers: BTreeSet<&str> = cases
        .iter()
        .filter_map(|case| case.conditions.log_marker.as_deref())
        .filter(|marker| !marker.is_empty())
        .collect();

    if markers.is_empty() {
        rows.push(DecisionRow::value(RowSection::LogMessage, "", NO_CASES));
        return;
    }
    for marker in markers {
        let applies = cases_where(cases, |case| {
            case.conditions.log_marker.as_deref() == Some(marker)
        });
        rows.push(DecisionRow::value(RowSection::LogMessage, marker, applies));
    }
}
