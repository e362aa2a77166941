//! Data model shared by every pipeline stage.
//!
//! Values flow one way: the locator produces [`TestUnit`]s, the extractor
//! attaches [`TestConditions`], the correlator merges a [`TestResult`] into a
//! [`CaseRecord`], the grouper folds cases into [`MethodRecord`]s and
//! [`ModuleRecord`]s, and the synthesizer derives [`DecisionRow`]s on demand.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Decomposed `<method>_when<condition>_should<expectation>` test name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameParts {
    pub method: String,
    pub condition: String,
    pub expectation: String,
}

/// Which naming convention matched the test declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "convention", rename_all = "snake_case")]
pub enum NamingConvention {
    Structured(NameParts),
    Bare,
}

/// One discovered test declaration and its raw body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestUnit {
    pub name: String,
    #[serde(skip)]
    pub body: String,
    pub declaring_class: String,
    /// Byte offset of the declaration marker in the source text.
    pub offset: usize,
    pub naming: NamingConvention,
}

impl TestUnit {
    /// Method-under-test inferred from the unit name.
    pub fn method_under_test(&self) -> String {
        match &self.naming {
            NamingConvention::Structured(parts) => parts.method.clone(),
            NamingConvention::Bare => crate::common::naming::method_under_test(&self.name),
        }
    }
}

/// Normal / Abnormal / Boundary case type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
pub enum Classification {
    #[default]
    Normal,
    Abnormal,
    Boundary,
}

impl Classification {
    /// Single-letter code used in table headers.
    pub fn code(self) -> char {
        match self {
            Classification::Normal => 'N',
            Classification::Abnormal => 'A',
            Classification::Boundary => 'B',
        }
    }
}

/// A normalized literal observed in a test body.
///
/// Every variant renders to exactly one string form; two values are the same
/// condition if and only if their rendered forms are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConditionValue {
    Null,
    /// Empty string or empty collection.
    Empty,
    /// Inner comma-separated content of a non-empty list literal.
    List(String),
    /// Unquoted content of a string literal.
    Text(String),
    Integer(String),
    Date {
        year: String,
        month: String,
        day: String,
    },
    Amount(String),
    /// Constant name of an enum-like `Type.CONSTANT` expression.
    Status(String),
    /// Fixed marker contributed by a value-less assertion.
    Marker(String),
}

impl ConditionValue {
    /// Build a list value, collapsing empty content to [`ConditionValue::Empty`].
    pub fn list(content: &str) -> Self {
        let content = content.trim();
        if content.is_empty() {
            ConditionValue::Empty
        } else {
            ConditionValue::List(content.to_string())
        }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionValue::Null => f.write_str("null"),
            ConditionValue::Empty => f.write_str("[]"),
            ConditionValue::List(content) => write!(f, "[{content}]"),
            ConditionValue::Text(text) => write!(f, "\"{text}\""),
            ConditionValue::Integer(digits) => f.write_str(digits),
            ConditionValue::Date { year, month, day } => write!(f, "date: {year}-{month}-{day}"),
            ConditionValue::Amount(amount) => write!(f, "amount: {amount}"),
            ConditionValue::Status(constant) => write!(f, "status: {constant}"),
            ConditionValue::Marker(marker) => f.write_str(marker),
        }
    }
}

impl Serialize for ConditionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Input values keyed by lower-cased property name, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InputMap {
    properties: IndexMap<String, Vec<ConditionValue>>,
}

impl InputMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for `property`, honouring both caps.
    ///
    /// Returns `true` when the value was stored. Duplicates (by rendered
    /// form), values beyond `max_values`, and new properties beyond
    /// `max_properties` are dropped.
    pub fn record(
        &mut self,
        property: &str,
        value: ConditionValue,
        max_values: usize,
        max_properties: usize,
    ) -> bool {
        let key = property.to_lowercase();
        if !self.properties.contains_key(&key) && self.properties.len() >= max_properties {
            return false;
        }
        let values = self.properties.entry(key).or_default();
        if values.len() >= max_values || values.iter().any(|v| v.label() == value.label()) {
            return false;
        }
        values.push(value);
        true
    }

    pub fn get(&self, property: &str) -> Option<&[ConditionValue]> {
        self.properties.get(property).map(Vec::as_slice)
    }

    /// True if `property` recorded a value rendering exactly as `label`.
    pub fn contains_label(&self, property: &str, label: &str) -> bool {
        self.get(property)
            .map(|values| values.iter().any(|v| v.label() == label))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<ConditionValue>)> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionInfo {
    /// Thrown type name without a `.class` suffix, when one was found.
    pub exception_type: Option<String>,
    pub triggered: bool,
}

/// Structured extraction result for one [`TestUnit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestConditions {
    pub preconditions: Vec<String>,
    pub inputs: InputMap,
    pub expected_returns: Vec<ConditionValue>,
    pub exception: Option<ExceptionInfo>,
    pub log_marker: Option<String>,
    pub classification: Classification,
}

impl TestConditions {
    /// "No conditions extracted": only the fixed preconditions survive.
    pub fn fallback(preconditions: &[String]) -> Self {
        Self {
            preconditions: preconditions.to_vec(),
            inputs: InputMap::new(),
            expected_returns: Vec::new(),
            exception: None,
            log_marker: None,
            classification: Classification::Normal,
        }
    }

    pub fn exception_triggered(&self) -> bool {
        self.exception.as_ref().is_some_and(|e| e.triggered)
    }

    pub fn exception_type(&self) -> Option<&str> {
        self.exception
            .as_ref()
            .and_then(|e| e.exception_type.as_deref())
    }

    /// Append an expected-return value unless an equal one is present.
    pub fn push_expected(&mut self, value: ConditionValue) {
        let label = value.label();
        if !self.expected_returns.iter().any(|v| v.label() == label) {
            self.expected_returns.push(value);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum TestStatus {
    #[default]
    Pass,
    Fail,
    Error,
    Skipped,
}

impl TestStatus {
    /// Fail and Error both count against a method.
    pub fn is_failing(self) -> bool {
        matches!(self, TestStatus::Fail | TestStatus::Error)
    }
}

/// One per-case entry of a result document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub name: String,
    pub class_name: Option<String>,
    pub status: TestStatus,
    pub duration_seconds: f64,
    pub error_message: Option<String>,
    pub error_type: Option<String>,
}

/// A test unit with its conditions and correlated outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseRecord {
    pub unit: TestUnit,
    pub conditions: TestConditions,
    pub status: TestStatus,
    pub duration_seconds: f64,
    pub error_message: Option<String>,
    pub error_type: Option<String>,
    /// False when no result entry matched and the status was defaulted.
    pub reported: bool,
}

/// Pass / Fail / Error / Skipped tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub skipped: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: TestStatus) {
        self.total += 1;
        match status {
            TestStatus::Pass => self.passed += 1,
            TestStatus::Fail => self.failed += 1,
            TestStatus::Error => self.errors += 1,
            TestStatus::Skipped => self.skipped += 1,
        }
    }

    pub fn merge(&mut self, other: &StatusCounts) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
        self.errors += other.errors;
        self.skipped += other.skipped;
    }

    /// Failed plus errored cases.
    pub fn failing(&self) -> usize {
        self.failed + self.errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OverallStatus {
    Pass,
    Fail,
    Partial,
}

/// All cases attributed to one method-under-test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodRecord {
    pub name: String,
    pub module: String,
    pub test_count: usize,
    pub cases: Vec<CaseRecord>,
}

impl MethodRecord {
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            test_count: 0,
            cases: Vec::new(),
        }
    }

    pub fn push(&mut self, case: CaseRecord) {
        self.test_count += 1;
        self.cases.push(case);
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for case in &self.cases {
            counts.record(case.status);
        }
        counts
    }

    /// Fail if any case failed or errored, Pass if all passed, else Partial.
    pub fn status(&self) -> OverallStatus {
        let counts = self.counts();
        if counts.failing() > 0 {
            OverallStatus::Fail
        } else if counts.passed == counts.total {
            OverallStatus::Pass
        } else {
            OverallStatus::Partial
        }
    }
}

/// Module-level aggregate over the methods attributed to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleRecord {
    pub name: String,
    pub methods: Vec<String>,
    pub counts: StatusCounts,
}

impl ModuleRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            counts: StatusCounts::default(),
        }
    }

    /// Pass if every case passed, Fail if cases failed and none passed,
    /// Partial for any mix.
    pub fn status(&self) -> OverallStatus {
        let counts = &self.counts;
        if counts.passed == counts.total {
            OverallStatus::Pass
        } else if counts.failing() > 0 && counts.passed == 0 {
            OverallStatus::Fail
        } else {
            OverallStatus::Partial
        }
    }
}

/// Section a decision row belongs to, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowSection {
    Precondition,
    Input,
    Confirm,
    Exception,
    LogMessage,
}

/// One row of a decision table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionRow {
    pub section: RowSection,
    pub condition_label: Option<String>,
    pub value_label: String,
    pub applies_to: BTreeSet<usize>,
}

impl DecisionRow {
    /// Label-only header row that marks no case.
    pub fn header(section: RowSection, label: impl Into<String>) -> Self {
        Self {
            section,
            condition_label: Some(label.into()),
            value_label: String::new(),
            applies_to: BTreeSet::new(),
        }
    }

    pub fn value(
        section: RowSection,
        value: impl Into<String>,
        applies_to: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            section,
            condition_label: None,
            value_label: value.into(),
            applies_to: applies_to.into_iter().collect(),
        }
    }

    pub fn is_header(&self) -> bool {
        self.condition_label.is_some() && self.value_label.is_empty()
    }
}
