use serde::{Deserialize, Serialize};

/// Root configuration structure for testdoc
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TestdocConfig {
    /// Condition extraction rules
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Method and module grouping rules
    #[serde(default)]
    pub grouping: GroupingConfig,

    /// Decision table ordering
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Result document handling
    #[serde(default)]
    pub results: ResultsConfig,
}

impl TestdocConfig {
    /// Reject settings that would make extraction or correlation meaningless.
    pub fn validate(&self) -> Result<(), String> {
        let extraction = &self.extraction;
        if extraction.max_values_per_property == 0 {
            return Err("extraction.max_values_per_property must be at least 1".to_string());
        }
        if extraction.max_properties == 0 {
            return Err("extraction.max_properties must be at least 1".to_string());
        }
        if self.results.max_message_lines == 0 {
            return Err("results.max_message_lines must be at least 1".to_string());
        }
        if self.results.report_pattern.trim().is_empty() {
            return Err("results.report_pattern must not be empty".to_string());
        }
        glob::Pattern::new(&self.results.report_pattern)
            .map_err(|e| format!("results.report_pattern is not a valid glob: {e}"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionConfig {
    /// Fixed preconditions attached to every case
    #[serde(default = "default_preconditions")]
    pub preconditions: Vec<String>,

    /// Generic parameter-carrier names (compared case-insensitively);
    /// any object whose name contains `Request` also qualifies
    #[serde(default = "default_request_carriers")]
    pub request_carriers: Vec<String>,

    #[serde(default = "default_max_values_per_property")]
    pub max_values_per_property: usize,

    #[serde(default = "default_max_properties")]
    pub max_properties: usize,

    #[serde(default = "default_boundary_keywords")]
    pub boundary_keywords: Vec<String>,

    /// Substring signals for abnormal cases; a standalone `null` literal is
    /// always an abnormal signal
    #[serde(default = "default_abnormal_keywords")]
    pub abnormal_keywords: Vec<String>,

    #[serde(default = "default_exception_keywords")]
    pub exception_keywords: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            preconditions: default_preconditions(),
            request_carriers: default_request_carriers(),
            max_values_per_property: default_max_values_per_property(),
            max_properties: default_max_properties(),
            boundary_keywords: default_boundary_keywords(),
            abnormal_keywords: default_abnormal_keywords(),
            exception_keywords: default_exception_keywords(),
        }
    }
}

impl ExtractionConfig {
    pub fn is_request_carrier(&self, object: &str) -> bool {
        object.contains("Request")
            || self
                .request_carriers
                .iter()
                .any(|carrier| carrier.eq_ignore_ascii_case(object))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupingConfig {
    /// Class-name suffixes that identify a production module
    #[serde(default = "default_module_suffixes")]
    pub module_suffixes: Vec<String>,

    /// Suffixes stripped from a test class name when no module suffix matches
    #[serde(default = "default_test_suffixes")]
    pub test_suffixes: Vec<String>,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            module_suffixes: default_module_suffixes(),
            test_suffixes: default_test_suffixes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthesisConfig {
    /// Properties listed first, in this order; the rest follow alphabetically
    #[serde(default = "default_property_priority")]
    pub property_priority: Vec<String>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            property_priority: default_property_priority(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultsConfig {
    /// File-name glob selecting result documents in the reports directory
    #[serde(default = "default_report_pattern")]
    pub report_pattern: String,

    #[serde(default = "default_max_message_lines")]
    pub max_message_lines: usize,

    /// Extension of test source files, without the dot
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            report_pattern: default_report_pattern(),
            max_message_lines: default_max_message_lines(),
            source_extension: default_source_extension(),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub fn default_preconditions() -> Vec<String> {
    strings(&["Login into the system", "Can connect to database"])
}

pub fn default_request_carriers() -> Vec<String> {
    strings(&["request", "req", "params", "param"])
}

pub fn default_max_values_per_property() -> usize {
    3
}

pub fn default_max_properties() -> usize {
    5
}

pub fn default_boundary_keywords() -> Vec<String> {
    strings(&["empty", "zero", "boundary"])
}

pub fn default_abnormal_keywords() -> Vec<String> {
    strings(&["invalid", "notfound", "not_found", "not found"])
}

pub fn default_exception_keywords() -> Vec<String> {
    strings(&["exception", "throw"])
}

pub fn default_module_suffixes() -> Vec<String> {
    strings(&["Service", "Repository", "Controller"])
}

pub fn default_test_suffixes() -> Vec<String> {
    strings(&["Test"])
}

pub fn default_property_priority() -> Vec<String> {
    strings(&[
        "username",
        "password",
        "email",
        "passwordhash",
        "rolename",
        "id",
    ])
}

pub fn default_report_pattern() -> String {
    "TEST-*.xml".to_string()
}

pub fn default_max_message_lines() -> usize {
    3
}

pub fn default_source_extension() -> String {
    "java".to_string()
}
