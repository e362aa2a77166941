//! JUnit / Surefire XML result documents.
//!
//! A document holds one `<testsuite>`, or a `<testsuites>` wrapper around
//! several. Each `<testcase>` becomes one [`TestResult`]; its status comes
//! from the first child marker found in the order failure, error, skipped.

use super::message::truncate_message;
use crate::config::default_max_message_lines;
use crate::core::{TestResult, TestStatus};
use crate::errors::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;

const TESTSUITE_TAG: &[u8] = b"testsuite";
const TESTCASE_TAG: &[u8] = b"testcase";
const FAILURE_TAG: &[u8] = b"failure";
const ERROR_TAG: &[u8] = b"error";
const SKIPPED_TAG: &[u8] = b"skipped";

/// Aggregate counts declared on a `<testsuite>` element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SuiteCounts {
    pub tests: usize,
    pub failures: usize,
    pub errors: usize,
    pub skipped: usize,
}

/// One parsed `<testsuite>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteReport {
    pub name: String,
    /// `classname` of the suite's first test case.
    pub class_name: Option<String>,
    pub counts: SuiteCounts,
    pub results: Vec<TestResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Failure,
    Error,
    Skipped,
}

impl Marker {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            FAILURE_TAG => Some(Marker::Failure),
            ERROR_TAG => Some(Marker::Error),
            SKIPPED_TAG => Some(Marker::Skipped),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct MarkerDetail {
    text: String,
    message_attribute: Option<String>,
    error_type: Option<String>,
}

impl MarkerDetail {
    fn from_element(element: &BytesStart<'_>) -> Result<Self> {
        Ok(Self {
            text: String::new(),
            message_attribute: attribute(element, b"message")?,
            error_type: attribute(element, b"type")?,
        })
    }

    fn message(self) -> (String, Option<String>) {
        let text = if self.text.trim().is_empty() {
            self.message_attribute.unwrap_or_default()
        } else {
            self.text
        };
        (text, self.error_type)
    }
}

/// A `<testcase>` whose closing tag has not been seen yet.
#[derive(Debug, Default)]
struct PendingCase {
    name: String,
    class_name: Option<String>,
    duration_seconds: f64,
    failure: Option<MarkerDetail>,
    error: Option<MarkerDetail>,
    skipped: bool,
}

impl PendingCase {
    fn from_element(element: &BytesStart<'_>) -> Result<Self> {
        Ok(Self {
            name: attribute(element, b"name")?.unwrap_or_default(),
            class_name: attribute(element, b"classname")?,
            duration_seconds: attribute(element, b"time")?
                .map(|time| parse_duration(&time))
                .unwrap_or(0.0),
            ..Self::default()
        })
    }

    fn mark(&mut self, marker: Marker, element: &BytesStart<'_>) -> Result<()> {
        match marker {
            Marker::Failure if self.failure.is_none() => {
                self.failure = Some(MarkerDetail::from_element(element)?)
            }
            Marker::Error if self.error.is_none() => {
                self.error = Some(MarkerDetail::from_element(element)?)
            }
            Marker::Skipped => self.skipped = true,
            _ => {}
        }
        Ok(())
    }

    fn append_text(&mut self, marker: Marker, text: &str) {
        let detail = match marker {
            Marker::Failure => self.failure.as_mut(),
            Marker::Error => self.error.as_mut(),
            Marker::Skipped => None,
        };
        if let Some(detail) = detail {
            detail.text.push_str(text);
        }
    }

    fn finish(self, max_message_lines: usize) -> TestResult {
        let (status, detail) = if let Some(failure) = self.failure {
            (TestStatus::Fail, Some(failure))
        } else if let Some(error) = self.error {
            (TestStatus::Error, Some(error))
        } else if self.skipped {
            (TestStatus::Skipped, None)
        } else {
            (TestStatus::Pass, None)
        };

        let (error_message, error_type) = match detail {
            Some(detail) => {
                let (text, error_type) = detail.message();
                (truncate_message(&text, max_message_lines), error_type)
            }
            None => (None, None),
        };

        TestResult {
            name: self.name,
            class_name: self.class_name,
            status,
            duration_seconds: self.duration_seconds,
            error_message,
            error_type,
        }
    }
}

/// Parser for result documents.
#[derive(Debug, Clone, Copy)]
pub struct ResultDocumentParser {
    max_message_lines: usize,
}

impl Default for ResultDocumentParser {
    fn default() -> Self {
        Self::new(default_max_message_lines())
    }
}

impl ResultDocumentParser {
    pub fn new(max_message_lines: usize) -> Self {
        Self {
            max_message_lines: max_message_lines.max(1),
        }
    }

    /// Parse every `<testsuite>` in `xml`, in document order.
    pub fn parse(&self, xml: &str) -> Result<Vec<SuiteReport>> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut open_suites: Vec<SuiteReport> = Vec::new();
        let mut finished: Vec<SuiteReport> = Vec::new();
        let mut case: Option<PendingCase> = None;
        let mut capturing: Option<Marker> = None;

        loop {
            match reader.read_event()? {
                Event::Start(element) => match element.name().as_ref() {
                    TESTSUITE_TAG => open_suites.push(suite_from_element(&element)?),
                    TESTCASE_TAG => case = Some(PendingCase::from_element(&element)?),
                    tag => {
                        if let (Some(marker), Some(pending)) = (Marker::from_tag(tag), case.as_mut())
                        {
                            pending.mark(marker, &element)?;
                            capturing = Some(marker);
                        }
                    }
                },
                Event::Empty(element) => match element.name().as_ref() {
                    TESTSUITE_TAG => finished.push(suite_from_element(&element)?),
                    TESTCASE_TAG => {
                        let result =
                            PendingCase::from_element(&element)?.finish(self.max_message_lines);
                        push_result(&mut open_suites, result)?;
                    }
                    tag => {
                        if let (Some(marker), Some(pending)) = (Marker::from_tag(tag), case.as_mut())
                        {
                            pending.mark(marker, &element)?;
                        }
                    }
                },
                Event::Text(text) => {
                    if let (Some(marker), Some(pending)) = (capturing, case.as_mut()) {
                        pending.append_text(marker, &text.unescape()?);
                    }
                }
                Event::CData(data) => {
                    if let (Some(marker), Some(pending)) = (capturing, case.as_mut()) {
                        pending.append_text(marker, &String::from_utf8_lossy(&data));
                    }
                }
                Event::End(element) => match element.name().as_ref() {
                    TESTSUITE_TAG => {
                        if let Some(suite) = open_suites.pop() {
                            finished.push(suite);
                        }
                    }
                    TESTCASE_TAG => {
                        capturing = None;
                        if let Some(pending) = case.take() {
                            push_result(&mut open_suites, pending.finish(self.max_message_lines))?;
                        }
                    }
                    tag if Marker::from_tag(tag).is_some() => capturing = None,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        if case.is_some() || !open_suites.is_empty() {
            return Err(Error::result_parse("document ends inside an open <testsuite>"));
        }
        if finished.is_empty() {
            return Err(Error::result_parse("no <testsuite> element found"));
        }
        Ok(finished)
    }
}

/// Parse `xml` with the default message cap.
pub fn parse_result_document(xml: &str) -> Result<Vec<SuiteReport>> {
    ResultDocumentParser::default().parse(xml)
}

fn suite_from_element(element: &BytesStart<'_>) -> Result<SuiteReport> {
    let count = |key: &[u8]| -> Result<usize> {
        Ok(attribute(element, key)?
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0))
    };
    Ok(SuiteReport {
        name: attribute(element, b"name")?.unwrap_or_default(),
        class_name: None,
        counts: SuiteCounts {
            tests: count(b"tests")?,
            failures: count(b"failures")?,
            errors: count(b"errors")?,
            skipped: count(b"skipped")?,
        },
        results: Vec::new(),
    })
}

fn push_result(open_suites: &mut [SuiteReport], result: TestResult) -> Result<()> {
    let suite = open_suites
        .last_mut()
        .ok_or_else(|| Error::result_parse("<testcase> outside of a <testsuite>"))?;
    if suite.class_name.is_none() {
        suite.class_name = result.class_name.clone();
    }
    suite.results.push(result);
    Ok(())
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Seconds from a `time` attribute; thousands separators are ignored.
fn parse_duration(value: &str) -> f64 {
    value.replace(',', "").trim().parse().unwrap_or(0.0)
}
