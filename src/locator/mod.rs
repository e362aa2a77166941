//! Test Unit Locator.
//!
//! Finds annotated, zero-argument test declarations in raw source text and
//! extracts each unit's name and body. Two naming conventions are tried:
//! the structured `<method>_when<condition>_should<expectation>` form and a
//! bare identifier. Both patterns match at the same offset for structured
//! names; the structured match wins.

pub mod braces;

use crate::common::naming;
use crate::core::{NamingConvention, TestUnit};
use crate::errors::Error;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Declaration prefix: the test marker (optionally with JUnit 4 style
/// arguments) followed by modifiers and a `void` return type.
const DECLARATION_PREFIX: &str =
    r"@Test(?:\([^)]*\))?\s+(?:(?:public|protected|private|static|final)\s+)*void\s+";

static STRUCTURED_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"{DECLARATION_PREFIX}(\w+_when\w+_should\w+)\s*\(\s*\)"
    ))
    .unwrap()
});

static BARE_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"{DECLARATION_PREFIX}(\w+)\s*\(\s*\)")).unwrap());

static CLASS_DECLARATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bclass\s+(\w+)").unwrap());

/// Declaring class used when no `class` keyword precedes a unit.
pub const UNKNOWN_CLASS: &str = "Unknown";

/// Units found in one source text, plus the declarations that were skipped.
#[derive(Debug, Default)]
pub struct Located {
    pub units: Vec<TestUnit>,
    pub skipped: Vec<Error>,
}

/// A declaration header match before its body has been extracted.
#[derive(Debug, Clone)]
struct Declaration {
    name: String,
    header_end: usize,
    structured: bool,
}

/// Locate every test unit in `source`, ordered by source offset.
///
/// A unit whose body cannot be closed is reported in [`Located::skipped`]
/// and left out; the remaining units are unaffected.
pub fn locate_units(source: &str) -> Located {
    let mut located = Located::default();
    let classes = class_spans(source);

    for (offset, declaration) in find_declarations(source) {
        match extract_body(source, declaration.header_end) {
            Some(body) => {
                let naming = if declaration.structured {
                    naming::decompose(&declaration.name)
                        .map(NamingConvention::Structured)
                        .unwrap_or(NamingConvention::Bare)
                } else {
                    NamingConvention::Bare
                };
                located.units.push(TestUnit {
                    name: declaration.name,
                    body: body.to_string(),
                    declaring_class: declaring_class(&classes, offset),
                    offset,
                    naming,
                });
            }
            None => {
                tracing::warn!(
                    "Skipping test '{}' at offset {offset}: body is not closed",
                    declaration.name
                );
                located.skipped.push(Error::source_parse(format!(
                    "test '{}' at offset {offset} has no closed body",
                    declaration.name
                )));
            }
        }
    }

    located
}

/// Both declaration patterns, deduplicated by starting offset.
fn find_declarations(source: &str) -> BTreeMap<usize, Declaration> {
    let mut declarations = BTreeMap::new();

    for (regex, structured) in [(&*STRUCTURED_DECLARATION, true), (&*BARE_DECLARATION, false)] {
        for captures in regex.captures_iter(source) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            declarations
                .entry(whole.start())
                .or_insert_with(|| Declaration {
                    name: name.as_str().to_string(),
                    header_end: whole.end(),
                    structured,
                });
        }
    }

    declarations
}

/// Text strictly between the first `{` after the header and its match.
fn extract_body(source: &str, header_end: usize) -> Option<&str> {
    let (open, close) = braces::find_block(source, header_end)?;
    Some(&source[open + 1..close])
}

/// A class declaration and the byte range of its body braces.
#[derive(Debug, Clone)]
struct ClassSpan {
    name: String,
    open: usize,
    /// End of the source when the body never closes.
    close: usize,
}

fn class_spans(source: &str) -> Vec<ClassSpan> {
    CLASS_DECLARATION
        .captures_iter(source)
        .filter_map(|c| {
            let header = c.get(0)?;
            let name = c.get(1)?.as_str().to_string();
            let (open, close) = match braces::find_block(source, header.end()) {
                Some(block) => block,
                None => (source[header.end()..].find('{')? + header.end(), source.len()),
            };
            Some(ClassSpan { name, open, close })
        })
        .collect()
}

/// Innermost class whose body encloses `offset`.
fn declaring_class(classes: &[ClassSpan], offset: usize) -> String {
    classes
        .iter()
        .filter(|class| class.open < offset && offset < class.close)
        .max_by_key(|class| class.open)
        .map(|class| class.name.clone())
        .unwrap_or_else(|| UNKNOWN_CLASS.to_string())
}

/// Simple name of the first class declared in `source`.
pub fn primary_class(source: &str) -> Option<String> {
    CLASS_DECLARATION
        .captures(source)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
