//! Test-name conventions.
//!
//! Two conventions are recognised:
//! - structured: `<method>_when<condition>_should<expectation>`
//! - bare: any identifier; the method is its prefix before the first `_`

use crate::core::NameParts;

const WHEN_TOKEN: &str = "_when";
const SHOULD_TOKEN: &str = "_should";

/// Split a structured test name into its three parts.
///
/// All three parts must be non-empty. The first `_when` and the first
/// `_should` after it are the separators.
pub fn decompose(name: &str) -> Option<NameParts> {
    let when = name.find(WHEN_TOKEN).filter(|&i| i > 0)?;
    let rest = &name[when + WHEN_TOKEN.len()..];
    let should = rest.find(SHOULD_TOKEN).filter(|&i| i > 0)?;
    let expectation = &rest[should + SHOULD_TOKEN.len()..];
    if expectation.is_empty() {
        return None;
    }
    Some(NameParts {
        method: name[..when].to_string(),
        condition: rest[..should].to_string(),
        expectation: expectation.to_string(),
    })
}

/// Infer the production method a test exercises from its name.
///
/// Prefers the text before `_when`; otherwise the prefix before the first
/// `_`, or the whole name when there is no usable separator.
pub fn method_under_test(name: &str) -> String {
    if let Some(when) = name.find(WHEN_TOKEN).filter(|&i| i > 0) {
        return name[..when].to_string();
    }
    match name.split_once('_') {
        Some((prefix, _)) if !prefix.is_empty() => prefix.to_string(),
        _ => name.to_string(),
    }
}
