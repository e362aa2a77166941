//! Pre-compiled patterns for condition mining.
//!
//! Patterns that capture an argument list stop at the opening parenthesis;
//! the argument text itself is taken with the depth counter in
//! [`crate::locator::braces`], so nested calls survive intact.

use once_cell::sync::Lazy;
use regex::Regex;

/// `<object>.set<Property>(`
pub static SETTER_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)\.set(\w+)\s*\(").unwrap());

/// `<x>Service.<method>(`; the receiver name must end in `Service`.
pub static SERVICE_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\w*Service)\.(\w+)\s*\(").unwrap());

/// `.hasMessage(` / `.hasMessageContaining(`
pub static MESSAGE_ASSERTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.hasMessage(?:Containing)?\s*\(").unwrap());

/// A standalone `null` literal; `isNull`/`isNotNull` do not match.
pub static NULL_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bnull\b").unwrap());

/// Fluent assertions carrying a value: `.isEqualTo(`
pub static EQUALITY_ASSERTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.isEqualTo\s*\(").unwrap());

/// Value-less fluent assertions.
pub static MARKER_ASSERTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.(isNotNull|isNull|isTrue|isFalse|isEmpty|isNotEmpty)\s*\(\s*\)").unwrap()
});

/// Size and comparison assertions with an integer operand.
pub static SIZED_ASSERTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\.(hasSize|isGreaterThanOrEqualTo|isLessThanOrEqualTo|isGreaterThan|isLessThan)\s*\(\s*(-?\d+)\s*\)",
    )
    .unwrap()
});

/// Classic assertion functions: `assertEquals(`, `assertNull(`, ...
pub static CLASSIC_ASSERTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(assertEquals|assertNotNull|assertNull|assertTrue|assertFalse)\s*\(").unwrap()
});

/// Stubbed producers: `.thenReturn(`
pub static THEN_RETURN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.thenReturn\s*\(").unwrap());

/// `Optional.of(` / `Optional.ofNullable(`
pub static OPTIONAL_OF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bOptional\.of(?:Nullable)?\s*\(").unwrap());

/// Thrown-type tokens; the earliest occurrence wins.
pub static THROWN_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\.isInstanceOf\s*\(\s*(\w+)(?:\.class)?\s*\)|\.(?:then|do)Throw\s*\(\s*new\s+(\w+)\s*\(|\bassertThrows\s*\(\s*(\w+)\.class",
    )
    .unwrap()
});

/// `Status <digits>` in any case.
pub static STATUS_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bstatus\s+\d+").unwrap());

pub static INTEGER_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(-?\d+)[lL]?$").unwrap());

pub static DECIMAL_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").unwrap());

/// `Type.CONSTANT`
pub static ENUM_CONSTANT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]\w*\.([A-Z][A-Z0-9_]*)$").unwrap());

/// Producers of list values; the match ends at the opening parenthesis.
pub static LIST_CONSTRUCTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:List\.of|Set\.of|Arrays\.asList|Collections\.singletonList|Stream\.of)\s*\(")
        .unwrap()
});

/// Empty collection producers.
pub static EMPTY_COLLECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:Collections\.empty(?:List|Set|Map)\s*\(\s*\)|new\s+(?:ArrayList|LinkedList|HashSet|HashMap)\s*(?:<[^>]*>)?\s*\(\s*\)|List\.of\s*\(\s*\))$",
    )
    .unwrap()
});

pub static DATE_CONSTRUCTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:java\.time\.)?LocalDate\.of\s*\(").unwrap());

pub static DECIMAL_CONSTRUCTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:new\s+BigDecimal|BigDecimal\.valueOf)\s*\(").unwrap());
