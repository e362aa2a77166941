//! Common utilities shared across the testdoc codebase.
//!
//! Key components:
//! - **Naming**: test-name decomposition and method-under-test inference
//! - **Text utilities**: capitalization and quote stripping

pub mod naming;
pub mod text;

pub use naming::{decompose, method_under_test};
pub use text::{capitalize_first, unquote};
