//! Result Correlator: result document parsing and outcome merging.

pub mod correlate;
pub mod junit;
pub mod message;

pub use correlate::{correlate, Correlation};
pub use junit::{parse_result_document, ResultDocumentParser, SuiteCounts, SuiteReport};
pub use message::truncate_message;
