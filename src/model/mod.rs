//! Core data types exchanged with the scan engine.
//!
//! - [`ScanConfig`] - Tool, runtime and database identity
//! - [`Progress`] - A free-text progress line
//! - [`Entry`] - Vulnerability metadata in OSV format
//! - [`Finding`] - One vulnerability instance with its call trace
//! - [`Message`] - The tagged union streamed by the producer
//!
//! # Example
//!
//! ```
//! use vulntext::model::{Finding, Frame, STD_MODULE_PATH};
//!
//! let finding = Finding {
//!     osv: "GO-2023-1571".to_string(),
//!     fixed_version: Some("v1.20.1".to_string()),
//!     trace: vec![Frame::new(STD_MODULE_PATH).with_package("net/http")],
//! };
//!
//! assert!(finding.validate().is_ok());
//! ```

mod finding;
mod message;
mod osv;

pub use finding::*;
pub use message::*;
pub use osv::*;
