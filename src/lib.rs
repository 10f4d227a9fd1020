pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod output;
pub mod summary;

pub use config::Config;
pub use error::ReportError;
pub use handler::{convert, Handler};
pub use model::{Entry, Finding, Frame, Message, Progress, ScanConfig};
pub use output::{JsonHandler, OutputFormat, ShowOptions, TextHandler};
