//! Report renderers.
//!
//! Both renderers implement [`Handler`](crate::handler::Handler):
//!
//! - [`TextHandler`] - grouped, wrapped, optionally colored text
//! - [`JsonHandler`] - the message stream re-emitted as indented JSON

mod json;
pub mod style;
mod text;
mod wrap;

pub use json::JsonHandler;
pub use text::TextHandler;
pub use wrap::wrap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text report
    #[default]
    Text,
    /// JSON message stream for programmatic use
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use 'text' or 'json'", s)),
        }
    }
}

/// Display toggles for the text report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowOptions {
    /// Print every frame of each example trace instead of a one-line summary.
    pub traces: bool,
    /// Style the report with ANSI escape codes.
    pub color: bool,
}

impl ShowOptions {
    /// Parses comma-separated option lists such as `traces,color`.
    ///
    /// Unknown tokens are ignored.
    pub fn parse<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut show = Self::default();
        for value in values {
            for token in value.as_ref().split(',') {
                match token.trim() {
                    "traces" => show.traces = true,
                    "color" => show.color = true,
                    "" => {}
                    other => debug!(token = other, "ignoring unknown display option"),
                }
            }
        }
        show
    }
}
