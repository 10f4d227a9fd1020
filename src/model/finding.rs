use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Module path used for the Go standard library.
pub const STD_MODULE_PATH: &str = "stdlib";

/// Module path used for the Go toolchain commands.
pub const CMD_MODULE_PATH: &str = "toolchain";

/// One concrete instance of a vulnerability affecting the scanned target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Id of the [`Entry`](crate::model::Entry) this finding refers to.
    pub osv: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_version: Option<String>,
    /// Call stack, innermost (vulnerable) frame first.
    pub trace: Vec<Frame>,
}

impl Finding {
    /// The vulnerable frame. Only valid on a validated finding.
    pub fn vulnerable_frame(&self) -> &Frame {
        &self.trace[0]
    }

    /// Rejects findings that cannot be attributed to a module and symbol.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.osv.is_empty() {
            return Err(invalid("all findings must have an associated OSV"));
        }
        let Some(first) = self.trace.first() else {
            return Err(invalid("all callstacks must have at least one frame"));
        };
        if first.module.is_empty() {
            return Err(invalid("all findings must have an associated module"));
        }
        for frame in &self.trace {
            if is_set(&frame.version) && frame.module.is_empty() {
                return Err(invalid("if Frame.Version is set, Frame.Module must also be"));
            }
            if is_set(&frame.package) && frame.module.is_empty() {
                return Err(invalid("if Frame.Package is set, Frame.Module must also be"));
            }
            if is_set(&frame.function) && !is_set(&frame.package) {
                return Err(invalid("if Frame.Function is set, Frame.Package must also be"));
            }
        }
        Ok(())
    }
}

fn is_set(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

fn invalid(reason: &str) -> ReportError {
    ReportError::InvalidFinding(reason.to_string())
}

/// A single stack frame of a call trace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Frame {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    pub fn with_receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn is_std(&self) -> bool {
        self.module == STD_MODULE_PATH
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub line: i64,
    #[serde(default)]
    pub column: i64,
}

impl Position {
    pub fn new(filename: impl Into<String>, line: i64, column: i64) -> Self {
        Self {
            filename: filename.into(),
            offset: 0,
            line,
            column,
        }
    }
}
