//! The seam between the scan engine and the report renderers.

use std::io::Read;

use tracing::{debug, warn};

use crate::error::{ReportError, Result};
use crate::model::{Entry, Finding, Message, Progress, ScanConfig};

/// Receives the messages of one scan, in arrival order.
///
/// A handler serves exactly one scan: [`Handler::flush`] consumes it.
pub trait Handler {
    /// Tool, runtime and database identity. Sent once, first.
    fn config(&mut self, config: &ScanConfig) -> Result<()>;

    fn progress(&mut self, progress: &Progress) -> Result<()>;

    /// Vulnerability metadata, before or after the findings referencing it.
    fn osv(&mut self, entry: Entry) -> Result<()>;

    /// Returns [`ReportError::InvalidFinding`] and keeps no part of the
    /// finding when it cannot be attributed to a module and symbol.
    fn finding(&mut self, finding: Finding) -> Result<()>;

    /// Completes the report.
    ///
    /// Returns [`ReportError::VulnerabilitiesFound`] when the report shows a
    /// vulnerability reachable from the scanned code.
    fn flush(self) -> Result<()>
    where
        Self: Sized;
}

/// Feeds a JSON message stream into `handler`, then flushes it.
///
/// Invalid findings are logged and skipped; any other error aborts the
/// conversion without flushing.
pub fn convert<R: Read, H: Handler>(reader: R, mut handler: H) -> Result<()> {
    let stream = serde_json::Deserializer::from_reader(reader).into_iter::<Message>();
    let mut received = 0usize;
    for message in stream {
        received += 1;
        match message? {
            Message::Config(config) => handler.config(&config)?,
            Message::Progress(progress) => handler.progress(&progress)?,
            Message::Osv(entry) => handler.osv(entry)?,
            Message::Finding(finding) => match handler.finding(finding) {
                Err(ReportError::InvalidFinding(reason)) => {
                    warn!(%reason, "skipping finding");
                }
                other => other?,
            },
        }
    }
    debug!(received, "message stream complete");
    handler.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Handler for &mut Recorder {
        fn config(&mut self, config: &ScanConfig) -> Result<()> {
            self.events.push(format!("config {}", config.scanner_name));
            Ok(())
        }

        fn progress(&mut self, progress: &Progress) -> Result<()> {
            self.events.push(format!("progress {}", progress.message));
            Ok(())
        }

        fn osv(&mut self, entry: Entry) -> Result<()> {
            self.events.push(format!("osv {}", entry.id));
            Ok(())
        }

        fn finding(&mut self, finding: Finding) -> Result<()> {
            finding.validate()?;
            self.events.push(format!("finding {}", finding.osv));
            Ok(())
        }

        fn flush(self) -> Result<()> {
            self.events.push("flush".to_string());
            Ok(())
        }
    }

    #[test]
    fn test_convert_dispatches_in_order() {
        let stream = r#"
            {"config": {"scanner_name": "govulncheck"}}
            {"progress": {"message": "Scanning..."}}
            {"finding": {"osv": "GO-1", "trace": [{"module": "stdlib", "package": "os"}]}}
            {"finding": {"osv": "GO-2", "trace": []}}
            {"osv": {"id": "GO-1"}}
        "#;
        let mut recorder = Recorder::default();
        convert(stream.as_bytes(), &mut recorder).unwrap();
        assert_eq!(
            recorder.events,
            vec![
                "config govulncheck",
                "progress Scanning...",
                "finding GO-1",
                "osv GO-1",
                "flush",
            ]
        );
    }

    #[test]
    fn test_convert_malformed_stream() {
        let mut recorder = Recorder::default();
        let err = convert(r#"{"config": {}} {"bogus": 1}"#.as_bytes(), &mut recorder).unwrap_err();
        assert!(matches!(err, ReportError::Json(_)));
        assert!(!recorder.events.contains(&"flush".to_string()));
    }
}
