use std::io::Write;

use crate::error::Result;
use crate::handler::Handler;
use crate::model::{Entry, Finding, Message, Progress, ScanConfig};

/// Writes every message as an indented JSON object, as it arrives.
pub struct JsonHandler<W: Write> {
    w: W,
}

impl<W: Write> JsonHandler<W> {
    pub fn new(w: W) -> Self {
        Self { w }
    }

    fn write(&mut self, message: &Message) -> Result<()> {
        let json = serde_json::to_string_pretty(message)?;
        self.w.write_all(json.as_bytes())?;
        self.w.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> Handler for JsonHandler<W> {
    fn config(&mut self, config: &ScanConfig) -> Result<()> {
        self.write(&Message::Config(config.clone()))
    }

    fn progress(&mut self, progress: &Progress) -> Result<()> {
        self.write(&Message::Progress(progress.clone()))
    }

    fn osv(&mut self, entry: Entry) -> Result<()> {
        self.write(&Message::Osv(entry))
    }

    fn finding(&mut self, finding: Finding) -> Result<()> {
        finding.validate()?;
        self.write(&Message::Finding(finding))
    }

    fn flush(mut self) -> Result<()> {
        self.w.flush()?;
        Ok(())
    }
}
