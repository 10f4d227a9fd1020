//! Human-readable text report.
//!
//! [`TextHandler`] accumulates metadata and findings during the scan and
//! renders everything on [`Handler::flush`]. Config and progress messages
//! are written immediately.

use std::fmt::Display;
use std::io::{self, Write};
use std::mem;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::style::{Palette, Style};
use super::wrap::wrap;
use super::ShowOptions;
use crate::error::{ReportError, Result};
use crate::handler::Handler;
use crate::model::{Entry, Finding, Progress, ScanConfig};
use crate::summary::{
    classify, counters, group_by_module, group_by_vulnerability, is_called, normalize, platforms,
    pos_to_string, symbol, FindingSummary, ModuleVersions, SummaryCounters,
};

const WRAP_WIDTH: usize = 80;

const FEEDBACK_URL: &str = "https://go.dev/s/govulncheck-feedback";

const DETAILS_URL: &str = "https://pkg.go.dev/golang.org/x/vuln/cmd/govulncheck";

pub struct TextHandler<W: Write> {
    w: W,
    osvs: Vec<Entry>,
    findings: Vec<Finding>,
    /// First write failure; all later writes are skipped.
    err: Option<io::Error>,
    palette: Palette,
    show_traces: bool,
}

impl<W: Write> TextHandler<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            osvs: Vec::new(),
            findings: Vec::new(),
            err: None,
            palette: Palette::default(),
            show_traces: false,
        }
    }

    pub fn with_show(mut self, show: ShowOptions) -> Self {
        self.show_traces = show.traces;
        self.palette = Palette {
            enabled: show.color,
        };
        self
    }

    /// Writes `value` unless an earlier write failed. Returns the number of
    /// characters written.
    fn print(&mut self, value: impl Display) -> usize {
        if self.err.is_some() {
            return 0;
        }
        let text = value.to_string();
        match self.w.write_all(text.as_bytes()) {
            Ok(()) => text.chars().count(),
            Err(e) => {
                debug!(error = %e, "report write failed, skipping further output");
                self.err = Some(e);
                0
            }
        }
    }

    fn styled(&mut self, style: Style, value: impl Display) {
        let open = self.palette.open(style);
        let close = self.palette.close(style);
        self.print(open);
        self.print(value);
        self.print(close);
    }

    /// Mirrors the sticky write error without consuming it.
    fn status(&self) -> Result<()> {
        match &self.err {
            Some(e) => Err(io::Error::new(e.kind(), e.to_string()).into()),
            None => Ok(()),
        }
    }

    fn by_vulnerability(&mut self, findings: &[FindingSummary]) {
        let sections = classify(group_by_vulnerability(findings));
        for (index, group) in sections.called.iter().enumerate() {
            self.vulnerability(index, group);
        }

        let uncalled = sections.informational.len();
        if uncalled == 0 {
            return;
        }
        self.styled(Style::Section, "=== Informational ===\n");
        self.print(format!("\nFound {}", uncalled));
        self.print(choose(uncalled == 1, " vulnerability", " vulnerabilities"));
        self.print(" in packages that you import, but there are no call\nstacks leading to the use of ");
        self.print(choose(uncalled == 1, "this vulnerability", "these vulnerabilities"));
        self.print(format!(
            ". You may not need to\ntake any action. See {}\nfor details.\n\n",
            DETAILS_URL
        ));
        for (index, group) in sections.informational.iter().enumerate() {
            self.vulnerability(index, group);
        }
    }

    fn vulnerability(&mut self, index: usize, findings: &[&FindingSummary]) {
        let osv = &findings[0].osv;
        self.styled(Style::Key, "Vulnerability");
        self.print(format!(" #{}: ", index + 1));
        let id_style = if is_called(findings) {
            Style::OsvCalled
        } else {
            Style::OsvImported
        };
        self.styled(id_style, &osv.id);
        self.print("\n");
        self.styled(Style::Details, wrap("    ", osv.description(), WRAP_WIDTH));
        self.print("\n");
        self.styled(Style::Key, "  More info:");
        self.print(format!(" {}\n", osv.database_specific.url));

        for (i, module) in group_by_module(findings).iter().enumerate() {
            let versions = ModuleVersions::from_summary(module[0]);
            if i > 0 {
                self.print("\n");
            }
            self.print("  ");
            if versions.is_std() {
                self.print("Standard library");
            } else {
                self.styled(Style::Key, "Module: ");
                self.print(&versions.module);
            }
            self.print("\n    ");
            self.styled(Style::Key, "Found in: ");
            self.print(&versions.found);
            self.print("\n    ");
            self.styled(Style::Key, "Fixed in: ");
            self.print(&versions.fixed);
            self.print("\n");

            let platforms = platforms(&versions.module, &module[0].osv);
            if !platforms.is_empty() {
                self.styled(Style::Key, "    Platforms: ");
                self.print(platforms.join(", "));
                self.print("\n");
            }
            self.traces(module);
        }
        self.print("\n");
    }

    fn traces(&mut self, findings: &[&FindingSummary]) {
        let mut first = true;
        // Numbering counts imported-only entries even though they are skipped.
        for (i, entry) in findings.iter().enumerate() {
            if !entry.is_called() {
                continue;
            }
            if first {
                self.styled(Style::Key, "    Example traces found:\n");
                first = false;
            }
            self.print(format!("      #{}: ", i + 1));
            if !self.show_traces {
                self.print(format!("{}\n", entry.compact));
                continue;
            }
            self.print(format!(
                "for function {}\n",
                symbol(entry.vulnerable_frame(), false)
            ));
            for frame in entry.finding.trace.iter().rev() {
                self.print("        ");
                let pos = pos_to_string(frame.position.as_ref());
                if !pos.is_empty() {
                    self.print(format!("{}: ", pos));
                }
                self.print(format!("{}\n", symbol(frame, false)));
            }
        }
    }

    fn summary(&mut self, counters: SummaryCounters) {
        if counters.vulnerabilities_called == 0 {
            self.print("No vulnerabilities found.\n");
            return;
        }
        self.print("Your code is affected by ");
        self.styled(Style::Value, counters.vulnerabilities_called);
        self.print(choose(
            counters.vulnerabilities_called == 1,
            " vulnerability",
            " vulnerabilities",
        ));
        self.print(" from");
        if counters.modules_called > 0 {
            self.print(" ");
            self.styled(Style::Value, counters.modules_called);
            self.print(choose(counters.modules_called == 1, " module", " modules"));
        }
        if counters.stdlib_called {
            if counters.modules_called != 0 {
                self.print(" and");
            }
            self.print(" the Go standard library");
        }
        self.print(".\n");
    }
}

impl<W: Write> Handler for TextHandler<W> {
    fn config(&mut self, config: &ScanConfig) -> Result<()> {
        self.print("Using ");
        if !config.go_version.is_empty() {
            self.styled(Style::Runtime, &config.go_version);
            self.print(" and ");
        }
        if !config.scanner_name.is_empty() {
            self.styled(Style::Scanner, &config.scanner_name);
            if !config.scanner_version.is_empty() {
                self.print(format!("@{}", config.scanner_version));
            }
            self.print(" with ");
        }
        self.print(format!("vulnerability data from {}", config.db));
        if let Some(modified) = config.db_last_modified {
            self.print(format!(" (last modified {})", go_time_string(&modified)));
        }
        self.print(".\n\n");
        self.status()
    }

    fn progress(&mut self, progress: &Progress) -> Result<()> {
        self.print(format!("{}\n\n", progress.message));
        self.status()
    }

    fn osv(&mut self, entry: Entry) -> Result<()> {
        self.osvs.push(entry);
        Ok(())
    }

    fn finding(&mut self, finding: Finding) -> Result<()> {
        finding.validate()?;
        self.findings.push(finding);
        Ok(())
    }

    fn flush(mut self) -> Result<()> {
        let summaries = normalize(mem::take(&mut self.osvs), mem::take(&mut self.findings));
        debug!(findings = summaries.len(), "rendering text report");
        self.by_vulnerability(&summaries);
        self.summary(counters(&summaries));
        self.print(format!("\nShare feedback at {}.\n", FEEDBACK_URL));
        if self.err.is_none() {
            if let Err(e) = self.w.flush() {
                self.err = Some(e);
            }
        }
        if let Some(err) = self.err {
            return Err(err.into());
        }
        if summaries.iter().any(FindingSummary::is_called) {
            return Err(ReportError::VulnerabilitiesFound);
        }
        Ok(())
    }
}

/// Formats a timestamp as Go prints a UTC `time.Time`, e.g.
/// `2023-04-03 15:57:51.25 +0000 UTC`.
fn go_time_string(t: &DateTime<Utc>) -> String {
    let mut out = t.format("%Y-%m-%d %H:%M:%S").to_string();
    let nanos = t.timestamp_subsec_nanos();
    if nanos > 0 {
        let frac = format!(".{:09}", nanos);
        out.push_str(frac.trim_end_matches('0'));
    }
    out.push_str(" +0000 UTC");
    out
}

fn choose<'a>(cond: bool, yes: &'a str, no: &'a str) -> &'a str {
    if cond {
        yes
    } else {
        no
    }
}
