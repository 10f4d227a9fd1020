use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use semver::Version;
use tracing::debug;

use crate::model::{Entry, Finding, Frame, Position, CMD_MODULE_PATH, STD_MODULE_PATH};

/// A finding joined with its metadata and compact trace, ready to render.
#[derive(Debug, Clone)]
pub struct FindingSummary {
    pub finding: Finding,
    pub osv: Rc<Entry>,
    /// One-line trace synopsis; empty for imported-only findings.
    pub compact: String,
}

impl FindingSummary {
    pub fn is_called(&self) -> bool {
        !self.compact.is_empty()
    }

    pub fn vulnerable_frame(&self) -> &Frame {
        self.finding.vulnerable_frame()
    }
}

/// Joins findings with their metadata.
///
/// The first entry received for an id wins. Findings whose entry never
/// arrived get a placeholder carrying only the id.
pub fn normalize(entries: Vec<Entry>, findings: Vec<Finding>) -> Vec<FindingSummary> {
    let mut by_id: HashMap<String, Rc<Entry>> = HashMap::new();
    for entry in entries {
        by_id
            .entry(entry.id.clone())
            .or_insert_with(|| Rc::new(entry));
    }

    findings
        .into_iter()
        .map(|finding| {
            let osv = by_id
                .entry(finding.osv.clone())
                .or_insert_with(|| {
                    debug!(id = %finding.osv, "no metadata received, using placeholder");
                    Rc::new(Entry::placeholder(finding.osv.clone()))
                })
                .clone();
            let compact = compact_trace(&finding);
            FindingSummary {
                finding,
                osv,
                compact,
            }
        })
        .collect()
}

/// Found/fixed version text for one module group.
///
/// Taken from the first finding of the group: all findings for a module
/// within one vulnerability are assumed to share versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleVersions {
    pub module: String,
    /// Package path for the standard library, module path otherwise.
    pub path: String,
    pub found: String,
    pub fixed: String,
}

impl ModuleVersions {
    pub fn from_summary(summary: &FindingSummary) -> Self {
        let frame = summary.vulnerable_frame();
        let module = frame.module.clone();
        let path = if frame.is_std() {
            frame.package.clone().unwrap_or_else(|| module.clone())
        } else {
            module.clone()
        };
        let found = version_text(&path, &module, frame.version.as_deref());
        let fixed = version_text(&path, &module, summary.finding.fixed_version.as_deref());
        Self {
            module,
            path,
            found,
            fixed,
        }
    }

    pub fn is_std(&self) -> bool {
        self.module == STD_MODULE_PATH
    }
}

fn version_text(path: &str, module: &str, version: Option<&str>) -> String {
    match version.filter(|v| !v.is_empty()) {
        None => "N/A".to_string(),
        Some(v) if module == STD_MODULE_PATH || module == CMD_MODULE_PATH => {
            format!("{}@{}", path, semver_to_go_tag(v))
        }
        Some(v) => format!("{}@{}", path, v),
    }
}

/// Converts a semantic version of the standard library to its Go tag,
/// e.g. `v1.20.1` to `go1.20.1` and `v1.20.0-rc.1` to `go1.20rc1`.
///
/// Strings that are not `v`-prefixed semantic versions are returned as-is.
pub fn semver_to_go_tag(v: &str) -> String {
    if v.starts_with("v0.0.0") {
        return "master".to_string();
    }
    if v == "v1.0.0" {
        return "go1".to_string();
    }
    let Some(version) = v.strip_prefix('v').and_then(|s| Version::parse(s).ok()) else {
        return v.to_string();
    };

    // Before go1.21 the first release of a minor series had no patch component.
    let drop_patch =
        version.patch == 0 && (version < Version::new(1, 21, 0) || !version.pre.is_empty());
    let mut tag = if drop_patch {
        format!("go{}.{}", version.major, version.minor)
    } else {
        format!("go{}.{}.{}", version.major, version.minor, version.patch)
    };
    if !version.pre.is_empty() {
        tag.push_str(&version.pre.as_str().replacen('.', "", 1));
    }
    tag
}

/// Renders the frame's symbol as `pkg.Recv.Func`.
///
/// `short` replaces the package path with its assumed package name. Closure
/// suffixes (`$1`) are dropped. Frames without a function render empty.
pub fn symbol(frame: &Frame, short: bool) -> String {
    let Some(function) = frame.function.as_deref().filter(|f| !f.is_empty()) else {
        return String::new();
    };
    let mut out = String::new();
    if let Some(pkg) = frame.package.as_deref().filter(|p| !p.is_empty()) {
        if short {
            out.push_str(assumed_package_name(pkg));
        } else {
            out.push_str(pkg);
        }
        out.push('.');
    }
    if let Some(receiver) = frame.receiver.as_deref().filter(|r| !r.is_empty()) {
        out.push_str(receiver.strip_prefix('*').unwrap_or(receiver));
        out.push('.');
    }
    out.push_str(function.split('$').next().unwrap_or(function));
    out
}

/// The name a package is conventionally imported as.
///
/// A trailing `/vN` major-version element is skipped, a `go-` prefix is
/// stripped, and the name ends at the first character that cannot appear in
/// an identifier, so `github.com/go-chi/chi/v5` is `chi` and
/// `gopkg.in/yaml.v3` is `yaml`.
pub fn assumed_package_name(import_path: &str) -> &str {
    let mut elements = import_path.rsplit('/');
    let mut base = elements.next().unwrap_or(import_path);
    let is_major_version = base
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
    if is_major_version {
        if let Some(parent) = elements.next() {
            base = parent;
        }
    }
    let base = base.strip_prefix("go-").unwrap_or(base);
    match base.find(|c: char| !(c.is_alphanumeric() || c == '_')) {
        Some(end) => &base[..end],
        None => base,
    }
}

pub fn pos_to_string(position: Option<&Position>) -> String {
    match position {
        Some(p) if p.line > 0 => format!("{}:{}:{}", p.filename, p.line, p.column),
        _ => String::new(),
    }
}

/// One-line synopsis of a call trace, empty when nothing is called.
///
/// Names the call site where the entry module last hands control to other
/// code, e.g. `main.go:12:3: app.Run calls yaml.Unmarshal, which eventually
/// calls yaml.parse`.
pub fn compact_trace(finding: &Finding) -> String {
    let trace = &finding.trace;
    let Some(vulnerable) = trace.first() else {
        return String::new();
    };
    if vulnerable.function.as_deref().map_or(true, str::is_empty) {
        return String::new();
    }

    let last = trace.len() - 1;
    let top_module = &trace[last].module;
    let mut top = trace
        .iter()
        .position(|frame| &frame.module == top_module)
        .unwrap_or(last);
    if top == 0 {
        // The whole trace lives in one module.
        top = last;
    }

    let mut out = pos_to_string(trace[top].position.as_ref());
    if !out.is_empty() {
        out.push_str(": ");
    }
    if top > 0 {
        out.push_str(&symbol(&trace[top], true));
        out.push_str(" calls ");
    }
    if top > 1 {
        out.push_str(&symbol(&trace[top - 1], true));
        out.push_str(", which eventually calls ");
    }
    out.push_str(&symbol(vulnerable, true));
    out
}

/// Platforms (`goos/goarch`, `goos` or `goarch`) the entry restricts `module` to.
pub fn platforms(module: &str, entry: &Entry) -> Vec<String> {
    let mut found = BTreeSet::new();
    for affected in entry.affected.iter().filter(|a| a.package.name == module) {
        for pkg in &affected.ecosystem_specific.packages {
            for os in &pkg.goos {
                if pkg.goarch.is_empty() {
                    found.insert(os.clone());
                    continue;
                }
                for arch in &pkg.goarch {
                    found.insert(format!("{}/{}", os, arch));
                }
            }
            if pkg.goos.is_empty() {
                found.extend(pkg.goarch.iter().cloned());
            }
        }
    }
    found.into_iter().collect()
}
