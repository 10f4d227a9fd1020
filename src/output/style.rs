//! Semantic styles and the ANSI codes they map to.
//!
//! Content is generated without knowledge of colors; a [`Style`] only
//! brackets it. With styling disabled both brackets are empty, so removing
//! the codes from a colored report yields the plain report byte for byte.

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Go runtime version in the preamble.
    Runtime,
    /// Scanner name in the preamble.
    Scanner,
    /// Id of a vulnerability reachable from the scanned code.
    OsvCalled,
    /// Id of a vulnerability that is only imported.
    OsvImported,
    Details,
    Section,
    Key,
    Value,
}

impl Style {
    /// Escape sequence opening a span of this style.
    pub fn open(self) -> &'static str {
        match self {
            Style::Runtime | Style::Scanner => "\x1b[1m",
            Style::OsvCalled => "\x1b[1m\x1b[31m",
            Style::OsvImported => "\x1b[1m\x1b[32m",
            Style::Details => "\x1b[2m",
            Style::Section => "\x1b[34m",
            Style::Key => "\x1b[2m\x1b[33m",
            Style::Value => "\x1b[1m\x1b[36m",
        }
    }

    /// Escape sequence closing any styled span.
    pub fn close(self) -> &'static str {
        RESET
    }
}

/// Whether styles render as escape codes or as nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Palette {
    pub enabled: bool,
}

impl Palette {
    pub fn open(self, style: Style) -> &'static str {
        if self.enabled {
            style.open()
        } else {
            ""
        }
    }

    pub fn close(self, style: Style) -> &'static str {
        if self.enabled {
            style.close()
        } else {
            ""
        }
    }
}

/// Removes the escape sequences [`Style`] emits.
#[cfg(test)]
pub(crate) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}
