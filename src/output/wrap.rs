/// Word-wraps `text` to lines of at most `max_width` characters, each
/// starting with `indent`.
///
/// Words are split on whitespace and joined by single spaces. A word that
/// does not fit even on a fresh line is kept whole on its own line. No
/// trailing newline is emitted.
pub fn wrap(indent: &str, text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if width > 0 && width + len + 1 > max_width {
            out.push('\n');
            width = 0;
        }
        if width == 0 {
            out.push_str(indent);
            width = indent.chars().count();
        } else {
            out.push(' ');
            width += 1;
        }
        out.push_str(word);
        width += len;
    }
    out
}
