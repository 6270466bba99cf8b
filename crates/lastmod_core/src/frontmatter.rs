//! Front matter header block reading and patching.
//!
//! The header block is treated as line-oriented `key: value` text rather than
//! parsed as YAML, so every byte outside the one edited line survives a
//! rewrite untouched.

const OPEN: &str = "---\n";
const CLOSE: &str = "\n---\n";

/// A document split into its header text and body.
///
/// `header` excludes both delimiter lines and the newline before the closing
/// delimiter; `body` is everything after the closing delimiter line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderBlock<'a> {
    /// Text between the delimiter lines.
    pub header: &'a str,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
}

impl<'a> HeaderBlock<'a> {
    /// Value of the first header line starting with `key:`, trimmed.
    ///
    /// An empty value counts as absent.
    pub fn field(&self, key: &str) -> Option<&'a str> {
        self.header
            .split('\n')
            .find_map(|line| field_value(line, key))
            .filter(|value| !value.is_empty())
    }

    /// Render the document with `key` set to `value`.
    pub fn with_field(&self, key: &str, value: &str) -> String {
        let replacement = format!("{}: {}", key, value);
        let mut lines: Vec<&str> = self.header.split('\n').collect();

        match lines
            .iter()
            .position(|line| field_value(line, key).is_some())
        {
            Some(idx) => lines[idx] = &replacement,
            None => lines.push(&replacement),
        }

        format!("{}{}{}{}", OPEN, lines.join("\n"), CLOSE, self.body)
    }
}

/// Locate the header block at the very start of `content`.
///
/// Returns `None` unless `content` begins with `---\n` and a later `\n---\n`
/// closes the block.
pub fn split(content: &str) -> Option<HeaderBlock<'_>> {
    let rest = content.strip_prefix(OPEN)?;
    let end_idx = rest.find(CLOSE)?;

    Some(HeaderBlock {
        header: &rest[..end_idx],
        body: &rest[end_idx + CLOSE.len()..],
    })
}

/// Read the trimmed value of `key` from the header block of `content`.
///
/// `None` when there is no header block, no such key, or the value is empty.
pub fn read_field(content: &str, key: &str) -> Option<String> {
    split(content)?.field(key).map(String::from)
}

/// Return `content` with `key` set to `value` in its header block.
///
/// The first existing `key:` line is replaced; otherwise a new line is
/// appended at the end of the header. The body is preserved byte for byte.
/// Returns `None` when `content` has no header block.
pub fn write_field(content: &str, key: &str, value: &str) -> Option<String> {
    split(content).map(|block| block.with_field(key, value))
}

/// Strip the header block, returning only the body.
///
/// If no header block exists, returns the content unchanged.
pub fn extract_body(content: &str) -> &str {
    split(content).map_or(content, |block| block.body)
}

fn field_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.strip_prefix(key)?.strip_prefix(':').map(str::trim)
}
