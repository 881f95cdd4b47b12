//! Log sanitization for entered clinical values.
//!
//! Field values typed into the form are health data. Call sites never log
//! them, but anything that slips through (a `Debug` of a feature vector, an
//! error message quoting an input) is redacted here before it reaches the
//! log sink:
//! - bracketed numeric vectors (`[2.0, 120.0, ...]`)
//! - `value=`/`input=` fragments, including quoted debug output
//! - e-mail addresses and phone numbers

use regex::Regex;
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

/// Lines longer than this are cut before scanning.
const MAX_LINE_BYTES: usize = 16 * 1024;

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

static RULES: OnceLock<Vec<Rule>> = OnceLock::new();

fn rules() -> &'static [Rule] {
    RULES.get_or_init(|| {
        [
            (
                r"\[\s*-?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?(?:\s*,\s*-?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)+\s*,?\s*\]",
                "[REDACTED-FEATURES]",
            ),
            (
                r#"(?i)\b(value|input)\s*[:=]\s*(?:"[^"]*"|[^\s,}]+)"#,
                "$1=[REDACTED]",
            ),
            (
                r"(?i)\b[a-z0-9._%+-]{1,64}@(?:[a-z0-9-]{1,63}\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            (
                r"\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s][0-9]{3}[-.\s][0-9]{4}\b",
                "[REDACTED-PHONE]",
            ),
        ]
        .into_iter()
        .filter_map(|(pattern, replacement)| match Regex::new(pattern) {
            Ok(regex) => Some(Rule { regex, replacement }),
            Err(e) => {
                eprintln!("sanitize: skipping invalid pattern {pattern:?}: {e}");
                None
            }
        })
        .collect()
    })
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Redact clinical values and contact details from `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    let (prefix, truncated) = truncate_to_char_boundary(input, MAX_LINE_BYTES);
    let mut out = prefix.to_string();
    for rule in rules() {
        if rule.regex.is_match(&out) {
            out = rule.regex.replace_all(&out, rule.replacement).into_owned();
        }
    }
    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// A `tracing_subscriber` writer wrapper that sanitizes each formatted line
/// before it is written to the underlying sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn write_line(&mut self, line: &[u8]) -> std::io::Result<()> {
        let sanitized = sanitize(&String::from_utf8_lossy(line));
        self.inner.write_all(sanitized.as_bytes())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_line(&line)?;
        }
        if self.buffer.len() > MAX_LINE_BYTES * 2 {
            let rest = std::mem::take(&mut self.buffer);
            self.write_line(&rest)?;
            self.inner.write_all(b"\n")?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            self.write_line(&rest)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            buffer: Vec::new(),
        }
    }
}
