use memchr::memchr_iter;
use regex::Regex;
use std::sync::LazyLock;

/// Lines per event record, timestamp line included.
pub const BLOCK_LEN: usize = 6;

/// Full-line match: `Jan 05 10:30:00`. No year.
static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]{2}\s+[0-9]{2}\s+[0-9]{2}:[0-9]{2}:[0-9]{2}$")
        .expect("timestamp pattern is valid")
});

/// A fixed window of lines starting at a timestamp line.
///
/// Positions past the end of input read as `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventBlock<'a> {
    lines: [&'a str; BLOCK_LEN],
}

impl<'a> EventBlock<'a> {
    pub fn timestamp(&self) -> &'a str {
        self.lines[0]
    }

    pub fn line(&self, pos: usize) -> Option<&'a str> {
        self.lines.get(pos).copied().filter(|l| !l.is_empty())
    }
}

/// Outcome of inspecting one scan position.
#[derive(Debug, PartialEq, Eq)]
enum Step<'a> {
    Block(EventBlock<'a>),
    Skip,
}

impl Step<'_> {
    fn advance(&self) -> usize {
        match self {
            Step::Block(_) => BLOCK_LEN,
            Step::Skip => 1,
        }
    }
}

pub fn is_timestamp(line: &str) -> bool {
    TIMESTAMP_RE.is_match(line)
}

/// Split the trimmed input on `\n` and drop lines that are blank once
/// trimmed. Kept lines are stored as-is, minus a trailing `\r`.
pub fn non_empty_lines(input: &str) -> Vec<&str> {
    let input = input.trim();
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() / 40);
    let mut start = 0;
    for nl in memchr_iter(b'\n', bytes) {
        push_non_blank(&input[start..nl], &mut out);
        start = nl + 1;
    }
    if start < bytes.len() {
        push_non_blank(&input[start..], &mut out);
    }
    out
}

fn push_non_blank<'a>(line: &'a str, out: &mut Vec<&'a str>) {
    if !line.trim().is_empty() {
        out.push(line.strip_suffix('\r').unwrap_or(line));
    }
}

fn step_at<'a>(lines: &[&'a str], pos: usize) -> Step<'a> {
    if !is_timestamp(lines[pos]) {
        return Step::Skip;
    }
    let mut window = [""; BLOCK_LEN];
    for (slot, line) in window.iter_mut().zip(&lines[pos..]) {
        *slot = *line;
    }
    Step::Block(EventBlock { lines: window })
}

/// Group lines into event blocks, left to right, non-overlapping.
pub fn segment<'a>(lines: &[&'a str]) -> Vec<EventBlock<'a>> {
    let mut blocks = Vec::with_capacity(lines.len() / BLOCK_LEN);
    let mut skipped = 0usize;
    let mut pos = 0;
    while pos < lines.len() {
        let step = step_at(lines, pos);
        pos += step.advance();
        match step {
            Step::Block(block) => blocks.push(block),
            Step::Skip => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, blocks = blocks.len(), "skipped lines outside event blocks");
    }
    blocks
}
