//! Incremental prefix-rule syntax matcher.
//!
//! A [`RuleTable`] is an ordered list of rules. Each rule owns a [`PrefixPattern`], which only
//! answers "how long is the match that starts exactly here?". The matching engine is therefore
//! pluggable: `caret-highlight-simple` provides a regex engine, and any closure
//! `Fn(&str) -> Option<usize>` can be wrapped in [`FnPattern`].
//!
//! Scan loop: at each position the rules are tried in table order and the first non-empty prefix
//! match wins; the scan jumps to its end. When no rule matches, the scan advances one codepoint.
//! Rule order is priority.
//!
//! [`SyntaxMatcher`] keeps the matches found so far plus a resume position. Edits invalidate
//! everything from the edited line onward ([`SyntaxMatcher::invalidate_from`]); re-scanning
//! happens on demand ([`SyntaxMatcher::ensure_scanned`]) and is bounded by a byte budget per pass.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::buffer::{Buffer, TextPos};

/// Style ID type
pub type StyleId = u32;

/// A pattern that can only match at the start of the haystack.
pub trait PrefixPattern: Send + Sync {
    /// Byte length of the match starting at `haystack[0]`, or `None`.
    ///
    /// The haystack is the following buffer text (lines joined with `'\n'`, at least
    /// [`MIN_LOOKAHEAD_BYTES`] long unless the buffer ends sooner), so multi-line patterns see
    /// the following lines.
    fn match_prefix(&self, haystack: &str) -> Option<usize>;
}

/// A hand-written matcher function used as a [`PrefixPattern`].
#[derive(Clone, Copy)]
pub struct FnPattern<F>(pub F);

impl<F> PrefixPattern for FnPattern<F>
where
    F: Fn(&str) -> Option<usize> + Send + Sync,
{
    fn match_prefix(&self, haystack: &str) -> Option<usize> {
        (self.0)(haystack)
    }
}

/// One named rule.
#[derive(Clone)]
pub struct Rule {
    name: Arc<str>,
    pattern: Arc<dyn PrefixPattern>,
    style_id: StyleId,
}

impl Rule {
    pub fn new(name: &str, pattern: impl PrefixPattern + 'static, style_id: StyleId) -> Self {
        Self {
            name: Arc::from(name),
            pattern: Arc::new(pattern),
            style_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style_id(&self) -> StyleId {
        self.style_id
    }

    /// Match length at the start of `haystack`, rejecting empty and non-boundary lengths.
    fn prefix_len(&self, haystack: &str) -> Option<usize> {
        let len = self.pattern.match_prefix(haystack)?;
        (len > 0 && len <= haystack.len() && haystack.is_char_boundary(len)).then_some(len)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("style_id", &self.style_id)
            .finish_non_exhaustive()
    }
}

/// Ordered rule list. Earlier rules take priority.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule matching a non-empty prefix of `haystack`, with the match length.
    pub fn match_at(&self, haystack: &str) -> Option<(&Rule, usize)> {
        self.rules
            .iter()
            .find_map(|rule| rule.prefix_len(haystack).map(|len| (rule, len)))
    }
}

/// A tagged buffer range produced by the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Name of the rule that produced the match.
    pub rule: Arc<str>,
    /// Inclusive start.
    pub start: TextPos,
    /// Exclusive end.
    pub end: TextPos,
    pub style_id: StyleId,
}

impl Match {
    pub fn contains(&self, pos: TextPos) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Whether the match covers any byte of `line` (a match may end at byte 0 of the next line
    /// after consuming the line break).
    pub fn touches_line(&self, line: usize) -> bool {
        self.start.line <= line && self.end > TextPos::new(line, 0)
    }
}

/// Incremental matcher over one buffer.
#[derive(Debug, Clone)]
pub struct SyntaxMatcher {
    rules: RuleTable,
    matches: Vec<Match>,
    resume: TextPos,
    complete: bool,
}

impl SyntaxMatcher {
    pub fn new(rules: RuleTable) -> Self {
        Self {
            rules,
            matches: Vec::new(),
            resume: TextPos::default(),
            complete: false,
        }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Matches found so far, in document order.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Position the next scan pass starts from.
    pub fn resume_position(&self) -> TextPos {
        self.resume
    }

    /// Whether the scan has reached the end of the buffer.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Drop every match that reaches into `line` or later and rewind the scan.
    ///
    /// A match that started on an earlier line but spans into `line` is dropped as a whole and
    /// the scan resumes from its start.
    pub fn invalidate_from(&mut self, line: usize) {
        let boundary = TextPos::new(line, 0);
        let keep = self.matches.partition_point(|m| m.end <= boundary);
        let rewind = self.matches.get(keep).map_or(boundary, |m| m.start.min(boundary));
        let dropped = self.matches.len() - keep;
        self.matches.truncate(keep);
        if rewind < self.resume {
            self.resume = rewind;
        }
        if self.complete || dropped > 0 {
            tracing::trace!(line, dropped, resume_line = self.resume.line, "syntax invalidated");
        }
        self.complete = false;
    }

    /// Drop everything and rescan from the top on the next pass.
    pub fn reset(&mut self) {
        self.matches.clear();
        self.resume = TextPos::default();
        self.complete = false;
    }

    /// Scan until every line up to and including `through_line` is covered, the buffer ends,
    /// or `budget_bytes` bytes have been consumed in this pass.
    ///
    /// Rules see at least `budget_bytes` (and at least [`MIN_LOOKAHEAD_BYTES`]) of text past the
    /// scan position, so one pass copies a bounded slice of the buffer. A budget of 0 still makes
    /// progress of one step.
    ///
    /// Returns whether `through_line` is fully covered.
    pub fn ensure_scanned(&mut self, buffer: &Buffer, through_line: usize, budget_bytes: usize) -> bool {
        if self.is_covered(buffer, through_line) {
            return true;
        }
        let budget_bytes = budget_bytes.max(1);
        let lookahead = budget_bytes.max(MIN_LOOKAHEAD_BYTES);
        let start = buffer.clamp(self.resume);
        let mut window = Window::new(buffer, start.line);
        let mut offset = start.byte;
        let mut pos = start;
        let mut scanned = 0usize;
        let found_before = self.matches.len();

        while pos.line <= through_line && scanned < budget_bytes {
            if window.text.len() - offset < lookahead {
                window.extend_to(offset.saturating_add(lookahead));
            }
            let rest = &window.text[offset..];
            if rest.is_empty() {
                break;
            }
            let step = match self.rules.match_at(rest) {
                Some((rule, len)) => {
                    let end = pos.advanced_by(&rest[..len]);
                    self.matches.push(Match {
                        rule: Arc::clone(&rule.name),
                        start: pos,
                        end,
                        style_id: rule.style_id,
                    });
                    len
                }
                None => rest.chars().next().map_or(rest.len(), char::len_utf8),
            };
            pos = pos.advanced_by(&rest[..step]);
            offset += step;
            scanned += step;
        }
        if window.at_buffer_end() && offset >= window.text.len() {
            self.complete = true;
        }
        self.resume = pos;

        tracing::trace!(
            from_line = start.line,
            to_line = pos.line,
            scanned,
            window = window.text.len(),
            found = self.matches.len() - found_before,
            complete = self.complete,
            "syntax scan pass"
        );
        self.is_covered(buffer, through_line)
    }

    fn is_covered(&self, buffer: &Buffer, through_line: usize) -> bool {
        self.complete || self.resume.line > through_line.min(buffer.line_count() - 1)
    }

    /// Matches touching any line in `lines`.
    pub fn matches_in(&self, lines: Range<usize>) -> &[Match] {
        if lines.is_empty() {
            return &[];
        }
        let first = self
            .matches
            .partition_point(|m| m.end <= TextPos::new(lines.start, 0));
        let last = self
            .matches
            .partition_point(|m| m.start < TextPos::new(lines.end, 0));
        &self.matches[first..last.max(first)]
    }

    /// The match covering `pos`, if any.
    pub fn match_at(&self, pos: TextPos) -> Option<&Match> {
        let index = self.matches.partition_point(|m| m.end <= pos);
        self.matches.get(index).filter(|m| m.contains(pos))
    }
}

/// Smallest number of bytes the rules can see past the scan position.
///
/// Multi-line constructs longer than the lookahead of a pass are not recognized in that pass.
pub const MIN_LOOKAHEAD_BYTES: usize = 4096;

/// Whole lines `first..end_line` joined with `'\n'`, grown on demand.
struct Window<'a> {
    buffer: &'a Buffer,
    text: String,
    end_line: usize,
}

impl<'a> Window<'a> {
    fn new(buffer: &'a Buffer, first: usize) -> Self {
        let text = buffer.line(first).to_owned();
        Self {
            buffer,
            text,
            end_line: first + 1,
        }
    }

    /// Append whole lines until the text is at least `len` bytes long or the buffer ends.
    fn extend_to(&mut self, len: usize) {
        while self.text.len() < len && !self.at_buffer_end() {
            self.text.push('\n');
            self.text.push_str(self.buffer.line(self.end_line));
            self.end_line += 1;
        }
    }

    fn at_buffer_end(&self) -> bool {
        self.end_line >= self.buffer.line_count()
    }
}
