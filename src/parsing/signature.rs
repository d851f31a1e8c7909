//! Line-oriented extraction of exported method signatures
//!
//! Declarations are recognised by pattern matching on trimmed lines instead of
//! a syntax tree. A declaration may span several lines; the extractor keeps the
//! partial text until a line ends in the body-opening brace.
//!
//! Quirks that callers rely on:
//! - a line ending in `}` is treated as a complete inline declaration and cut
//!   back to its last `{`
//! - a commented-out trailing parameter leaves `, )` behind, which collapses
//!   to `)`
//! - a line that both opens and closes a block comment (`/* ... */`) is
//!   skipped on its own and does not start a skipped region, so declarations
//!   after it are still seen
//! - a block comment inside a parameter list is dropped up to and including
//!   its closing line

use crate::error::{ErrorContext, ExtractResult};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const METHOD_KEYWORD: &str = "func (";
const LINE_COMMENT: &str = "//";
const BLOCK_COMMENT_OPEN: &str = "/*";
const BLOCK_COMMENT_CLOSE: &str = "*/";
const BODY_OPEN: char = '{';
const BODY_CLOSE: char = '}';
const RECEIVER_INDIRECTION: char = '*';
const TRAILING_COMMA_ARTIFACT: &str = ", )";

/// Extracts the signatures of exported methods bound to one receiver type.
#[derive(Debug, Clone)]
pub struct SignatureExtractor {
    receiver: String,
}

#[derive(Debug)]
enum LineState {
    Seeking,
    Accumulating(String),
}

/// How the text following a method name ends.
enum Fragment<'a> {
    /// Declaration is complete; holds the text before the body marker
    Complete(&'a str),
    /// More lines follow
    Partial,
}

impl SignatureExtractor {
    pub fn new(receiver: impl Into<String>) -> Self {
        Self {
            receiver: receiver.into(),
        }
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    /// Run the line machine over every line of `reader`.
    ///
    /// Signatures are returned in the order they appear in the input.
    pub fn extract<R: BufRead>(&self, reader: R) -> io::Result<Vec<String>> {
        let mut scan = LineScan::new(self);
        for line in reader.lines() {
            scan.feed(&line?);
        }
        Ok(scan.finish())
    }

    /// Convenience wrapper for in-memory sources.
    pub fn extract_str(&self, source: &str) -> Vec<String> {
        let mut scan = LineScan::new(self);
        for line in source.lines() {
            scan.feed(line);
        }
        scan.finish()
    }

    /// Match a declaration line against the target receiver.
    ///
    /// Returns the text from the method name onward when the line declares an
    /// exported method on the receiver, by value or through a pointer.
    fn match_declaration<'l>(&self, line: &'l str) -> Option<&'l str> {
        let rest = line.strip_prefix(METHOD_KEYWORD)?;
        let receiver_end = rest.find(')')?;

        let receiver = &rest[..receiver_end];
        // Keep only the type token: "e *Example" -> "*Example"
        let receiver_type = receiver
            .split_once(' ')
            .map_or(receiver, |(_, ty)| ty)
            .trim();
        let receiver_type = receiver_type
            .strip_prefix(RECEIVER_INDIRECTION)
            .unwrap_or(receiver_type);
        if receiver_type != self.receiver {
            return None;
        }

        let method = rest[receiver_end + 1..].trim_start();
        let exported = method.chars().next().is_some_and(char::is_uppercase);
        exported.then_some(method)
    }
}

/// Mutable state for a single pass over one input.
struct LineScan<'e> {
    extractor: &'e SignatureExtractor,
    state: LineState,
    in_block_comment: bool,
    signatures: Vec<String>,
}

impl<'e> LineScan<'e> {
    fn new(extractor: &'e SignatureExtractor) -> Self {
        Self {
            extractor,
            state: LineState::Seeking,
            in_block_comment: false,
            signatures: Vec::new(),
        }
    }

    fn feed(&mut self, raw: &str) {
        let line = raw.trim();

        if self.in_block_comment {
            if line.ends_with(BLOCK_COMMENT_CLOSE) {
                self.in_block_comment = false;
            }
            return;
        }
        if line.starts_with(LINE_COMMENT) {
            return;
        }
        if line.starts_with(BLOCK_COMMENT_OPEN) {
            // "/* ... */" on a single line closes itself
            let closes_inline = line.len() >= 4 && line.ends_with(BLOCK_COMMENT_CLOSE);
            self.in_block_comment = !closes_inline;
            return;
        }

        self.state = match std::mem::replace(&mut self.state, LineState::Seeking) {
            LineState::Seeking => match self.extractor.match_declaration(line) {
                Some(head) => self.advance(String::new(), head),
                None => LineState::Seeking,
            },
            LineState::Accumulating(partial) if line.is_empty() => {
                LineState::Accumulating(partial)
            }
            LineState::Accumulating(partial) => self.advance(partial, line),
        };
    }

    fn advance(&mut self, mut partial: String, fragment: &str) -> LineState {
        match classify(fragment) {
            Fragment::Complete(head) => {
                partial.push_str(head.trim_end());
                self.signatures
                    .push(partial.replace(TRAILING_COMMA_ARTIFACT, ")"));
                LineState::Seeking
            }
            Fragment::Partial => {
                partial.push_str(fragment);
                if !fragment.ends_with('(') {
                    partial.push(' ');
                }
                LineState::Accumulating(partial)
            }
        }
    }

    fn finish(self) -> Vec<String> {
        if let LineState::Accumulating(partial) = &self.state {
            tracing::debug!(
                "discarding unterminated declaration on '{}': {partial}",
                self.extractor.receiver
            );
        }
        self.signatures
    }
}

fn classify(fragment: &str) -> Fragment<'_> {
    if let Some(head) = fragment.strip_suffix(BODY_OPEN) {
        return Fragment::Complete(head);
    }
    if fragment.ends_with(BODY_CLOSE) {
        if let Some(body_start) = fragment.rfind(BODY_OPEN) {
            return Fragment::Complete(&fragment[..body_start]);
        }
    }
    Fragment::Partial
}

/// Read `path` line by line and return the exported methods of `receiver`.
///
/// A file that cannot be opened or decoded yields [`ExtractError::FileRead`]
/// for that file only.
///
/// [`ExtractError::FileRead`]: crate::error::ExtractError::FileRead
pub fn find_methods_in_file(path: &Path, receiver: &str) -> ExtractResult<Vec<String>> {
    let file = File::open(path).with_path(path)?;
    SignatureExtractor::new(receiver)
        .extract(BufReader::new(file))
        .with_path(path)
}
