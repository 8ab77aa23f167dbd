//! The rewrite service seam and its command registry.

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// An external text-rewriting service.
///
/// Calls may block for seconds; [`Session`](super::Session) only invokes them
/// on a worker thread. Timeouts belong to the implementation.
pub trait Rewriter: Send + Sync {
    /// Rewrite `input` according to `command`, with `context` as background.
    fn rewrite(&self, command: &str, context: &str, input: &str) -> Result<String>;
}

impl<F> Rewriter for F
where
    F: Fn(&str, &str, &str) -> Result<String> + Send + Sync,
{
    fn rewrite(&self, command: &str, context: &str, input: &str) -> Result<String> {
        self(command, context, input)
    }
}

/// Rewriter that always answers with the same text.
///
/// Useful for replaying a saved answer without contacting the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedRewriter {
    answer: String,
}

impl FixedRewriter {
    /// Create a rewriter returning `answer` for every request.
    #[must_use]
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

impl Rewriter for FixedRewriter {
    fn rewrite(&self, _command: &str, _context: &str, _input: &str) -> Result<String> {
        Ok(self.answer.clone())
    }
}

/// Named rewrite commands and their preambles.
///
/// An empty set accepts any command name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandSet {
    preambles: BTreeMap<String, String>,
}

impl CommandSet {
    /// Create an empty command set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a command (builder pattern).
    #[must_use]
    pub fn with_command(mut self, name: impl Into<String>, preamble: impl Into<String>) -> Self {
        self.insert(name, preamble);
        self
    }

    /// Add or replace a command.
    pub fn insert(&mut self, name: impl Into<String>, preamble: impl Into<String>) {
        self.preambles.insert(name.into(), preamble.into());
    }

    /// Parse `name=preamble` lines.
    ///
    /// Blank lines and lines starting with `#` or `!` are skipped. A trailing
    /// backslash continues the value on the next line. Lines without `=` are
    /// ignored.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut set = Self::new();
        let mut pending: Option<(String, String)> = None;

        for raw in source.lines() {
            let line = raw.trim();

            if let Some((name, mut value)) = pending.take() {
                let (part, more) = split_continuation(line);
                value.push_str(part);
                if more {
                    pending = Some((name, value));
                } else {
                    set.insert(name, value);
                }
                continue;
            }

            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some((name, value)) = line.split_once('=') else {
                continue;
            };
            let (part, more) = split_continuation(value.trim_start());
            let name = name.trim().to_string();
            if more {
                pending = Some((name, part.to_string()));
            } else {
                set.insert(name, part);
            }
        }
        if let Some((name, value)) = pending {
            set.insert(name, value);
        }

        set
    }

    /// Preamble for `name`.
    pub fn preamble(&self, name: &str) -> Result<&str> {
        self.preambles
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))
    }

    /// True when `name` may be requested.
    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        self.preambles.is_empty() || self.preambles.contains_key(name)
    }

    /// Command names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.preambles.keys().map(String::as_str)
    }

    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.preambles.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.preambles.is_empty()
    }
}

fn split_continuation(line: &str) -> (&str, bool) {
    match line.strip_suffix('\\') {
        Some(head) => (head, true),
        None => (line, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rewriter() {
        let rewriter = FixedRewriter::new("The cat sits.");
        assert_eq!(
            rewriter.rewrite("polish", "", "The cat sat.").unwrap(),
            "The cat sits."
        );
    }

    #[test]
    fn test_closure_rewriter() {
        let upper = |_: &str, _: &str, input: &str| -> Result<String> { Ok(input.to_uppercase()) };
        assert_eq!(upper.rewrite("shout", "", "hey").unwrap(), "HEY");
    }

    #[test]
    fn test_parse_commands() {
        let set = CommandSet::parse(
            "# rewrite commands\n\
             polish = Improve the style of the text.\n\
             \n\
             ! legacy comment\n\
             shorten=Make the text shorter \\\n\
             without losing content.\n\
             no separator here\n",
        );
        assert_eq!(set.names().collect::<Vec<_>>(), ["polish", "shorten"]);
        assert_eq!(
            set.preamble("polish").unwrap(),
            "Improve the style of the text."
        );
        assert_eq!(
            set.preamble("shorten").unwrap(),
            "Make the text shorter without losing content."
        );
    }

    #[test]
    fn test_unknown_command() {
        let set = CommandSet::new().with_command("polish", "Improve.");
        assert!(matches!(
            set.preamble("translate"),
            Err(Error::UnknownCommand(name)) if name == "translate"
        ));
        assert!(set.accepts("polish"));
        assert!(!set.accepts("translate"));
        assert!(CommandSet::new().accepts("anything"));
    }
}
