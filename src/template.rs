//! Command templates
//!
//! Templates are command lines such as `branch -? ?` in which every `?` is a
//! positional placeholder. Values are consumed left to right; once they run
//! out the remaining placeholders are kept as-is, and surplus values are
//! ignored.
//!
//! Two renderings exist. [`substitute`] (and [`CommandTemplate::render`]) is
//! plain text interpolation with no escaping at all. [`CommandTemplate::to_command`]
//! splits the *template* on whitespace first and substitutes inside each
//! token, so a value never leaks into a neighbouring argument no matter what
//! it contains. Only the latter is ever handed to a process.

use std::fmt;

/// Marker character for a substitution point.
pub const PLACEHOLDER: char = '?';

/// Replace placeholders in `template` with `values`, left to right.
pub fn substitute<S: AsRef<str>>(template: &str, values: &[S]) -> String {
    let mut values = values.iter();
    fill(template, &mut values)
}

fn fill<'a, S, I>(text: &str, values: &mut I) -> String
where
    S: AsRef<str> + 'a,
    I: Iterator<Item = &'a S>,
{
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == PLACEHOLDER {
            match values.next() {
                Some(value) => out.push_str(value.as_ref()),
                None => out.push(PLACEHOLDER),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTemplate<'a> {
    template: &'a str,
}

impl<'a> CommandTemplate<'a> {
    pub fn new(template: &'a str) -> Self {
        Self { template }
    }

    pub fn as_str(&self) -> &'a str {
        self.template
    }

    pub fn placeholder_count(&self) -> usize {
        self.template.matches(PLACEHOLDER).count()
    }

    /// Textual substitution, see [`substitute`].
    pub fn render<S: AsRef<str>>(&self, values: &[S]) -> String {
        substitute(self.template, values)
    }

    /// Build the argument vector for this template.
    ///
    /// A token made up only of a placeholder whose value is an empty string
    /// still yields an (empty) argument.
    pub fn to_command<S: AsRef<str>>(&self, values: &[S]) -> GitCommand {
        let mut values = values.iter();
        let args = self
            .template
            .split_whitespace()
            .map(|token| fill(token, &mut values))
            .collect();
        GitCommand { args }
    }
}

/// A fully built argument vector, not including the program name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitCommand {
    args: Vec<String>,
}

impl GitCommand {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn push(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    /// First argument, i.e. the git subcommand.
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&quote_arg(arg))?;
        }
        Ok(())
    }
}

/// Escape single quotes with a backslash.
pub fn escape_quotes(value: &str) -> String {
    value.replace('\'', "\\'")
}

fn quote_arg(arg: &str) -> String {
    let needs_quotes = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '"');
    if needs_quotes {
        format!("'{}'", escape_quotes(arg))
    } else {
        arg.to_string()
    }
}
