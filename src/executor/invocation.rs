//! A single command to run

use std::fmt;

use serde::Serialize;

/// Program path plus ordered arguments for one external command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// Path to the executable
    pub program: String,
    /// Arguments passed to the executable, in order
    pub args: Vec<String>,
}

impl Invocation {
    /// Create an invocation from a program and any iterable of arguments
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.program)
        } else {
            write!(f, "{} {}", self.program, self.args.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_str_and_string() {
        let from_strs = Invocation::new("/bin/echo", ["a", "b"]);
        let from_strings = Invocation::new("/bin/echo", vec!["a".to_string(), "b".to_string()]);

        assert_eq!(from_strs, from_strings);
        assert_eq!(from_strs.args, vec!["a", "b"]);
    }

    #[test]
    fn test_display() {
        let inv = Invocation::new("/usr/bin/xcrun", ["simctl", "list"]);
        assert_eq!(inv.to_string(), "/usr/bin/xcrun simctl list");

        let bare = Invocation::new("/bin/true", Vec::<String>::new());
        assert_eq!(bare.to_string(), "/bin/true");
    }
}
