//! Helpers for claiming plugin flags from the compiler's command line.
//!
//! Every helper borrows the incoming flags and returns the unclaimed ones as
//! a new vector in their original order, so a plugin can never disturb the
//! flags other plugins or the host will see.
//!
//! ```
//! use stagehook_core::args::take_flag;
//!
//! let args: Vec<String> = ["--check=strict", "-d", "out"].map(String::from).into();
//! let (mode, rest) = take_flag(&args, "--check").unwrap();
//!
//! assert_eq!(mode.as_deref(), Some("strict"));
//! assert_eq!(rest, ["-d", "out"]);
//! ```

use std::str::FromStr;

use thiserror::Error;

/// A plugin flag that is malformed or conflicts with another flag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCommandLine {
    #[error("missing value for '{flag}'")]
    MissingValue { flag: String },

    #[error("invalid value '{value}' for '{flag}' (expected {expected})")]
    InvalidValue {
        flag: String,
        value: String,
        expected: String,
    },

    #[error("conflicting values for '{flag}': '{first}' and '{second}'")]
    Conflicting {
        flag: String,
        first: String,
        second: String,
    },

    #[error("'{flag}' does not take a value (got '{value}')")]
    UnexpectedValue { flag: String, value: String },
}

impl InvalidCommandLine {
    /// The flag the error is about.
    pub fn flag(&self) -> &str {
        match self {
            InvalidCommandLine::MissingValue { flag }
            | InvalidCommandLine::InvalidValue { flag, .. }
            | InvalidCommandLine::Conflicting { flag, .. }
            | InvalidCommandLine::UnexpectedValue { flag, .. } => flag,
        }
    }
}

/// Match `arg` against `flag`.
///
/// Returns `None` if `arg` is a different flag, `Some(None)` for the bare
/// form and `Some(Some(value))` for the `flag=value` form. A flag that merely
/// shares a prefix (`--checks` for `--check`) does not match.
fn match_flag<'a>(arg: &'a str, flag: &str) -> Option<Option<&'a str>> {
    if arg == flag {
        return Some(None);
    }
    arg.strip_prefix(flag)
        .and_then(|rest| rest.strip_prefix('='))
        .map(Some)
}

/// Claim every occurrence of a valued flag, in `--flag=value` or
/// `--flag value` form.
///
/// In the separate form a following token that starts with `-` is another
/// flag, not a value.
fn collect_values(
    args: &[String],
    flag: &str,
) -> Result<(Vec<String>, Vec<String>), InvalidCommandLine> {
    let mut values = Vec::new();
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match match_flag(arg, flag) {
            Some(Some(value)) => {
                if value.is_empty() {
                    return Err(InvalidCommandLine::MissingValue { flag: flag.into() });
                }
                values.push(value.to_string());
            }
            Some(None) => match iter.next() {
                Some(value) if !value.starts_with('-') => values.push(value.clone()),
                _ => return Err(InvalidCommandLine::MissingValue { flag: flag.into() }),
            },
            None => rest.push(arg.clone()),
        }
    }

    Ok((values, rest))
}

/// Claim a single-valued flag.
///
/// Repeating the flag with the same value is allowed; repeating it with a
/// different value is a conflict.
pub fn take_flag(
    args: &[String],
    flag: &str,
) -> Result<(Option<String>, Vec<String>), InvalidCommandLine> {
    let (values, rest) = collect_values(args, flag)?;
    let mut values = values.into_iter();
    let first = values.next();

    if let Some(first) = &first
        && let Some(second) = values.find(|v| v != first)
    {
        return Err(InvalidCommandLine::Conflicting {
            flag: flag.into(),
            first: first.clone(),
            second,
        });
    }

    Ok((first, rest))
}

/// Claim every value of a repeatable flag.
pub fn take_multi_flag(
    args: &[String],
    flag: &str,
) -> Result<(Vec<String>, Vec<String>), InvalidCommandLine> {
    collect_values(args, flag)
}

/// Claim a boolean switch that takes no value.
pub fn take_switch(args: &[String], flag: &str) -> Result<(bool, Vec<String>), InvalidCommandLine> {
    let mut present = false;
    let mut rest = Vec::with_capacity(args.len());

    for arg in args {
        match match_flag(arg, flag) {
            Some(None) => present = true,
            Some(Some(value)) => {
                return Err(InvalidCommandLine::UnexpectedValue {
                    flag: flag.into(),
                    value: value.into(),
                });
            }
            None => rest.push(arg.clone()),
        }
    }

    Ok((present, rest))
}

/// Parse a flag value into one of a fixed set of choices.
pub fn parse_choice<T: FromStr>(
    flag: &str,
    value: &str,
    expected: &str,
) -> Result<T, InvalidCommandLine> {
    value
        .parse()
        .map_err(|_| InvalidCommandLine::InvalidValue {
            flag: flag.into(),
            value: value.into(),
            expected: expected.into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_take_flag_equals_form() {
        let input = args(&["--check=strict", "-d", "out"]);
        let (value, rest) = take_flag(&input, "--check").unwrap();

        assert_eq!(value.as_deref(), Some("strict"));
        assert_eq!(rest, args(&["-d", "out"]));
        // Input is untouched
        assert_eq!(input, args(&["--check=strict", "-d", "out"]));
    }

    #[test]
    fn test_take_flag_separate_form() {
        let input = args(&["-g", "--check", "warn", "Main.java"]);
        let (value, rest) = take_flag(&input, "--check").unwrap();

        assert_eq!(value.as_deref(), Some("warn"));
        assert_eq!(rest, args(&["-g", "Main.java"]));
    }

    #[test]
    fn test_take_flag_absent() {
        let input = args(&["-d", "out"]);
        let (value, rest) = take_flag(&input, "--check").unwrap();

        assert!(value.is_none());
        assert_eq!(rest, input);
    }

    #[test]
    fn test_take_flag_ignores_shared_prefix() {
        let input = args(&["--checks=all", "--check-all"]);
        let (value, rest) = take_flag(&input, "--check").unwrap();

        assert!(value.is_none());
        assert_eq!(rest, input);
    }

    #[test]
    fn test_take_flag_missing_value() {
        let err = take_flag(&args(&["--check"]), "--check").unwrap_err();
        assert_eq!(
            err,
            InvalidCommandLine::MissingValue {
                flag: "--check".into()
            }
        );

        let err = take_flag(&args(&["--check="]), "--check").unwrap_err();
        assert_eq!(err.flag(), "--check");
    }

    #[test]
    fn test_take_flag_does_not_swallow_next_flag() {
        let err = take_flag(&args(&["--check", "-d"]), "--check").unwrap_err();
        assert_eq!(
            err,
            InvalidCommandLine::MissingValue {
                flag: "--check".into()
            }
        );

        // A value starting with '-' can still be passed in the joined form
        let (value, _) = take_flag(&args(&["--check=-d"]), "--check").unwrap();
        assert_eq!(value.as_deref(), Some("-d"));
    }

    #[test]
    fn test_take_flag_conflict() {
        let err = take_flag(&args(&["--check=strict", "--check=warn"]), "--check").unwrap_err();
        assert!(matches!(err, InvalidCommandLine::Conflicting { .. }));

        // Repeating the same value is fine
        let (value, rest) =
            take_flag(&args(&["--check=warn", "--check", "warn"]), "--check").unwrap();
        assert_eq!(value.as_deref(), Some("warn"));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_take_multi_flag() {
        let input = args(&["--direct-dep=com.a", "-d", "out", "--direct-dep", "com.b"]);
        let (values, rest) = take_multi_flag(&input, "--direct-dep").unwrap();

        assert_eq!(values, args(&["com.a", "com.b"]));
        assert_eq!(rest, args(&["-d", "out"]));
    }

    #[test]
    fn test_take_multi_flag_does_not_swallow_next_flag() {
        let err =
            take_multi_flag(&args(&["--direct-dep", "--naming"]), "--direct-dep").unwrap_err();
        assert_eq!(err.flag(), "--direct-dep");
        assert!(matches!(err, InvalidCommandLine::MissingValue { .. }));
    }

    #[test]
    fn test_take_switch() {
        let (present, rest) = take_switch(&args(&["--naming", "-g"]), "--naming").unwrap();
        assert!(present);
        assert_eq!(rest, args(&["-g"]));

        let err = take_switch(&args(&["--naming=yes"]), "--naming").unwrap_err();
        assert!(matches!(err, InvalidCommandLine::UnexpectedValue { .. }));
    }

    #[test]
    fn test_empty_args() {
        let (value, rest) = take_flag(&[], "--check").unwrap();
        assert!(value.is_none());
        assert!(rest.is_empty());
    }

    #[test]
    fn test_parse_choice() {
        let n: u32 = parse_choice("--depth", "3", "a number").unwrap();
        assert_eq!(n, 3);

        let err = parse_choice::<u32>("--depth", "deep", "a number").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value 'deep' for '--depth' (expected a number)"
        );
    }
}
