//! Command parser: raw text to [`Command`].
//!
//! The parser never fails. Malformed commands come out as ordinary
//! [`Command`] values and are rejected later by [`apply`](crate::apply)
//! with an `INVALID` status.

use gridbot_core::{Args, Command};

/// Parse one line of input.
///
/// - Surrounding whitespace is trimmed; blank input yields
///   [`Command::empty()`].
/// - The verb is everything before the first whitespace character.
/// - The remainder, trimmed, is split on commas into trimmed tokens;
///   empty tokens are dropped.
///
/// No case folding happens here.
///
/// # Examples
///
/// ```
/// use gridbot_engine::parse;
///
/// let cmd = parse("  PLACE_ROBOT 1, 2 ,NORTH ");
/// assert_eq!(cmd.verb, "PLACE_ROBOT");
/// assert_eq!(cmd.args.as_slice(), ["1", "2", "NORTH"]);
/// assert_eq!(cmd.raw, "PLACE_ROBOT 1, 2 ,NORTH");
///
/// assert!(parse("   ").is_empty());
/// ```
pub fn parse(raw: &str) -> Command {
    let raw = raw.trim();
    if raw.is_empty() {
        return Command::empty();
    }

    let (verb, rest) = raw.split_once(char::is_whitespace).unwrap_or((raw, ""));
    let args: Args = rest
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    Command {
        verb: verb.to_string(),
        args,
        raw: raw.to_string(),
    }
}
