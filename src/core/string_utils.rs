//! Stateless text helpers used by the prefix engine.

pub use super::printf::{format_string, FormatArg};

/// Check whether `string` contains `substring`, optionally ignoring ASCII case.
pub fn contains_substring(string: &str, substring: &str, ignore_case: bool) -> bool {
    if substring.len() > string.len() {
        return false;
    }
    if ignore_case {
        to_lower_case(string).contains(&to_lower_case(substring))
    } else {
        string.contains(substring)
    }
}

pub fn to_lower_case(input: &str) -> String {
    input.to_lowercase()
}

/// Remove every ANSI escape run (`ESC` through the terminating `m`).
///
/// An unterminated escape swallows the rest of the string.
pub fn strip_ansi(input: &str) -> String {
    if !input.contains('\x1b') {
        return input.to_string();
    }

    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for skipped in chars.by_ref() {
                if skipped == 'm' {
                    break;
                }
            }
        } else {
            output.push(c);
        }
    }
    output
}

/// Strip ANSI escapes, then drop every remaining control character.
pub fn strip_non_printable(input: &str) -> String {
    strip_ansi(input).chars().filter(|c| !c.is_control()).collect()
}

pub fn repeat_string(input: &str, amount: usize) -> String {
    input.repeat(amount)
}

/// Collapse runs of `doubled` down to a single occurrence.
///
/// `remove_repeated_characters("a  b   c", " ")` yields `"a b c"`. The result
/// is a fixed point: applying it twice changes nothing.
pub fn remove_repeated_characters(input: &str, doubled: &str) -> String {
    if doubled.is_empty() {
        return input.to_string();
    }
    let pair = doubled.repeat(2);
    let mut output = input.to_string();
    loop {
        let next = replace_substring(&output, &pair, doubled);
        if next == output {
            return output;
        }
        output = next;
    }
}

/// Replace every non-overlapping occurrence of `from`, scanning left to right.
pub fn replace_substring(input: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return input.to_string();
    }
    input.replace(from, to)
}

/// Split on `delimiter`, keeping empty segments.
///
/// A trailing delimiter produces a trailing empty segment:
/// `split_string("a,", ",")` is `["a", ""]`.
pub fn split_string(input: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        return vec![input.to_string()];
    }
    input.split(delimiter).map(str::to_string).collect()
}

/// Strip the directory part of a source path.
pub fn file_name(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}
