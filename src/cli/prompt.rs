//! Line, hidden and multi-line input.
//!
//! On a terminal the prompts go through `dialoguer`. When stdin is piped,
//! each prompt consumes one line instead, so the CLI can be scripted; end
//! of input cancels the command.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::{Confirm, Input, Password};
use subtle::ConstantTimeEq;

use crate::cli::output;
use crate::errors::{LockboxError, Result};

fn interactive() -> bool {
    io::stdin().is_terminal()
}

fn prompt_error(e: dialoguer::Error) -> LockboxError {
    LockboxError::CommandFailed(format!("prompt: {e}"))
}

/// Read one line without its line ending, or `None` at end of input.
fn read_line_from<R: BufRead>(mut reader: R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(trim_line_ending(&line).to_string()))
}

/// Read one line from piped stdin; end of input is an error here.
fn read_piped_line(prompt: &str) -> Result<String> {
    read_line_from(io::stdin().lock())?.ok_or_else(|| {
        LockboxError::CommandFailed(format!("input ended while waiting for: {prompt}"))
    })
}

fn trim_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

/// Ask for one line of visible text. An empty answer returns `default`
/// (or an empty string when there is none).
pub fn ask_line(prompt: &str, default: Option<&str>) -> Result<String> {
    let answer = if interactive() {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?
    } else {
        read_piped_line(prompt)?
    };

    if answer.is_empty() {
        return Ok(default.unwrap_or_default().to_string());
    }
    Ok(answer)
}

/// Ask for the next command line. `None` means the input has ended
/// (Ctrl-D on a terminal, EOF on a pipe); other failures are errors.
pub fn ask_command(prompt: &str) -> Result<Option<String>> {
    if !interactive() {
        return Ok(read_line_from(io::stdin().lock())?);
    }

    match Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
    {
        Ok(line) => Ok(Some(line)),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(prompt_error(e)),
    }
}

/// `None` for an empty answer.
pub fn non_empty(answer: String) -> Option<String> {
    if answer.is_empty() {
        None
    } else {
        Some(answer)
    }
}

/// Ask for one line of hidden text.
pub fn ask_hidden(prompt: &str) -> Result<String> {
    if interactive() {
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_error)
    } else {
        read_piped_line(prompt)
    }
}

/// Ask for hidden text twice, re-asking until both entries match.
pub fn ask_confirmed_hidden(prompt: &str, confirm_prompt: &str) -> Result<String> {
    loop {
        let first = ask_hidden(prompt)?;
        let second = ask_hidden(confirm_prompt)?;
        match confirm_entries(&first, &second) {
            Ok(()) => return Ok(first),
            Err(LockboxError::ConfirmationMismatch) => {
                output::warning("Entries do not match, try again.");
            }
            Err(e) => return Err(e),
        }
    }
}

/// Yes/no question.
pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    if interactive() {
        return Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error);
    }

    let answer = read_piped_line(prompt)?.trim().to_lowercase();
    Ok(match answer.as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    })
}

/// Read multi-line notes from stdin until the sentinel line.
pub fn ask_notes(prompt: &str, sentinel: &str) -> Result<Option<String>> {
    output::info(&format!("{prompt} (finish with a line containing only '{sentinel}')"));
    Ok(read_notes(io::stdin().lock(), sentinel)?)
}

/// Collect lines up to (not including) a line equal to `sentinel`, or to
/// end of input. Inner line breaks are kept. No lines means `None`.
pub fn read_notes<R: BufRead>(reader: R, sentinel: &str) -> io::Result<Option<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line == sentinel {
            break;
        }
        lines.push(line.to_string());
    }

    if lines.is_empty() {
        return Ok(None);
    }
    Ok(Some(lines.join("\n")))
}

/// Check that two entries of the same secret value are identical.
///
/// Compared in constant time.
pub fn confirm_entries(first: &str, second: &str) -> Result<()> {
    if bool::from(first.as_bytes().ct_eq(second.as_bytes())) {
        Ok(())
    } else {
        Err(LockboxError::ConfirmationMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn notes_stop_at_sentinel() {
        let input = Cursor::new("first line\n  indented\n.\nnot included\n");
        let notes = read_notes(input, ".").unwrap();
        assert_eq!(notes.as_deref(), Some("first line\n  indented"));
    }

    #[test]
    fn notes_stop_at_end_of_input() {
        let input = Cursor::new("only line");
        assert_eq!(read_notes(input, ".").unwrap().as_deref(), Some("only line"));
    }

    #[test]
    fn notes_keep_blank_inner_lines() {
        let input = Cursor::new("a\n\nb\nEOF\n");
        assert_eq!(read_notes(input, "EOF").unwrap().as_deref(), Some("a\n\nb"));
    }

    #[test]
    fn notes_handle_crlf() {
        let input = Cursor::new("a\r\nb\r\n.\r\n");
        assert_eq!(read_notes(input, ".").unwrap().as_deref(), Some("a\nb"));
    }

    #[test]
    fn empty_notes_are_none() {
        assert_eq!(read_notes(Cursor::new(".\n"), ".").unwrap(), None);
        assert_eq!(read_notes(Cursor::new(""), ".").unwrap(), None);
    }

    #[test]
    fn sentinel_must_match_whole_line() {
        let input = Cursor::new("a . b\n..\n.\n");
        assert_eq!(read_notes(input, ".").unwrap().as_deref(), Some("a . b\n.."));
    }

    #[test]
    fn matching_entries_confirm() {
        assert!(confirm_entries("hunter2", "hunter2").is_ok());
        assert!(confirm_entries("", "").is_ok());
    }

    #[test]
    fn mismatched_entries_are_rejected() {
        assert!(matches!(
            confirm_entries("hunter2", "hunter3"),
            Err(LockboxError::ConfirmationMismatch)
        ));
        assert!(confirm_entries("hunter2", "hunter22").is_err());
    }

    #[test]
    fn lines_are_read_until_end_of_input() {
        let mut input = Cursor::new("list\r\n\nquit");
        assert_eq!(read_line_from(&mut input).unwrap().as_deref(), Some("list"));
        assert_eq!(read_line_from(&mut input).unwrap().as_deref(), Some(""));
        assert_eq!(read_line_from(&mut input).unwrap().as_deref(), Some("quit"));
        assert_eq!(read_line_from(&mut input).unwrap(), None);
    }

    #[test]
    fn read_errors_are_not_end_of_input() {
        // Invalid UTF-8 fails the read instead of looking like EOF.
        let input = Cursor::new(vec![0xff, 0xfe, b'\n']);
        assert!(read_line_from(input).is_err());
    }

    #[test]
    fn line_endings_are_trimmed() {
        assert_eq!(trim_line_ending("abc\r\n"), "abc");
        assert_eq!(trim_line_ending("abc\n"), "abc");
        assert_eq!(trim_line_ending("abc"), "abc");
    }
}
