#![allow(clippy::module_inception)]

use std::fmt::Write;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod type_checker;

pub use type_checker::type_checker::type_check;

/// 1-based line and column of a token in the checked source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// Returns the text of the 1-based `line` in `source`, without its line terminator.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split_inclusive('\n')
        .nth(line as usize - 1)
        .map(|text| text.trim_end_matches(['\n', '\r']))
}


/// Renders a diagnostic together with the offending source line.
///
/// ```text
/// Error: TypeMatchError (Expected type `int`, received `double`)
/// -> final.lang:20:9
///    |
/// 20 | int a = 2.0
///    | ----^
/// ```
pub fn render_error(error: &Error, file_name: &str, source: &str) -> String {
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }

    let Some(position) = error.get_position() else {
        let _ = writeln!(out, "-> {}", file_name);
        return out;
    };
    let _ = writeln!(out, "-> {}:{}:{}", file_name, position.line, position.column);

    let Some(line_text) = get_line_at_position(source, position.line) else {
        return out;
    };

    let line_str = position.line.to_string();
    let padding = line_str.len() + 2;

    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    let _ = writeln!(out, "{} | {}", line_str, line_text_removed.trim_end());

    let line_pos = (position.column as usize).saturating_sub(1);
    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");
    out
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);
    (trimmed, string.len() - trimmed.len())
}
