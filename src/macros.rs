//! Utility macros for the checker.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//!
//! Mostly used when building syntax trees by hand, e.g. in tests.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$lexeme` - The token's source text
/// * `$line`, `$column` - The 1-based source position (both default to 0)
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntVal, "42", 3, 12);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $lexeme:expr, $line:expr, $column:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            lexeme: String::from($lexeme),
            line: $line,
            column: $column,
        }
    };
    ($kind:expr, $lexeme:expr) => {
        $crate::MK_TOKEN!($kind, $lexeme, 0, 0)
    };
}
