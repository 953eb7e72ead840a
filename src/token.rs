use logos::Logos;

/// Tokens produced while scanning a source file for directives.
///
/// Directive keywords include their opening `(`. The argument and closing `)`
/// are not tokens: the expander reads them straight off the lexer remainder
/// so that a directive can never span a line break.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    // ── Directives ─────────────────────────────────────────────────────
    #[token("@insert(")]
    Insert,
    #[token("@base64(")]
    Base64,

    /// A marker not followed by a known keyword.
    #[token("@")]
    Marker,

    // ── Literal text ───────────────────────────────────────────────────
    #[token("\n")]
    Newline,
    #[regex(r"[^@\n]+")]
    Text,
}

impl Token {
    /// Keyword name for directive tokens, used in diagnostics and logs.
    pub fn directive_name(self) -> Option<&'static str> {
        match self {
            Token::Insert => Some("insert"),
            Token::Base64 => Some("base64"),
            _ => None,
        }
    }
}
