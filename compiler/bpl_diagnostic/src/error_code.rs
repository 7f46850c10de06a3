use std::fmt;

/// Error codes for all interpreter diagnostics.
///
/// Format: E#### where the first digit names the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E6xxx: Runtime errors
/// - E9xxx: Configuration errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Malformed or out-of-range number literal
    E0003,
    /// Dedent to a width matching no enclosing block
    E0004,
    /// Indentation increase without a preceding `:`
    E0005,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Expected an indented block after `:`
    E1003,
    /// Empty block
    E1004,
    /// Invalid assignment target
    E1005,
    /// Parameter name repeated in one function definition
    E1006,

    // Runtime Errors (E6xxx)
    /// Undefined variable
    E6001,
    /// Operand type mismatch
    E6002,
    /// Division or modulo by zero
    E6003,
    /// Wrong number of arguments
    E6004,
    /// Called a value that is not a function
    E6005,
    /// Return outside of a function body
    E6006,
    /// Recursion limit exceeded
    E6007,
    /// Integer overflow
    E6008,

    // Configuration Errors (E9xxx)
    /// Keyword variant table maps one spelling to two keywords
    E9001,
}

impl ErrorCode {
    /// The code as it appears in output (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            // Runtime
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            // Configuration
            ErrorCode::E9001 => "E9001",
        }
    }

    /// Check if this is a lexer error (E0xxx range).
    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a parser error (E1xxx range).
    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a runtime error (E6xxx range).
    pub fn is_runtime_error(&self) -> bool {
        self.as_str().starts_with("E6")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
