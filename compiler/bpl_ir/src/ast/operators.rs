//! Binary and unary operators.

/// Binary operators, grouped by precedence level (lowest first).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Logical (short-circuit)
    Or,
    And,

    // Equality
    Eq,
    NotEq,

    // Relational
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Additive
    Add,
    Sub,

    // Multiplicative
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    /// Source-level spelling, used in error messages.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Or => "বা",
            Self::And => "এবং",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }

    /// True for the operators whose right operand is evaluated conditionally.
    pub const fn is_short_circuit(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// Arithmetic negation `-x`.
    Neg,
    /// Logical `না x`.
    Not,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "না",
        }
    }
}
