/// Errors that can occur while interpreting a chemical structure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChemError {
    /// Structure string was empty
    #[error("Empty structure")]
    EmptyInput,

    /// Character that is not valid at this position
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedChar {
        /// Offending character
        ch: char,
        /// Zero-based character offset
        position: usize,
    },

    /// Element symbol not present in the element table
    #[error("Unknown element symbol: {0}")]
    UnknownElement(String),

    /// Isotope label without a tabulated mass
    #[error("Unknown isotope: {mass_number}{symbol}")]
    UnknownIsotope {
        /// Element symbol
        symbol: String,
        /// Mass number written in the structure
        mass_number: u16,
    },

    /// Branch or group parenthesis without its partner
    #[error("Unbalanced parenthesis at position {0}")]
    UnbalancedParenthesis(usize),

    /// Ring-closure digit opened but never closed
    #[error("Unclosed ring bond {0}")]
    UnclosedRing(u32),

    /// Wildcard atom, which has no defined mass
    #[error("Wildcard atom at position {0} has no defined mass")]
    WildcardAtom(usize),

    /// Bracket atom that could not be parsed
    #[error("Malformed bracket atom at position {0}")]
    InvalidBracketAtom(usize),

    /// Organic-subset atom with more bonds than any allowed valence
    #[error("Valence exceeded for {symbol} at position {position} (bond order sum {bond_order})")]
    ValenceExceeded {
        /// Element symbol
        symbol: String,
        /// Zero-based character offset of the atom
        position: usize,
        /// Sum of bond orders on the atom
        bond_order: u32,
    },

    /// Digit run too large for an atom count, multiplier, isotope or H count
    #[error("Number at position {0} is out of range")]
    NumberOutOfRange(usize),

    /// Accumulated atom count or charge no longer fits its integer type
    #[error("Count overflow for {0}")]
    CountOverflow(String),

    /// Charge suffix that could not be parsed
    #[error("Invalid charge specification: {0}")]
    InvalidCharge(String),
}
