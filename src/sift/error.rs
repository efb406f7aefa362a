//! Error types for the sift front-end
//!
//! One enum per phase (scan, lex, parse, validate) plus a `FrontendError`
//! umbrella for the pipeline entry points. Errors short-circuit the
//! enclosing phase; the first error wins. Nested parsing rules wrap inner
//! errors with the outer rule's symbol to produce a breadcrumb.

use std::fmt;

/// Errors raised by the scanner cursor primitives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// `current`, `peek` or `consume` ran past the end of the rune buffer
    EndOfInput { position: usize },
    /// `pushback` would move the cursor below zero
    CursorUnderflow { position: usize, requested: usize },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::EndOfInput { position } => {
                write!(f, "end of input at offset {}", position)
            }
            ScanError::CursorUnderflow {
                position,
                requested,
            } => {
                write!(
                    f,
                    "cursor underflow: pushback of {} at offset {}",
                    requested, position
                )
            }
        }
    }
}

impl std::error::Error for ScanError {}

/// Errors raised while driving the lexing rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// No lexing rule matched at the current cursor position
    NoMatchingRule { position: usize },
    /// A quoted value ran to end of input without a closing quote
    UnterminatedQuotedValue { position: usize },
    /// A rune inside a quoted value failed the caller's valid-character rule
    InvalidQuotedCharacter { position: usize, found: char },
    /// A rule reported a match but extracted zero runes
    EmptyExtraction { symbol: String },
    /// A scanner primitive failed underneath a rule
    Scan(ScanError),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::NoMatchingRule { position } => {
                write!(f, "no matching rule found at offset {}", position)
            }
            LexError::UnterminatedQuotedValue { position } => {
                write!(f, "unterminated quoted value at offset {}", position)
            }
            LexError::InvalidQuotedCharacter { position, found } => {
                write!(
                    f,
                    "invalid character in quoted value at offset {}: {:?}",
                    position, found
                )
            }
            LexError::EmptyExtraction { symbol } => {
                write!(f, "rule {} matched but extracted no runes", symbol)
            }
            LexError::Scan(err) => write!(f, "scan failed: {}", err),
        }
    }
}

impl std::error::Error for LexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LexError::Scan(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ScanError> for LexError {
    fn from(err: ScanError) -> Self {
        LexError::Scan(err)
    }
}

/// Errors raised by parsing rules and the parser driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No top-level rule matched at the given token index
    NoMatchingRule { index: usize, token: Option<String> },
    /// A rule needed a token but the stream was exhausted
    UnexpectedEnd { symbol: String },
    /// A token did not have the kind a rule required
    UnexpectedToken {
        symbol: String,
        expected: String,
        found: String,
    },
    /// A match-until or token-set rule consumed zero tokens
    NothingConsumed { symbol: String },
    /// None of a choice rule's alternatives matched
    NoAlternative { symbol: String },
    /// A repetition sub-rule succeeded without consuming any tokens
    ZeroConsumption { symbol: String },
    /// Breadcrumb: an inner rule failed inside the named outer rule
    Rule {
        symbol: String,
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// Wrap this error with an outer rule's symbol
    pub fn in_rule(self, symbol: &str) -> ParseError {
        ParseError::Rule {
            symbol: symbol.to_string(),
            source: Box::new(self),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NoMatchingRule { index, token } => match token {
                Some(value) => write!(
                    f,
                    "no matching rule found at token {} ({:?})",
                    index, value
                ),
                None => write!(f, "no matching rule found at token {}", index),
            },
            ParseError::UnexpectedEnd { symbol } => {
                write!(f, "{}: unexpected end of token stream", symbol)
            }
            ParseError::UnexpectedToken {
                symbol,
                expected,
                found,
            } => {
                write!(f, "{}: expected {}, found {}", symbol, expected, found)
            }
            ParseError::NothingConsumed { symbol } => {
                write!(f, "{}: matched zero tokens", symbol)
            }
            ParseError::NoAlternative { symbol } => {
                write!(f, "{}: no alternative matched", symbol)
            }
            ParseError::ZeroConsumption { symbol } => {
                write!(
                    f,
                    "{}: repetition sub-rule succeeded without consuming tokens",
                    symbol
                )
            }
            ParseError::Rule { symbol, source } => {
                write!(f, "{}: {}", symbol, source)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Rule { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Errors raised by the validator pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The document has no top-level blocks at all
    EmptyDocument,
    /// The first top-level block is not the metadata block
    FirstBlockNotMetadata { found: String },
    /// A top-level node carries the any-token fallback symbol
    SyntaxFallback { token: String },
    /// A required metadata field is absent
    MissingRequiredField { field: String },
    /// A metadata field outside the required and optional sets was declared
    UnknownField { field: String },
    /// A metadata field was declared more than once
    DuplicateField { field: String },
    /// Required metadata fields appear out of their declared order
    FieldOutOfOrder { field: String },
    /// The strictness value is not one of the allowed levels
    InvalidStrictness { value: String },
    /// A variable reference has no matching declaration
    UnknownVariable { name: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyDocument => {
                write!(f, "document is empty")
            }
            ValidationError::FirstBlockNotMetadata { found } => {
                write!(f, "first block must be METADATA, found {}", found)
            }
            ValidationError::SyntaxFallback { token } => {
                write!(f, "unrecognized construct near {:?}", token)
            }
            ValidationError::MissingRequiredField { field } => {
                write!(f, "missing required metadata field {}", field)
            }
            ValidationError::UnknownField { field } => {
                write!(f, "unknown metadata field {}", field)
            }
            ValidationError::DuplicateField { field } => {
                write!(f, "duplicate metadata field {}", field)
            }
            ValidationError::FieldOutOfOrder { field } => {
                write!(f, "metadata field {} out of order", field)
            }
            ValidationError::InvalidStrictness { value } => {
                write!(f, "invalid strictness: {}", value)
            }
            ValidationError::UnknownVariable { name } => {
                write!(f, "unknown variable: {}", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Umbrella error for the compile entry points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontendError {
    Lex(LexError),
    Parse(ParseError),
    Validation(ValidationError),
}

impl fmt::Display for FrontendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontendError::Lex(err) => write!(f, "lex error: {}", err),
            FrontendError::Parse(err) => write!(f, "parse error: {}", err),
            FrontendError::Validation(err) => write!(f, "validation error: {}", err),
        }
    }
}

impl std::error::Error for FrontendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrontendError::Lex(err) => Some(err),
            FrontendError::Parse(err) => Some(err),
            FrontendError::Validation(err) => Some(err),
        }
    }
}

impl From<LexError> for FrontendError {
    fn from(err: LexError) -> Self {
        FrontendError::Lex(err)
    }
}

impl From<ParseError> for FrontendError {
    fn from(err: ParseError) -> Self {
        FrontendError::Parse(err)
    }
}

impl From<ValidationError> for FrontendError {
    fn from(err: ValidationError) -> Self {
        FrontendError::Validation(err)
    }
}
