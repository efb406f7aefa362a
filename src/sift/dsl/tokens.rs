//! Token kinds of the sift DSL
//!
//! Condition names, build-class names and strictness levels each collapse to
//! one unified kind at the lexer (via the alternation rule); the token value
//! preserves which concrete word matched. See [super::keywords] for the word
//! tables.

/// All token kinds the sift lexer produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiftToken {
    // Block keywords
    Metadata,
    Section,
    SectionConditions,
    Where,
    Rules,
    Import,
    Var,
    Macro,
    Override,

    // Metadata field keywords
    Name,
    Version,
    Strictness,
    Build,
    Description,

    // Unified keyword groups
    StrictnessLevel,
    Condition,
    BuildClass,

    // Operators
    Assign,
    Chain,
    LessEquals,
    GreaterEquals,
    Less,
    Greater,
    Equals,
    NotEquals,
    Plus,
    Hash,

    // Values
    Quoted,
    Identifier,
    VariableReference,
    Number,

    // Whitespace, comments and brackets; dropped at the parser boundary
    Ignore,
}

impl SiftToken {
    /// Kinds that can appear as a metadata or section field name
    pub const FIELD_KINDS: &'static [SiftToken] = &[
        SiftToken::Name,
        SiftToken::Version,
        SiftToken::Strictness,
        SiftToken::Build,
        SiftToken::Description,
    ];

    /// Kinds usable as comparison operators in conditions
    pub const COMPARATOR_KINDS: &'static [SiftToken] = &[
        SiftToken::LessEquals,
        SiftToken::GreaterEquals,
        SiftToken::Less,
        SiftToken::Greater,
        SiftToken::Equals,
        SiftToken::NotEquals,
    ];

    /// Kinds usable as a bare value on the right of an assignment
    pub const VALUE_KINDS: &'static [SiftToken] = &[
        SiftToken::Quoted,
        SiftToken::Number,
        SiftToken::StrictnessLevel,
        SiftToken::BuildClass,
        SiftToken::VariableReference,
        SiftToken::Identifier,
    ];
}
