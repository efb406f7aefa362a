//! The sift DSL binding
//!
//! Instantiates the generic substrate with the concrete lexical rules,
//! grammar and validators of the sift filter language, and exposes the
//! compile entry points drivers call. The filter-emission back-end consumes
//! the parse tree these functions produce; it is not part of this crate.

pub mod grammar;
pub mod keywords;
pub mod lexical;
pub mod tokens;
pub mod validators;

use crate::sift::error::{FrontendError, LexError};
use crate::sift::lexing::Lexer;
use crate::sift::parsing::{ParseTree, Parser};
use crate::sift::scanner::Scanner;
use crate::sift::token::Token;
use crate::sift::validate;

pub use tokens::SiftToken;

/// Symbols the sift grammar stamps onto parse-tree nodes
pub mod symbols {
    pub const METADATA: &str = "metadata";
    pub const SECTION: &str = "section";
    pub const IMPORT: &str = "import";
    pub const VARIABLE_DECLARATION: &str = "variable_declaration";
    pub const MACRO_DEFINITION: &str = "macro_definition";
    /// The fallback symbol; its presence means unrecognized input
    pub const ANY: &str = "any";

    pub const KEYWORD: &str = "keyword";
    pub const ASSIGNMENT: &str = "assignment";
    pub const FIELD: &str = "field";
    pub const ASSIGN: &str = "assign";
    pub const FIELDS: &str = "fields";
    pub const BODY: &str = "body";
    pub const NAME: &str = "name";
    pub const PATH: &str = "path";
    pub const CONDITIONS: &str = "conditions";
    pub const CONDITION: &str = "condition";
    pub const CONDITION_CHAIN: &str = "condition_chain";
    pub const RULES: &str = "rules";
    pub const STRICTNESS_MARKER: &str = "strictness_marker";
    pub const STYLE_COMBINATION: &str = "style_combination";
}

/// A lexer over the sift lexical ruleset
pub fn lexer_for(source: &str) -> Lexer<SiftToken> {
    Lexer::new(Scanner::new(source), lexical::lexical_ruleset())
}

/// A parser over the sift grammar, filtering the [SiftToken::Ignore] kind
pub fn parser_for(source: &str) -> Parser<SiftToken> {
    Parser::new(lexer_for(source), grammar::grammar_rules(), SiftToken::Ignore)
}

/// Tokenize a sift script, ignored kinds included
pub fn lex_source(source: &str) -> Result<Vec<Token<SiftToken>>, LexError> {
    lexer_for(source).get_tokens()
}

/// Parse a sift script to its parse tree
pub fn parse_source(source: &str) -> Result<ParseTree<SiftToken>, FrontendError> {
    parser_for(source).parse()
}

/// Parse and validate a sift script: the full front-end pipeline
pub fn compile_source(source: &str) -> Result<ParseTree<SiftToken>, FrontendError> {
    let tree = parse_source(source)?;
    validate::run_pipeline(&tree, &validators::default_validators())?;
    Ok(tree)
}
