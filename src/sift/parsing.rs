//! Parsing: the parse tree and the parser driver
//!
//! The parser owns the lexer, an ordered list of top-level parsing rules and
//! the caller's ignore kind. Parsing is a tiny Mealy machine driven by a
//! tail loop, never recursion:
//!
//! 1. Start state: terminate when the token index reaches the end, else find
//!    the first top-level rule whose match succeeds and move to it.
//! 2. Rule-processing state: append the matched tree (if any) to the root,
//!    advance by the consumed count, return to Start.
//!
//! Top-level resolution is first-match-wins over insertion order. If no rule
//! matches at a position the parse fails with `no matching rule found`.

pub mod rules;

use crate::sift::error::{FrontendError, ParseError};
use crate::sift::lexing::Lexer;
use crate::sift::token::{Token, TokenKind};
use rules::{ParsingRule, RuleMatch};
use std::rc::Rc;

/// The symbol of the root node every parse produces
pub const ROOT_SYMBOL: &str = "root";

/// An ordered tree of symbol-labeled nodes.
///
/// A leaf carries a token and no children; an interior node carries children
/// and typically no token. Each node exclusively owns its children; there is
/// no sharing and there are no back-pointers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree<K: TokenKind> {
    pub symbol: String,
    pub token: Option<Token<K>>,
    pub children: Vec<ParseTree<K>>,
}

impl<K: TokenKind> ParseTree<K> {
    /// Create a leaf node carrying a token
    pub fn leaf(symbol: &str, token: Token<K>) -> Self {
        ParseTree {
            symbol: symbol.to_string(),
            token: Some(token),
            children: Vec::new(),
        }
    }

    /// Create an interior node with the given children
    pub fn node(symbol: &str, children: Vec<ParseTree<K>>) -> Self {
        ParseTree {
            symbol: symbol.to_string(),
            token: None,
            children,
        }
    }

    /// True for nodes without children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// First child with the given symbol, if any
    pub fn child(&self, symbol: &str) -> Option<&ParseTree<K>> {
        self.children.iter().find(|child| child.symbol == symbol)
    }

    /// All children with the given symbol, in order
    pub fn children_named<'a>(
        &'a self,
        symbol: &'a str,
    ) -> impl Iterator<Item = &'a ParseTree<K>> {
        self.children
            .iter()
            .filter(move |child| child.symbol == symbol)
    }

    /// Number of token-bearing leaves in this subtree
    pub fn token_count(&self) -> usize {
        let own = usize::from(self.token.is_some());
        own + self
            .children
            .iter()
            .map(ParseTree::token_count)
            .sum::<usize>()
    }
}

/// Driver states of the parse loop
enum DriverState<K: TokenKind> {
    Start,
    Process(RuleMatch<K>),
}

/// The parser: lexer, ordered top-level rules, ignore kind
pub struct Parser<K: TokenKind> {
    lexer: Lexer<K>,
    rules: Vec<Rc<dyn ParsingRule<K>>>,
    ignore: K,
}

impl<K: TokenKind> Parser<K> {
    pub fn new(lexer: Lexer<K>, rules: Vec<Rc<dyn ParsingRule<K>>>, ignore: K) -> Self {
        Parser {
            lexer,
            rules,
            ignore,
        }
    }

    /// Lex the input, drop ignore-kind tokens and drive the rule machine to
    /// a single-rooted parse tree.
    pub fn parse(&mut self) -> Result<ParseTree<K>, FrontendError> {
        self.lexer.reset();
        let tokens: Vec<Token<K>> = self
            .lexer
            .get_tokens()?
            .into_iter()
            .filter(|token| !token.is_kind(self.ignore))
            .collect();

        let mut root = ParseTree::node(ROOT_SYMBOL, Vec::new());
        let mut index = 0;
        let mut state = DriverState::Start;

        loop {
            state = match state {
                DriverState::Start => {
                    if index >= tokens.len() {
                        break;
                    }
                    let matched = self
                        .rules
                        .iter()
                        .find_map(|rule| rule.apply(&tokens, index).ok());
                    match matched {
                        Some(result) => DriverState::Process(result),
                        None => {
                            return Err(ParseError::NoMatchingRule {
                                index,
                                token: tokens.get(index).map(|t| t.value.clone()),
                            }
                            .into());
                        }
                    }
                }
                DriverState::Process(result) => {
                    if result.consumed == 0 && result.tree.is_none() {
                        // A zero-width success at the top level cannot make
                        // progress; surface it instead of looping forever.
                        return Err(ParseError::ZeroConsumption {
                            symbol: ROOT_SYMBOL.to_string(),
                        }
                        .into());
                    }
                    index += result.consumed;
                    if let Some(tree) = result.tree {
                        root.children.push(tree);
                    }
                    DriverState::Start
                }
            };
        }

        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::rules::{AnyRule, SequenceRule, TokenRule};
    use super::*;
    use crate::sift::lexing::rules::{CharRule, LexingRule, NumberRule, WhitespaceRule};
    use crate::sift::scanner::Scanner;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Number,
        Plus,
        Ignore,
    }

    fn sum_parser(source: &str) -> Parser<Kind> {
        let lex_rules: Vec<Box<dyn LexingRule<Kind>>> = vec![
            Box::new(NumberRule::new("number", Kind::Number)),
            Box::new(CharRule::new("plus", '+', Kind::Plus)),
            Box::new(WhitespaceRule::new("whitespace", Kind::Ignore)),
        ];
        let lexer = Lexer::new(Scanner::new(source), lex_rules);

        let addition: Rc<dyn ParsingRule<Kind>> = Rc::new(SequenceRule::new(
            "addition",
            vec![
                Rc::new(TokenRule::new("left", Kind::Number)),
                Rc::new(TokenRule::new("operator", Kind::Plus)),
                Rc::new(TokenRule::new("right", Kind::Number)),
            ],
        ));
        let lone: Rc<dyn ParsingRule<Kind>> = Rc::new(TokenRule::new("number", Kind::Number));
        Parser::new(lexer, vec![addition, lone], Kind::Ignore)
    }

    #[test]
    fn test_parse_builds_single_rooted_tree() {
        let mut parser = sum_parser("1 + 2 3");
        let tree = parser.parse().unwrap();
        assert_eq!(tree.symbol, ROOT_SYMBOL);
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].symbol, "addition");
        assert_eq!(tree.children[0].children.len(), 3);
        assert_eq!(tree.children[1].symbol, "number");
    }

    #[test]
    fn test_ignore_kind_filtered_before_matching() {
        let mut parser = sum_parser("   1+2   ");
        let tree = parser.parse().unwrap();
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.token_count(), 3);
    }

    #[test]
    fn test_first_match_wins_over_insertion_order() {
        // "1" alone matches the lone-number rule only after addition fails
        let mut parser = sum_parser("1");
        let tree = parser.parse().unwrap();
        assert_eq!(tree.children[0].symbol, "number");
    }

    #[test]
    fn test_no_matching_rule_reports_token() {
        let mut parser = sum_parser("+ 1");
        let err = parser.parse().unwrap_err();
        assert_eq!(
            err,
            FrontendError::Parse(ParseError::NoMatchingRule {
                index: 0,
                token: Some("+".to_string()),
            })
        );
    }

    #[test]
    fn test_empty_input_yields_bare_root() {
        let mut parser = sum_parser("");
        let tree = parser.parse().unwrap();
        assert!(tree.children.is_empty());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let mut parser = sum_parser("1+2 3 4+5");
        let first = parser.parse().unwrap();
        let second = parser.parse().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_any_fallback_consumes_everything() {
        let lex_rules: Vec<Box<dyn LexingRule<Kind>>> = vec![
            Box::new(NumberRule::new("number", Kind::Number)),
            Box::new(CharRule::new("plus", '+', Kind::Plus)),
            Box::new(WhitespaceRule::new("whitespace", Kind::Ignore)),
        ];
        let lexer = Lexer::new(Scanner::new("+ + 1"), lex_rules);
        let any: Rc<dyn ParsingRule<Kind>> = Rc::new(AnyRule::new("any"));
        let mut parser = Parser::new(lexer, vec![any], Kind::Ignore);
        let tree = parser.parse().unwrap();
        assert_eq!(tree.children.len(), 3);
        assert!(tree.children.iter().all(|c| c.symbol == "any"));
    }
}
