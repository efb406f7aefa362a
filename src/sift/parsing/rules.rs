//! Parsing rule combinators
//!
//! Every rule matches against the (ignore-filtered) token slice at an index
//! and reports a tree plus a consumed count. On failure a rule returns an
//! error and the caller treats its consumption as zero. Only `OptionalRule`
//! may succeed without a tree; consumers must tolerate that shape.
//!
//! Composite rules wrap a failing child's error with their own symbol, so a
//! deep failure surfaces as a breadcrumb of rule names.

use crate::sift::error::ParseError;
use crate::sift::parsing::ParseTree;
use crate::sift::token::{Token, TokenKind};
use std::rc::Rc;

/// Child symbols assigned by [PairRule]
pub const PAIR_FIRST_SYMBOL: &str = "first_element";
pub const PAIR_SECOND_SYMBOL: &str = "second_element";

/// The outcome of a successful rule application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<K: TokenKind> {
    pub tree: Option<ParseTree<K>>,
    pub consumed: usize,
}

impl<K: TokenKind> RuleMatch<K> {
    pub fn tree(tree: ParseTree<K>, consumed: usize) -> Self {
        RuleMatch {
            tree: Some(tree),
            consumed,
        }
    }

    pub fn empty() -> Self {
        RuleMatch {
            tree: None,
            consumed: 0,
        }
    }
}

/// A grammatical matcher over the token stream
pub trait ParsingRule<K: TokenKind> {
    /// The symbol stamped onto trees this rule produces
    fn symbol(&self) -> &str;

    /// Match at `index`; on success the consumed count equals the number of
    /// tokens spanned by the returned tree.
    fn apply(&self, tokens: &[Token<K>], index: usize) -> Result<RuleMatch<K>, ParseError>;
}

fn token_at<'a, K: TokenKind>(
    tokens: &'a [Token<K>],
    index: usize,
    symbol: &str,
) -> Result<&'a Token<K>, ParseError> {
    tokens.get(index).ok_or_else(|| ParseError::UnexpectedEnd {
        symbol: symbol.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Leaf rules
// ---------------------------------------------------------------------------

/// Matches exactly one token of a fixed kind
pub struct TokenRule<K: TokenKind> {
    symbol: String,
    kind: K,
}

impl<K: TokenKind> TokenRule<K> {
    pub fn new(symbol: &str, kind: K) -> Self {
        TokenRule {
            symbol: symbol.to_string(),
            kind,
        }
    }
}

impl<K: TokenKind> ParsingRule<K> for TokenRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn apply(&self, tokens: &[Token<K>], index: usize) -> Result<RuleMatch<K>, ParseError> {
        let token = token_at(tokens, index, &self.symbol)?;
        if !token.is_kind(self.kind) {
            return Err(ParseError::UnexpectedToken {
                symbol: self.symbol.clone(),
                expected: format!("{:?}", self.kind),
                found: format!("{:?}", token.kind),
            });
        }
        Ok(RuleMatch::tree(
            ParseTree::leaf(&self.symbol, token.clone()),
            1,
        ))
    }
}

/// Matches one token whose kind is in a fixed set
pub struct TokenChoiceRule<K: TokenKind> {
    symbol: String,
    kinds: Vec<K>,
}

impl<K: TokenKind> TokenChoiceRule<K> {
    pub fn new(symbol: &str, kinds: &[K]) -> Self {
        TokenChoiceRule {
            symbol: symbol.to_string(),
            kinds: kinds.to_vec(),
        }
    }
}

impl<K: TokenKind> ParsingRule<K> for TokenChoiceRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn apply(&self, tokens: &[Token<K>], index: usize) -> Result<RuleMatch<K>, ParseError> {
        let token = token_at(tokens, index, &self.symbol)?;
        if !token.is_any_kind(&self.kinds) {
            return Err(ParseError::UnexpectedToken {
                symbol: self.symbol.clone(),
                expected: format!("one of {:?}", self.kinds),
                found: format!("{:?}", token.kind),
            });
        }
        Ok(RuleMatch::tree(
            ParseTree::leaf(&self.symbol, token.clone()),
            1,
        ))
    }
}

/// Matches one token of any kind except the given one
pub struct ExceptRule<K: TokenKind> {
    symbol: String,
    kind: K,
}

impl<K: TokenKind> ExceptRule<K> {
    pub fn new(symbol: &str, kind: K) -> Self {
        ExceptRule {
            symbol: symbol.to_string(),
            kind,
        }
    }
}

impl<K: TokenKind> ParsingRule<K> for ExceptRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn apply(&self, tokens: &[Token<K>], index: usize) -> Result<RuleMatch<K>, ParseError> {
        let token = token_at(tokens, index, &self.symbol)?;
        if token.is_kind(self.kind) {
            return Err(ParseError::UnexpectedToken {
                symbol: self.symbol.clone(),
                expected: format!("anything but {:?}", self.kind),
                found: format!("{:?}", token.kind),
            });
        }
        Ok(RuleMatch::tree(
            ParseTree::leaf(&self.symbol, token.clone()),
            1,
        ))
    }
}

/// Matches any single token. Used as the grammar's fallback rule; the
/// correct-syntax validator reports trees carrying this rule's symbol.
pub struct AnyRule {
    symbol: String,
}

impl AnyRule {
    pub fn new(symbol: &str) -> Self {
        AnyRule {
            symbol: symbol.to_string(),
        }
    }
}

impl<K: TokenKind> ParsingRule<K> for AnyRule {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn apply(&self, tokens: &[Token<K>], index: usize) -> Result<RuleMatch<K>, ParseError> {
        let token = token_at(tokens, index, &self.symbol)?;
        Ok(RuleMatch::tree(
            ParseTree::leaf(&self.symbol, token.clone()),
            1,
        ))
    }
}

// ---------------------------------------------------------------------------
// Flat multi-token rules
// ---------------------------------------------------------------------------

/// Matches a fixed-length vector of token kinds, one leaf child per token
pub struct TokenSequenceRule<K: TokenKind> {
    symbol: String,
    expected: Vec<(K, String)>,
}

impl<K: TokenKind> TokenSequenceRule<K> {
    /// `expected` pairs each required kind with the child symbol its leaf
    /// will carry.
    pub fn new(symbol: &str, expected: Vec<(K, &str)>) -> Self {
        TokenSequenceRule {
            symbol: symbol.to_string(),
            expected: expected
                .into_iter()
                .map(|(kind, child)| (kind, child.to_string()))
                .collect(),
        }
    }
}

impl<K: TokenKind> ParsingRule<K> for TokenSequenceRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn apply(&self, tokens: &[Token<K>], index: usize) -> Result<RuleMatch<K>, ParseError> {
        let mut children = Vec::with_capacity(self.expected.len());
        for (offset, (kind, child_symbol)) in self.expected.iter().enumerate() {
            let token = token_at(tokens, index + offset, &self.symbol)?;
            if token.kind != *kind {
                return Err(ParseError::UnexpectedToken {
                    symbol: self.symbol.clone(),
                    expected: format!("{:?}", kind),
                    found: format!("{:?}", token.kind),
                });
            }
            children.push(ParseTree::leaf(child_symbol, token.clone()));
        }
        let consumed = self.expected.len();
        Ok(RuleMatch::tree(
            ParseTree::node(&self.symbol, children),
            consumed,
        ))
    }
}

/// Consumes tokens until one of the terminator kind is encountered (the
/// terminator itself is left in the stream). Fails if zero tokens were
/// consumed before the terminator.
pub struct UntilRule<K: TokenKind> {
    symbol: String,
    terminator: K,
    child_symbol: String,
}

impl<K: TokenKind> UntilRule<K> {
    pub fn new(symbol: &str, terminator: K, child_symbol: &str) -> Self {
        UntilRule {
            symbol: symbol.to_string(),
            terminator,
            child_symbol: child_symbol.to_string(),
        }
    }
}

impl<K: TokenKind> ParsingRule<K> for UntilRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn apply(&self, tokens: &[Token<K>], index: usize) -> Result<RuleMatch<K>, ParseError> {
        let mut children = Vec::new();
        let mut cursor = index;
        while let Some(token) = tokens.get(cursor) {
            if token.kind == self.terminator {
                break;
            }
            children.push(ParseTree::leaf(&self.child_symbol, token.clone()));
            cursor += 1;
        }
        if children.is_empty() {
            return Err(ParseError::NothingConsumed {
                symbol: self.symbol.clone(),
            });
        }
        let consumed = children.len();
        Ok(RuleMatch::tree(
            ParseTree::node(&self.symbol, children),
            consumed,
        ))
    }
}

/// Consumes tokens while their kind is in an allowed set, mapping each kind
/// to its own child symbol. Fails if zero tokens were consumed.
pub struct TokenSetRule<K: TokenKind> {
    symbol: String,
    allowed: Vec<(K, String)>,
}

impl<K: TokenKind> TokenSetRule<K> {
    pub fn new(symbol: &str, allowed: Vec<(K, &str)>) -> Self {
        TokenSetRule {
            symbol: symbol.to_string(),
            allowed: allowed
                .into_iter()
                .map(|(kind, child)| (kind, child.to_string()))
                .collect(),
        }
    }

    fn child_symbol(&self, kind: K) -> Option<&str> {
        self.allowed
            .iter()
            .find(|(allowed, _)| *allowed == kind)
            .map(|(_, symbol)| symbol.as_str())
    }
}

impl<K: TokenKind> ParsingRule<K> for TokenSetRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn apply(&self, tokens: &[Token<K>], index: usize) -> Result<RuleMatch<K>, ParseError> {
        let mut children = Vec::new();
        let mut cursor = index;
        while let Some(token) = tokens.get(cursor) {
            match self.child_symbol(token.kind) {
                Some(child_symbol) => {
                    children.push(ParseTree::leaf(child_symbol, token.clone()));
                    cursor += 1;
                }
                None => break,
            }
        }
        if children.is_empty() {
            return Err(ParseError::NothingConsumed {
                symbol: self.symbol.clone(),
            });
        }
        let consumed = children.len();
        Ok(RuleMatch::tree(
            ParseTree::node(&self.symbol, children),
            consumed,
        ))
    }
}

// ---------------------------------------------------------------------------
// Combinators over sub-rules
// ---------------------------------------------------------------------------

/// Tries sub-rules in order and returns the first success
pub struct RuleChoiceRule<K: TokenKind> {
    symbol: String,
    rules: Vec<Rc<dyn ParsingRule<K>>>,
}

impl<K: TokenKind> RuleChoiceRule<K> {
    pub fn new(symbol: &str, rules: Vec<Rc<dyn ParsingRule<K>>>) -> Self {
        RuleChoiceRule {
            symbol: symbol.to_string(),
            rules,
        }
    }
}

impl<K: TokenKind> ParsingRule<K> for RuleChoiceRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn apply(&self, tokens: &[Token<K>], index: usize) -> Result<RuleMatch<K>, ParseError> {
        for rule in &self.rules {
            if let Ok(result) = rule.apply(tokens, index) {
                return Ok(result);
            }
        }
        Err(ParseError::NoAlternative {
            symbol: self.symbol.clone(),
        })
    }
}

/// Runs child rules in order at the current index; the children's trees
/// become this rule's children and consumption is their sum. A failing
/// child fails the whole sequence, wrapped with this rule's symbol.
pub struct SequenceRule<K: TokenKind> {
    symbol: String,
    rules: Vec<Rc<dyn ParsingRule<K>>>,
}

impl<K: TokenKind> SequenceRule<K> {
    pub fn new(symbol: &str, rules: Vec<Rc<dyn ParsingRule<K>>>) -> Self {
        SequenceRule {
            symbol: symbol.to_string(),
            rules,
        }
    }
}

impl<K: TokenKind> ParsingRule<K> for SequenceRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn apply(&self, tokens: &[Token<K>], index: usize) -> Result<RuleMatch<K>, ParseError> {
        let mut children = Vec::new();
        let mut consumed = 0;
        for rule in &self.rules {
            let result = rule
                .apply(tokens, index + consumed)
                .map_err(|err| err.in_rule(&self.symbol))?;
            consumed += result.consumed;
            if let Some(tree) = result.tree {
                children.push(tree);
            }
        }
        Ok(RuleMatch::tree(
            ParseTree::node(&self.symbol, children),
            consumed,
        ))
    }
}

/// Runs a child rule; child failure is success without a tree. A child
/// success is wrapped as a single-child interior node carrying this rule's
/// symbol.
pub struct OptionalRule<K: TokenKind> {
    symbol: String,
    rule: Rc<dyn ParsingRule<K>>,
}

impl<K: TokenKind> OptionalRule<K> {
    pub fn new(symbol: &str, rule: Rc<dyn ParsingRule<K>>) -> Self {
        OptionalRule {
            symbol: symbol.to_string(),
            rule,
        }
    }
}

impl<K: TokenKind> ParsingRule<K> for OptionalRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn apply(&self, tokens: &[Token<K>], index: usize) -> Result<RuleMatch<K>, ParseError> {
        match self.rule.apply(tokens, index) {
            Ok(result) => match result.tree {
                Some(tree) => Ok(RuleMatch::tree(
                    ParseTree::node(&self.symbol, vec![tree]),
                    result.consumed,
                )),
                None => Ok(RuleMatch {
                    tree: None,
                    consumed: result.consumed,
                }),
            },
            Err(_) => Ok(RuleMatch::empty()),
        }
    }
}

/// Runs two sub-rules in sequence and renames their trees to
/// `first_element` and `second_element`
pub struct PairRule<K: TokenKind> {
    symbol: String,
    first: Rc<dyn ParsingRule<K>>,
    second: Rc<dyn ParsingRule<K>>,
}

impl<K: TokenKind> PairRule<K> {
    pub fn new(symbol: &str, first: Rc<dyn ParsingRule<K>>, second: Rc<dyn ParsingRule<K>>) -> Self {
        PairRule {
            symbol: symbol.to_string(),
            first,
            second,
        }
    }
}

impl<K: TokenKind> ParsingRule<K> for PairRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn apply(&self, tokens: &[Token<K>], index: usize) -> Result<RuleMatch<K>, ParseError> {
        let first = self
            .first
            .apply(tokens, index)
            .map_err(|err| err.in_rule(&self.symbol))?;
        let second = self
            .second
            .apply(tokens, index + first.consumed)
            .map_err(|err| err.in_rule(&self.symbol))?;

        let mut children = Vec::new();
        if let Some(mut tree) = first.tree {
            tree.symbol = PAIR_FIRST_SYMBOL.to_string();
            children.push(tree);
        }
        if let Some(mut tree) = second.tree {
            tree.symbol = PAIR_SECOND_SYMBOL.to_string();
            children.push(tree);
        }
        Ok(RuleMatch::tree(
            ParseTree::node(&self.symbol, children),
            first.consumed + second.consumed,
        ))
    }
}

/// Repeatedly attempts a set of sub-rules; each iteration takes the first
/// one that succeeds while consuming at least one token, and the loop stops
/// when none do. Always succeeds, possibly with no children.
///
/// A sub-rule that succeeds without consuming anything would loop forever,
/// so that shape is rejected with an error naming the offending rule.
pub struct RepetitionRule<K: TokenKind> {
    symbol: String,
    rules: Vec<Rc<dyn ParsingRule<K>>>,
}

impl<K: TokenKind> RepetitionRule<K> {
    pub fn new(symbol: &str, rules: Vec<Rc<dyn ParsingRule<K>>>) -> Self {
        RepetitionRule {
            symbol: symbol.to_string(),
            rules,
        }
    }
}

impl<K: TokenKind> ParsingRule<K> for RepetitionRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn apply(&self, tokens: &[Token<K>], index: usize) -> Result<RuleMatch<K>, ParseError> {
        let mut children = Vec::new();
        let mut consumed = 0;
        'iterations: loop {
            for rule in &self.rules {
                let result = match rule.apply(tokens, index + consumed) {
                    Ok(result) => result,
                    Err(_) => continue,
                };
                if result.consumed == 0 {
                    return Err(ParseError::ZeroConsumption {
                        symbol: rule.symbol().to_string(),
                    }
                    .in_rule(&self.symbol));
                }
                consumed += result.consumed;
                if let Some(tree) = result.tree {
                    children.push(tree);
                }
                continue 'iterations;
            }
            break;
        }
        Ok(RuleMatch::tree(
            ParseTree::node(&self.symbol, children),
            consumed,
        ))
    }
}
