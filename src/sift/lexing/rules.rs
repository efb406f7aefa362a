//! Lexing rule objects
//!
//! Each rule is a small matcher over a read-only view of the scanner,
//! answering "do I match here?" and "what token do I emit, spanning how many
//! runes?". Rules never move the cursor; the lexer advances by the reported
//! count. The contract: whenever `is_match` holds, `extract` returns a
//! consumed count of at least one.
//!
//! Boundary and valid-character checks (keyword, quoted, unquoted) probe a
//! shared rule through a single-rune scanner view, so a keyword rule can
//! borrow the identifier rule it must not extend into.

use crate::sift::error::LexError;
use crate::sift::scanner::Scanner;
use crate::sift::token::{Token, TokenKind};
use std::rc::Rc;

/// A token plus the number of runes it spans in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<K: TokenKind> {
    pub token: Token<K>,
    pub consumed: usize,
}

impl<K: TokenKind> Extraction<K> {
    pub fn new(token: Token<K>, consumed: usize) -> Self {
        Extraction { token, consumed }
    }
}

/// A lexical matcher over the scanner view
pub trait LexingRule<K: TokenKind> {
    /// Diagnostic name of this rule
    fn symbol(&self) -> &str;

    /// Does this rule match at the scanner's current position?
    fn is_match(&self, scanner: &Scanner) -> bool;

    /// Emit the token and the rune count spanned. Only called after
    /// `is_match` reported true at the same position.
    fn extract(&self, scanner: &Scanner) -> Result<Extraction<K>, LexError>;
}

/// Probe a rule with a single rune, as if it were the whole input
pub(crate) fn matches_single_rune<K: TokenKind>(rule: &dyn LexingRule<K>, rune: char) -> bool {
    rule.is_match(&Scanner::single(rune))
}

fn literal_matches_at(scanner: &Scanner, literal: &[char]) -> bool {
    literal
        .iter()
        .enumerate()
        .all(|(offset, rune)| scanner.peek_at(offset) == Ok(*rune))
}

// ---------------------------------------------------------------------------
// Single-rune rules
// ---------------------------------------------------------------------------

/// Matches one specific rune
pub struct CharRule<K: TokenKind> {
    symbol: String,
    rune: char,
    kind: K,
}

impl<K: TokenKind> CharRule<K> {
    pub fn new(symbol: &str, rune: char, kind: K) -> Self {
        CharRule {
            symbol: symbol.to_string(),
            rune,
            kind,
        }
    }
}

impl<K: TokenKind> LexingRule<K> for CharRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn is_match(&self, scanner: &Scanner) -> bool {
        scanner.current() == Ok(self.rune)
    }

    fn extract(&self, _scanner: &Scanner) -> Result<Extraction<K>, LexError> {
        Ok(Extraction::new(
            Token::new(self.kind, self.rune.to_string()),
            1,
        ))
    }
}

/// Matches any one rune out of a fixed set
pub struct CharSetRule<K: TokenKind> {
    symbol: String,
    runes: Vec<char>,
    kind: K,
}

impl<K: TokenKind> CharSetRule<K> {
    pub fn new(symbol: &str, runes: &[char], kind: K) -> Self {
        CharSetRule {
            symbol: symbol.to_string(),
            runes: runes.to_vec(),
            kind,
        }
    }
}

impl<K: TokenKind> LexingRule<K> for CharSetRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn is_match(&self, scanner: &Scanner) -> bool {
        matches!(scanner.current(), Ok(rune) if self.runes.contains(&rune))
    }

    fn extract(&self, scanner: &Scanner) -> Result<Extraction<K>, LexError> {
        let rune = scanner.current()?;
        Ok(Extraction::new(Token::new(self.kind, rune.to_string()), 1))
    }
}

/// Matches a single ASCII letter, optionally also an ASCII digit
pub struct AlphanumericRule<K: TokenKind> {
    symbol: String,
    include_digits: bool,
    kind: K,
}

impl<K: TokenKind> AlphanumericRule<K> {
    pub fn new(symbol: &str, include_digits: bool, kind: K) -> Self {
        AlphanumericRule {
            symbol: symbol.to_string(),
            include_digits,
            kind,
        }
    }

    fn accepts(&self, rune: char) -> bool {
        rune.is_ascii_alphabetic() || (self.include_digits && rune.is_ascii_digit())
    }
}

impl<K: TokenKind> LexingRule<K> for AlphanumericRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn is_match(&self, scanner: &Scanner) -> bool {
        matches!(scanner.current(), Ok(rune) if self.accepts(rune))
    }

    fn extract(&self, scanner: &Scanner) -> Result<Extraction<K>, LexError> {
        let rune = scanner.current()?;
        Ok(Extraction::new(Token::new(self.kind, rune.to_string()), 1))
    }
}

// ---------------------------------------------------------------------------
// Run rules
// ---------------------------------------------------------------------------

/// Matches the maximal run of ASCII digits
pub struct NumberRule<K: TokenKind> {
    symbol: String,
    kind: K,
}

impl<K: TokenKind> NumberRule<K> {
    pub fn new(symbol: &str, kind: K) -> Self {
        NumberRule {
            symbol: symbol.to_string(),
            kind,
        }
    }
}

impl<K: TokenKind> LexingRule<K> for NumberRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn is_match(&self, scanner: &Scanner) -> bool {
        matches!(scanner.current(), Ok(rune) if rune.is_ascii_digit())
    }

    fn extract(&self, scanner: &Scanner) -> Result<Extraction<K>, LexError> {
        let mut value = String::new();
        let mut offset = 0;
        while let Ok(rune) = scanner.peek_at(offset) {
            if !rune.is_ascii_digit() {
                break;
            }
            value.push(rune);
            offset += 1;
        }
        Ok(Extraction::new(Token::new(self.kind, value), offset))
    }
}

const WHITESPACE_RUNES: &[char] = &[' ', '\t', '\n', '\r', '\x0c', '\x0b'];

/// Matches the maximal run of whitespace runes
/// (space, tab, newline, carriage return, form feed, vertical tab)
pub struct WhitespaceRule<K: TokenKind> {
    symbol: String,
    kind: K,
}

impl<K: TokenKind> WhitespaceRule<K> {
    pub fn new(symbol: &str, kind: K) -> Self {
        WhitespaceRule {
            symbol: symbol.to_string(),
            kind,
        }
    }
}

impl<K: TokenKind> LexingRule<K> for WhitespaceRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn is_match(&self, scanner: &Scanner) -> bool {
        matches!(scanner.current(), Ok(rune) if WHITESPACE_RUNES.contains(&rune))
    }

    fn extract(&self, scanner: &Scanner) -> Result<Extraction<K>, LexError> {
        let mut value = String::new();
        let mut offset = 0;
        while let Ok(rune) = scanner.peek_at(offset) {
            if !WHITESPACE_RUNES.contains(&rune) {
                break;
            }
            value.push(rune);
            offset += 1;
        }
        Ok(Extraction::new(Token::new(self.kind, value), offset))
    }
}

// ---------------------------------------------------------------------------
// Predicate rule
// ---------------------------------------------------------------------------

/// Matches one rune under a caller-supplied predicate and emits a fixed
/// placeholder value. Typically bound to the caller's ignore kind so the
/// token can be filtered at the parser boundary. Also handy as a pure
/// single-rune probe for quoted/unquoted valid-character checks.
pub struct PredicateRule<K: TokenKind> {
    symbol: String,
    predicate: Box<dyn Fn(char) -> bool>,
    placeholder: String,
    kind: K,
}

impl<K: TokenKind> PredicateRule<K> {
    pub fn new(
        symbol: &str,
        predicate: impl Fn(char) -> bool + 'static,
        placeholder: &str,
        kind: K,
    ) -> Self {
        PredicateRule {
            symbol: symbol.to_string(),
            predicate: Box::new(predicate),
            placeholder: placeholder.to_string(),
            kind,
        }
    }
}

impl<K: TokenKind> LexingRule<K> for PredicateRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn is_match(&self, scanner: &Scanner) -> bool {
        matches!(scanner.current(), Ok(rune) if (self.predicate)(rune))
    }

    fn extract(&self, _scanner: &Scanner) -> Result<Extraction<K>, LexError> {
        Ok(Extraction::new(
            Token::new(self.kind, self.placeholder.clone()),
            1,
        ))
    }
}

// ---------------------------------------------------------------------------
// Alternation
// ---------------------------------------------------------------------------

/// Succeeds if any sub-rule matches; emits the content of the first matching
/// sub-rule but stamps this rule's unified kind onto the token.
pub struct OrRule<K: TokenKind> {
    symbol: String,
    rules: Vec<Box<dyn LexingRule<K>>>,
    kind: K,
}

impl<K: TokenKind> OrRule<K> {
    pub fn new(symbol: &str, rules: Vec<Box<dyn LexingRule<K>>>, kind: K) -> Self {
        OrRule {
            symbol: symbol.to_string(),
            rules,
            kind,
        }
    }
}

impl<K: TokenKind> LexingRule<K> for OrRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn is_match(&self, scanner: &Scanner) -> bool {
        self.rules.iter().any(|rule| rule.is_match(scanner))
    }

    fn extract(&self, scanner: &Scanner) -> Result<Extraction<K>, LexError> {
        let rule = self
            .rules
            .iter()
            .find(|rule| rule.is_match(scanner))
            .ok_or(LexError::NoMatchingRule {
                position: scanner.position(),
            })?;
        let inner = rule.extract(scanner)?;
        Ok(Extraction::new(
            Token::new(self.kind, inner.token.value),
            inner.consumed,
        ))
    }
}

// ---------------------------------------------------------------------------
// Keyword with boundary
// ---------------------------------------------------------------------------

/// Matches a fixed literal, but only when the rune immediately after it does
/// not satisfy the boundary rule. This keeps `if` from matching inside
/// `ifthen`: the boundary rule is the identifier rule the keyword must not
/// extend into. The boundary rule is shared, not owned.
pub struct KeywordRule<K: TokenKind> {
    symbol: String,
    literal: Vec<char>,
    boundary: Rc<dyn LexingRule<K>>,
    kind: K,
}

impl<K: TokenKind> KeywordRule<K> {
    pub fn new(symbol: &str, literal: &str, boundary: Rc<dyn LexingRule<K>>, kind: K) -> Self {
        KeywordRule {
            symbol: symbol.to_string(),
            literal: literal.chars().collect(),
            boundary,
            kind,
        }
    }
}

impl<K: TokenKind> LexingRule<K> for KeywordRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn is_match(&self, scanner: &Scanner) -> bool {
        if !literal_matches_at(scanner, &self.literal) {
            return false;
        }
        match scanner.peek_at(self.literal.len()) {
            Ok(rune) => !matches_single_rune(self.boundary.as_ref(), rune),
            Err(_) => true,
        }
    }

    fn extract(&self, _scanner: &Scanner) -> Result<Extraction<K>, LexError> {
        let value: String = self.literal.iter().collect();
        Ok(Extraction::new(
            Token::new(self.kind, value),
            self.literal.len(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Comment rules
// ---------------------------------------------------------------------------

/// Matches a line comment: a fixed prefix, then everything up to but not
/// including the next `\n` or `\r`. The newline stays in the input.
pub struct LineCommentRule<K: TokenKind> {
    symbol: String,
    prefix: Vec<char>,
    kind: K,
}

impl<K: TokenKind> LineCommentRule<K> {
    pub fn new(symbol: &str, prefix: &str, kind: K) -> Self {
        LineCommentRule {
            symbol: symbol.to_string(),
            prefix: prefix.chars().collect(),
            kind,
        }
    }
}

impl<K: TokenKind> LexingRule<K> for LineCommentRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn is_match(&self, scanner: &Scanner) -> bool {
        literal_matches_at(scanner, &self.prefix)
    }

    fn extract(&self, scanner: &Scanner) -> Result<Extraction<K>, LexError> {
        let mut value: String = self.prefix.iter().collect();
        let mut offset = self.prefix.len();
        while let Ok(rune) = scanner.peek_at(offset) {
            if rune == '\n' || rune == '\r' {
                break;
            }
            value.push(rune);
            offset += 1;
        }
        Ok(Extraction::new(Token::new(self.kind, value), offset))
    }
}

/// Matches delimited content: a start literal through the first subsequent
/// occurrence of the end literal, inclusive. If the end never appears the
/// rule emits everything scanned and stops at end of input.
pub struct DelimitedRule<K: TokenKind> {
    symbol: String,
    start: Vec<char>,
    end: Vec<char>,
    kind: K,
}

impl<K: TokenKind> DelimitedRule<K> {
    pub fn new(symbol: &str, start: &str, end: &str, kind: K) -> Self {
        DelimitedRule {
            symbol: symbol.to_string(),
            start: start.chars().collect(),
            end: end.chars().collect(),
            kind,
        }
    }
}

impl<K: TokenKind> LexingRule<K> for DelimitedRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn is_match(&self, scanner: &Scanner) -> bool {
        literal_matches_at(scanner, &self.start)
    }

    fn extract(&self, scanner: &Scanner) -> Result<Extraction<K>, LexError> {
        let mut runes: Vec<char> = self.start.clone();
        let mut offset = self.start.len();
        loop {
            if runes.len() >= self.start.len() + self.end.len()
                && runes[runes.len() - self.end.len()..] == self.end[..]
            {
                break;
            }
            match scanner.peek_at(offset) {
                Ok(rune) => {
                    runes.push(rune);
                    offset += 1;
                }
                // End delimiter missing: emit what was scanned
                Err(_) => break,
            }
        }
        let value: String = runes.iter().collect();
        Ok(Extraction::new(Token::new(self.kind, value), offset))
    }
}

// ---------------------------------------------------------------------------
// Value rules
// ---------------------------------------------------------------------------

/// Matches a double-quoted value with `\` as a one-rune escape.
///
/// Every ordinary rune must satisfy the caller's valid-character rule;
/// escaped runes are taken literally and skip the check. With
/// `include_quotes` the raw span (quotes and escapes intact) is emitted;
/// without it the inner content is emitted with escapes collapsed.
pub struct QuotedRule<K: TokenKind> {
    symbol: String,
    valid: Rc<dyn LexingRule<K>>,
    include_quotes: bool,
    kind: K,
}

impl<K: TokenKind> QuotedRule<K> {
    pub fn new(symbol: &str, valid: Rc<dyn LexingRule<K>>, include_quotes: bool, kind: K) -> Self {
        QuotedRule {
            symbol: symbol.to_string(),
            valid,
            include_quotes,
            kind,
        }
    }
}

impl<K: TokenKind> LexingRule<K> for QuotedRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn is_match(&self, scanner: &Scanner) -> bool {
        scanner.current() == Ok('"')
    }

    fn extract(&self, scanner: &Scanner) -> Result<Extraction<K>, LexError> {
        let mut raw = String::from('"');
        let mut inner = String::new();
        let mut offset = 1;
        loop {
            let rune = scanner
                .peek_at(offset)
                .map_err(|_| LexError::UnterminatedQuotedValue {
                    position: scanner.position(),
                })?;
            match rune {
                '"' => {
                    raw.push('"');
                    offset += 1;
                    break;
                }
                '\\' => {
                    let escaped = scanner.peek_at(offset + 1).map_err(|_| {
                        LexError::UnterminatedQuotedValue {
                            position: scanner.position(),
                        }
                    })?;
                    raw.push('\\');
                    raw.push(escaped);
                    inner.push(escaped);
                    offset += 2;
                }
                other => {
                    if !matches_single_rune(self.valid.as_ref(), other) {
                        return Err(LexError::InvalidQuotedCharacter {
                            position: scanner.position() + offset,
                            found: other,
                        });
                    }
                    raw.push(other);
                    inner.push(other);
                    offset += 1;
                }
            }
        }
        let value = if self.include_quotes { raw } else { inner };
        Ok(Extraction::new(Token::new(self.kind, value), offset))
    }
}

/// Matches the maximal run of runes satisfying a valid-character rule,
/// optionally requiring a distinct rule for the first rune.
pub struct UnquotedRule<K: TokenKind> {
    symbol: String,
    valid: Rc<dyn LexingRule<K>>,
    first: Option<Rc<dyn LexingRule<K>>>,
    kind: K,
}

impl<K: TokenKind> UnquotedRule<K> {
    pub fn new(symbol: &str, valid: Rc<dyn LexingRule<K>>, kind: K) -> Self {
        UnquotedRule {
            symbol: symbol.to_string(),
            valid,
            first: None,
            kind,
        }
    }

    /// Require the first rune to satisfy a different rule
    pub fn with_first(mut self, first: Rc<dyn LexingRule<K>>) -> Self {
        self.first = Some(first);
        self
    }
}

impl<K: TokenKind> LexingRule<K> for UnquotedRule<K> {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn is_match(&self, scanner: &Scanner) -> bool {
        let opening = self.first.as_ref().unwrap_or(&self.valid);
        matches!(scanner.current(), Ok(rune) if matches_single_rune(opening.as_ref(), rune))
    }

    fn extract(&self, scanner: &Scanner) -> Result<Extraction<K>, LexError> {
        let mut value = String::from(scanner.current()?);
        let mut offset = 1;
        while let Ok(rune) = scanner.peek_at(offset) {
            if !matches_single_rune(self.valid.as_ref(), rune) {
                break;
            }
            value.push(rune);
            offset += 1;
        }
        Ok(Extraction::new(Token::new(self.kind, value), offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Keyword,
        Identifier,
        Number,
        Whitespace,
        Comment,
        Quoted,
        Ignore,
    }

    fn ident_rule() -> Rc<dyn LexingRule<Kind>> {
        // Letters, digits, '.', '_'
        Rc::new(PredicateRule::new(
            "identifier_char",
            |c: char| c.is_ascii_alphanumeric() || c == '.' || c == '_',
            "?",
            Kind::Ignore,
        ))
    }

    fn extract_at<R: LexingRule<Kind>>(rule: &R, source: &str) -> Extraction<Kind> {
        let scanner = Scanner::new(source);
        assert!(rule.is_match(&scanner), "rule should match {:?}", source);
        rule.extract(&scanner).unwrap()
    }

    #[test]
    fn test_char_rule() {
        let rule = CharRule::new("plus", '+', Kind::Keyword);
        let extraction = extract_at(&rule, "+1");
        assert_eq!(extraction.token.value, "+");
        assert_eq!(extraction.consumed, 1);
        assert!(!rule.is_match(&Scanner::new("1+")));
    }

    #[test]
    fn test_char_set_rule() {
        let rule = CharSetRule::new("bracket", &['{', '}'], Kind::Ignore);
        assert_eq!(extract_at(&rule, "}x").token.value, "}");
        assert!(!rule.is_match(&Scanner::new("x")));
    }

    #[test]
    fn test_alphanumeric_rule_digit_flag() {
        let with_digits = AlphanumericRule::new("alnum", true, Kind::Identifier);
        let letters_only = AlphanumericRule::new("alpha", false, Kind::Identifier);
        assert!(with_digits.is_match(&Scanner::new("7")));
        assert!(!letters_only.is_match(&Scanner::new("7")));
        assert!(letters_only.is_match(&Scanner::new("a")));
    }

    #[test]
    fn test_number_rule_maximal_run() {
        let rule = NumberRule::new("number", Kind::Number);
        let extraction = extract_at(&rule, "1234x");
        assert_eq!(extraction.token.value, "1234");
        assert_eq!(extraction.consumed, 4);
    }

    #[test]
    fn test_whitespace_rule_maximal_run() {
        let rule = WhitespaceRule::new("whitespace", Kind::Whitespace);
        let extraction = extract_at(&rule, " \t\r\nx");
        assert_eq!(extraction.token.value, " \t\r\n");
        assert_eq!(extraction.consumed, 4);
    }

    #[test]
    fn test_predicate_rule_placeholder() {
        let rule = PredicateRule::new("brace", |c| c == '{', "<ignored>", Kind::Ignore);
        let extraction = extract_at(&rule, "{x");
        assert_eq!(extraction.token.value, "<ignored>");
        assert_eq!(extraction.consumed, 1);
    }

    #[test]
    fn test_or_rule_stamps_unified_kind() {
        let rule = OrRule::new(
            "marker",
            vec![
                Box::new(CharRule::new("dash", '-', Kind::Identifier)),
                Box::new(NumberRule::new("number", Kind::Number)),
            ],
            Kind::Keyword,
        );
        let extraction = extract_at(&rule, "42x");
        assert_eq!(extraction.token.kind, Kind::Keyword);
        assert_eq!(extraction.token.value, "42");
        assert_eq!(extraction.consumed, 2);
    }

    #[test]
    fn test_keyword_rule_boundary() {
        let rule = KeywordRule::new("if", "if", ident_rule(), Kind::Keyword);
        // Boundary rune extends the keyword into an identifier: no match
        assert!(!rule.is_match(&Scanner::new("ifthen")));
        // Whitespace boundary: match
        assert!(rule.is_match(&Scanner::new("if then")));
        // End of input (synthetic newline) boundary: match
        let extraction = extract_at(&rule, "if");
        assert_eq!(extraction.token.value, "if");
        assert_eq!(extraction.consumed, 2);
    }

    #[test]
    fn test_line_comment_leaves_newline() {
        let rule = LineCommentRule::new("line_comment", "!!", Kind::Comment);
        let extraction = extract_at(&rule, "!! trailing\nrest");
        assert_eq!(extraction.token.value, "!! trailing");
        assert_eq!(extraction.consumed, 11);
    }

    #[test]
    fn test_delimited_rule_inclusive() {
        let rule = DelimitedRule::new("block_comment", "!![", "]!!", Kind::Comment);
        let extraction = extract_at(&rule, "!![alpha\nbeta]!!gamma");
        assert_eq!(extraction.token.value, "!![alpha\nbeta]!!");
        assert_eq!(extraction.consumed, 16);
    }

    #[test]
    fn test_delimited_rule_missing_end() {
        let rule = DelimitedRule::new("block_comment", "!![", "]!!", Kind::Comment);
        let extraction = extract_at(&rule, "!![never closed");
        // Everything scanned, including the synthetic trailing newline
        assert_eq!(extraction.token.value, "!![never closed\n");
        assert_eq!(extraction.consumed, 16);
    }

    fn quoted_valid() -> Rc<dyn LexingRule<Kind>> {
        Rc::new(PredicateRule::new(
            "quoted_char",
            |c: char| c != '\n' && c != '\r',
            "?",
            Kind::Ignore,
        ))
    }

    #[test]
    fn test_quoted_rule_strip_quotes_unescapes() {
        let rule = QuotedRule::new("quoted", quoted_valid(), false, Kind::Quoted);
        let extraction = extract_at(&rule, r#""a\"b""#);
        assert_eq!(extraction.token.value, "a\"b");
        assert_eq!(extraction.consumed, 6);
    }

    #[test]
    fn test_quoted_rule_include_quotes_keeps_raw_span() {
        let rule = QuotedRule::new("quoted", quoted_valid(), true, Kind::Quoted);
        let extraction = extract_at(&rule, r#""a\"b""#);
        assert_eq!(extraction.token.value, r#""a\"b""#);
        assert_eq!(extraction.consumed, 6);
    }

    #[test]
    fn test_quoted_rule_unterminated() {
        let rule = QuotedRule::new("quoted", quoted_valid(), false, Kind::Quoted);
        let scanner = Scanner::new("\"abc\n");
        // The newline fails the valid-character rule before end of input
        let err = rule.extract(&scanner).unwrap_err();
        assert!(matches!(err, LexError::InvalidQuotedCharacter { .. }));

        let strict: Rc<dyn LexingRule<Kind>> = Rc::new(PredicateRule::new(
            "any_char",
            |_| true,
            "?",
            Kind::Ignore,
        ));
        let rule = QuotedRule::new("quoted", strict, false, Kind::Quoted);
        let err = rule.extract(&Scanner::new("\"abc")).unwrap_err();
        assert!(matches!(err, LexError::UnterminatedQuotedValue { .. }));
    }

    #[test]
    fn test_unquoted_rule_maximal_run() {
        let rule = UnquotedRule::new("identifier", ident_rule(), Kind::Identifier);
        let extraction = extract_at(&rule, "foo.bar_1 rest");
        assert_eq!(extraction.token.value, "foo.bar_1");
        assert_eq!(extraction.consumed, 9);
    }

    #[test]
    fn test_unquoted_rule_distinct_first_rune() {
        let dollar: Rc<dyn LexingRule<Kind>> =
            Rc::new(CharRule::new("dollar", '$', Kind::Ignore));
        let rule =
            UnquotedRule::new("variable", ident_rule(), Kind::Identifier).with_first(dollar);
        assert!(!rule.is_match(&Scanner::new("foo")));
        let extraction = extract_at(&rule, "$foo+");
        assert_eq!(extraction.token.value, "$foo");
        assert_eq!(extraction.consumed, 4);
    }
}
