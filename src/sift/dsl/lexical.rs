//! Lexical rules of the sift DSL
//!
//! One ordered ruleset; the lexer tries rules top to bottom at every
//! position, so ordering encodes priority:
//!
//! 1. Whitespace, comments and brackets, folded into one `Ignore` rule
//! 2. Multi-rune operators, before their single-rune prefixes
//! 3. Single-rune operators
//! 4. Keywords, boundary-checked so they never split an identifier
//! 5. Unified keyword groups (strictness levels, conditions, build classes)
//! 6. Variable references, quoted strings, numbers, identifiers

use std::rc::Rc;

use crate::sift::dsl::keywords;
use crate::sift::dsl::tokens::SiftToken;
use crate::sift::lexing::rules::{
    AlphanumericRule, CharRule, CharSetRule, DelimitedRule, KeywordRule, LexingRule,
    LineCommentRule, NumberRule, OrRule, PredicateRule, QuotedRule, UnquotedRule, WhitespaceRule,
};

/// Runes an identifier may contain past its first
fn identifier_rune() -> Rc<dyn LexingRule<SiftToken>> {
    Rc::new(OrRule::new(
        "identifier_rune",
        vec![
            Box::new(AlphanumericRule::new(
                "letter_or_digit",
                true,
                SiftToken::Ignore,
            )),
            Box::new(CharSetRule::new(
                "dot_or_underscore",
                &['.', '_'],
                SiftToken::Ignore,
            )),
        ],
        SiftToken::Ignore,
    ))
}

/// Runes an identifier may start with
fn identifier_first_rune() -> Rc<dyn LexingRule<SiftToken>> {
    Rc::new(OrRule::new(
        "identifier_first_rune",
        vec![
            Box::new(AlphanumericRule::new("letter", false, SiftToken::Ignore)),
            Box::new(CharSetRule::new("underscore", &['_'], SiftToken::Ignore)),
        ],
        SiftToken::Ignore,
    ))
}

/// Runes that can extend an operator; `<` must not match inside `<=`
fn operator_rune() -> Rc<dyn LexingRule<SiftToken>> {
    Rc::new(CharSetRule::new(
        "operator_rune",
        &['=', '>', '<', '!'],
        SiftToken::Ignore,
    ))
}

fn keyword(
    symbol: &str,
    literal: &str,
    boundary: &Rc<dyn LexingRule<SiftToken>>,
    kind: SiftToken,
) -> Box<dyn LexingRule<SiftToken>> {
    Box::new(KeywordRule::new(symbol, literal, Rc::clone(boundary), kind))
}

/// An alternation of boundary-checked keywords sharing one token kind,
/// longest word first
fn keyword_group(
    symbol: &str,
    words: &[&'static str],
    boundary: &Rc<dyn LexingRule<SiftToken>>,
    kind: SiftToken,
) -> Box<dyn LexingRule<SiftToken>> {
    let rules = keywords::by_descending_length(words)
        .into_iter()
        .map(|word| keyword(symbol, word, boundary, kind))
        .collect();
    Box::new(OrRule::new(symbol, rules, kind))
}

/// The full lexical ruleset of the sift DSL, in resolution order
pub fn lexical_ruleset() -> Vec<Box<dyn LexingRule<SiftToken>>> {
    let identifier = identifier_rune();
    let operator = operator_rune();

    vec![
        // Whitespace, comments and the structural brackets all collapse to
        // Ignore; the block comment must be tried before the line comment
        // because both start with `!!`.
        Box::new(OrRule::new(
            "ignored",
            vec![
                Box::new(DelimitedRule::new(
                    "block_comment",
                    "!![",
                    "]!!",
                    SiftToken::Ignore,
                )),
                Box::new(LineCommentRule::new(
                    "line_comment",
                    "!!",
                    SiftToken::Ignore,
                )),
                Box::new(WhitespaceRule::new("whitespace", SiftToken::Ignore)),
                Box::new(CharSetRule::new(
                    "bracket",
                    &['{', '}', '[', ']', '(', ')'],
                    SiftToken::Ignore,
                )),
            ],
            SiftToken::Ignore,
        )),
        // Multi-rune operators; the boundary keeps `<` out of `<=`
        keyword("assign", "=>", &operator, SiftToken::Assign),
        keyword("chain", "->", &operator, SiftToken::Chain),
        keyword("less_equals", "<=", &operator, SiftToken::LessEquals),
        keyword("greater_equals", ">=", &operator, SiftToken::GreaterEquals),
        keyword("equals", "==", &operator, SiftToken::Equals),
        keyword("not_equals", "!=", &operator, SiftToken::NotEquals),
        // Single-rune operators
        Box::new(CharRule::new("less", '<', SiftToken::Less)),
        Box::new(CharRule::new("greater", '>', SiftToken::Greater)),
        Box::new(CharRule::new("plus", '+', SiftToken::Plus)),
        Box::new(CharRule::new("hash", '#', SiftToken::Hash)),
        // Keywords, longest first so no entry shadows a longer one
        keyword("override", "!override", &identifier, SiftToken::Override),
        keyword(
            "section_conditions",
            "SECTION_CONDITIONS",
            &identifier,
            SiftToken::SectionConditions,
        ),
        keyword(
            "description",
            "DESCRIPTION",
            &identifier,
            SiftToken::Description,
        ),
        keyword(
            "strictness",
            "STRICTNESS",
            &identifier,
            SiftToken::Strictness,
        ),
        keyword("metadata", "METADATA", &identifier, SiftToken::Metadata),
        keyword("section", "SECTION", &identifier, SiftToken::Section),
        keyword("version", "VERSION", &identifier, SiftToken::Version),
        keyword("import", "IMPORT", &identifier, SiftToken::Import),
        keyword("macro", "MACRO", &identifier, SiftToken::Macro),
        keyword("where", "WHERE", &identifier, SiftToken::Where),
        keyword("rules", "RULES", &identifier, SiftToken::Rules),
        keyword("build", "BUILD", &identifier, SiftToken::Build),
        keyword("name", "NAME", &identifier, SiftToken::Name),
        keyword("var", "var", &identifier, SiftToken::Var),
        // Unified keyword groups
        keyword_group(
            "strictness_level",
            keywords::STRICTNESS_LEVELS,
            &identifier,
            SiftToken::StrictnessLevel,
        ),
        keyword_group(
            "condition",
            keywords::CONDITIONS,
            &identifier,
            SiftToken::Condition,
        ),
        keyword_group(
            "build_class",
            keywords::BUILD_CLASSES,
            &identifier,
            SiftToken::BuildClass,
        ),
        // `$`-prefixed variable reference; the `$` stays in the value
        Box::new(
            UnquotedRule::new(
                "variable_reference",
                Rc::clone(&identifier),
                SiftToken::VariableReference,
            )
            .with_first(Rc::new(CharRule::new(
                "dollar",
                '$',
                SiftToken::VariableReference,
            ))),
        ),
        // Quoted strings, quotes stripped; any rune but a line break
        Box::new(QuotedRule::new(
            "quoted",
            Rc::new(PredicateRule::new(
                "quoted_rune",
                |rune: char| rune != '\n' && rune != '\r',
                "?",
                SiftToken::Ignore,
            )),
            false,
            SiftToken::Quoted,
        )),
        Box::new(NumberRule::new("number", SiftToken::Number)),
        Box::new(
            UnquotedRule::new("identifier", identifier, SiftToken::Identifier)
                .with_first(identifier_first_rune()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sift::dsl::lex_source;
    use crate::sift::token::Token;

    fn significant(source: &str) -> Vec<Token<SiftToken>> {
        lex_source(source)
            .unwrap()
            .into_iter()
            .filter(|token| !token.is_kind(SiftToken::Ignore))
            .collect()
    }

    fn kinds(source: &str) -> Vec<SiftToken> {
        significant(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_operators_lex_longest_first() {
        assert_eq!(
            kinds("=> -> <= >= == != < >"),
            vec![
                SiftToken::Assign,
                SiftToken::Chain,
                SiftToken::LessEquals,
                SiftToken::GreaterEquals,
                SiftToken::Equals,
                SiftToken::NotEquals,
                SiftToken::Less,
                SiftToken::Greater,
            ]
        );
    }

    #[test]
    fn test_comparator_binds_to_following_number() {
        let tokens = significant("ITEMLEVEL >= 60");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, SiftToken::Condition);
        assert_eq!(tokens[1].kind, SiftToken::GreaterEquals);
        assert_eq!(tokens[2].value, "60");
    }

    #[test]
    fn test_keyword_requires_boundary() {
        // A keyword embedded in a longer word is an identifier
        assert_eq!(kinds("SECTIONS"), vec![SiftToken::Identifier]);
        assert_eq!(kinds("SECTION"), vec![SiftToken::Section]);
        assert_eq!(
            kinds("SECTION_CONDITIONS"),
            vec![SiftToken::SectionConditions]
        );
    }

    #[test]
    fn test_strictness_levels_unify() {
        let tokens = significant("ALL SOFT SEMI-STRICT STRICT SUPER-STRICT");
        assert_eq!(tokens.len(), 5);
        for token in &tokens {
            assert_eq!(token.kind, SiftToken::StrictnessLevel);
        }
        assert_eq!(tokens[2].value, "SEMI-STRICT");
        assert_eq!(tokens[4].value, "SUPER-STRICT");
    }

    #[test]
    fn test_variable_reference_keeps_sigil() {
        let tokens = significant("$chromatic_size");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SiftToken::VariableReference);
        assert_eq!(tokens[0].value, "$chromatic_size");
    }

    #[test]
    fn test_quoted_value_is_stripped() {
        let tokens = significant("NAME => \"My Filter\"");
        assert_eq!(tokens[2].kind, SiftToken::Quoted);
        assert_eq!(tokens[2].value, "My Filter");
    }

    #[test]
    fn test_comments_and_brackets_lex_to_ignore() {
        let tokens = lex_source("!! note\n{ } !![ box ]!!").unwrap();
        for token in &tokens {
            assert!(token.is_kind(SiftToken::Ignore), "got {:?}", token);
        }
    }

    #[test]
    fn test_override_keyword() {
        assert_eq!(kinds("!override"), vec![SiftToken::Override]);
    }

    #[test]
    fn test_build_class_table() {
        let tokens = significant("BODY-ARMOUR");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SiftToken::BuildClass);
        assert_eq!(tokens[0].value, "BODY-ARMOUR");
    }
}
