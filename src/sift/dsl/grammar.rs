//! Grammar of the sift DSL
//!
//! Top-level rules in resolution order; the parser takes the first rule that
//! matches at its current token. The `any` fallback is last, so unrecognized
//! input still parses and is reported by the correct-syntax validator instead
//! of aborting the parse.

use std::rc::Rc;

use crate::sift::dsl::symbols;
use crate::sift::dsl::tokens::SiftToken;
use crate::sift::parsing::rules::{
    AnyRule, OptionalRule, PairRule, ParsingRule, RepetitionRule, RuleChoiceRule, SequenceRule,
    TokenChoiceRule, TokenRule, TokenSetRule,
};

fn assign() -> Rc<dyn ParsingRule<SiftToken>> {
    Rc::new(TokenRule::new(symbols::ASSIGN, SiftToken::Assign))
}

/// Anything usable on the right of an assignment
fn value() -> Rc<dyn ParsingRule<SiftToken>> {
    Rc::new(TokenChoiceRule::new("value", SiftToken::VALUE_KINDS))
}

/// `FIELD => value`; the field keyword set is shared between metadata
/// blocks and sections
fn assignment() -> Rc<dyn ParsingRule<SiftToken>> {
    Rc::new(SequenceRule::new(
        symbols::ASSIGNMENT,
        vec![
            Rc::new(TokenChoiceRule::new(symbols::FIELD, SiftToken::FIELD_KINDS)),
            assign(),
            value(),
        ],
    ))
}

fn metadata() -> Rc<dyn ParsingRule<SiftToken>> {
    Rc::new(SequenceRule::new(
        symbols::METADATA,
        vec![
            Rc::new(TokenRule::new(symbols::KEYWORD, SiftToken::Metadata)),
            Rc::new(RepetitionRule::new(symbols::FIELDS, vec![assignment()])),
        ],
    ))
}

fn import() -> Rc<dyn ParsingRule<SiftToken>> {
    Rc::new(SequenceRule::new(
        symbols::IMPORT,
        vec![
            Rc::new(TokenRule::new(symbols::KEYWORD, SiftToken::Import)),
            Rc::new(TokenRule::new(symbols::PATH, SiftToken::Quoted)),
        ],
    ))
}

fn variable_declaration() -> Rc<dyn ParsingRule<SiftToken>> {
    Rc::new(SequenceRule::new(
        symbols::VARIABLE_DECLARATION,
        vec![
            Rc::new(TokenRule::new(symbols::KEYWORD, SiftToken::Var)),
            Rc::new(TokenRule::new(symbols::NAME, SiftToken::Identifier)),
            assign(),
            value(),
        ],
    ))
}

/// `MACRO name => tokens`; the body runs as far as the allowed token set
/// carries it
fn macro_definition() -> Rc<dyn ParsingRule<SiftToken>> {
    Rc::new(SequenceRule::new(
        symbols::MACRO_DEFINITION,
        vec![
            Rc::new(TokenRule::new(symbols::KEYWORD, SiftToken::Macro)),
            Rc::new(TokenRule::new(symbols::NAME, SiftToken::Identifier)),
            assign(),
            Rc::new(TokenSetRule::new(
                symbols::BODY,
                vec![
                    (SiftToken::Quoted, "value"),
                    (SiftToken::Number, "value"),
                    (SiftToken::Identifier, "value"),
                    (SiftToken::VariableReference, "value"),
                    (SiftToken::BuildClass, "value"),
                    (SiftToken::Condition, "condition"),
                    (SiftToken::LessEquals, "comparator"),
                    (SiftToken::GreaterEquals, "comparator"),
                    (SiftToken::Less, "comparator"),
                    (SiftToken::Greater, "comparator"),
                    (SiftToken::Equals, "comparator"),
                    (SiftToken::NotEquals, "comparator"),
                    (SiftToken::Plus, "plus"),
                ],
            )),
        ],
    ))
}

fn comparator() -> Rc<dyn ParsingRule<SiftToken>> {
    Rc::new(TokenChoiceRule::new(
        "comparator",
        SiftToken::COMPARATOR_KINDS,
    ))
}

/// One comparison, `CONDITION op value`
fn condition() -> Rc<dyn ParsingRule<SiftToken>> {
    Rc::new(SequenceRule::new(
        symbols::CONDITION,
        vec![
            Rc::new(TokenRule::new(symbols::NAME, SiftToken::Condition)),
            comparator(),
            value(),
        ],
    ))
}

/// One or more conditions joined by `->`
fn condition_chain() -> Rc<dyn ParsingRule<SiftToken>> {
    Rc::new(SequenceRule::new(
        symbols::CONDITION_CHAIN,
        vec![
            condition(),
            Rc::new(RepetitionRule::new(
                "chain_links",
                vec![Rc::new(SequenceRule::new(
                    "chain_link",
                    vec![
                        Rc::new(TokenRule::new("chain", SiftToken::Chain)),
                        condition(),
                    ],
                ))],
            )),
        ],
    ))
}

/// `SECTION_CONDITIONS`/`WHERE` header followed by a condition chain; the
/// assign after the header is optional
fn conditions_block() -> Rc<dyn ParsingRule<SiftToken>> {
    Rc::new(SequenceRule::new(
        symbols::CONDITIONS,
        vec![
            Rc::new(TokenChoiceRule::new(
                symbols::KEYWORD,
                &[SiftToken::SectionConditions, SiftToken::Where],
            )),
            Rc::new(OptionalRule::new(symbols::ASSIGN, assign())),
            condition_chain(),
        ],
    ))
}

/// `# LEVEL` marker scoping the following rule lines to a strictness
fn strictness_marker() -> Rc<dyn ParsingRule<SiftToken>> {
    Rc::new(PairRule::new(
        symbols::STRICTNESS_MARKER,
        Rc::new(TokenRule::new("hash", SiftToken::Hash)),
        Rc::new(TokenRule::new("level", SiftToken::StrictnessLevel)),
    ))
}

/// `+ style` applied on top of the current rule line
fn style_combination() -> Rc<dyn ParsingRule<SiftToken>> {
    Rc::new(SequenceRule::new(
        symbols::STYLE_COMBINATION,
        vec![
            Rc::new(TokenRule::new("plus", SiftToken::Plus)),
            Rc::new(TokenChoiceRule::new(
                "style",
                &[
                    SiftToken::Identifier,
                    SiftToken::VariableReference,
                    SiftToken::Quoted,
                ],
            )),
        ],
    ))
}

fn rules_block() -> Rc<dyn ParsingRule<SiftToken>> {
    let rule_element = Rc::new(RuleChoiceRule::new(
        "rule_element",
        vec![
            condition_chain(),
            style_combination(),
            strictness_marker(),
            Rc::new(TokenRule::new("override", SiftToken::Override)),
            Rc::new(TokenRule::new(
                "value",
                SiftToken::VariableReference,
            )),
        ],
    ));
    Rc::new(SequenceRule::new(
        symbols::RULES,
        vec![
            Rc::new(TokenRule::new(symbols::KEYWORD, SiftToken::Rules)),
            Rc::new(RepetitionRule::new(symbols::BODY, vec![rule_element])),
        ],
    ))
}

fn section() -> Rc<dyn ParsingRule<SiftToken>> {
    let section_element = Rc::new(RuleChoiceRule::new(
        "section_element",
        vec![assignment(), conditions_block(), rules_block()],
    ));
    Rc::new(SequenceRule::new(
        symbols::SECTION,
        vec![
            Rc::new(TokenRule::new(symbols::KEYWORD, SiftToken::Section)),
            Rc::new(RepetitionRule::new(symbols::BODY, vec![section_element])),
        ],
    ))
}

/// The top-level rules, first match wins
pub fn grammar_rules() -> Vec<Rc<dyn ParsingRule<SiftToken>>> {
    vec![
        metadata(),
        import(),
        variable_declaration(),
        macro_definition(),
        section(),
        Rc::new(AnyRule::new(symbols::ANY)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sift::dsl::parse_source;
    use crate::sift::testing::assert_tree;

    #[test]
    fn test_metadata_block_parses_to_field_assignments() {
        let tree = parse_source("METADATA { NAME => \"Filter\" VERSION => 2 }").unwrap();
        assert_tree(&tree).child_count(1).child(0, |metadata| {
            metadata.symbol(symbols::METADATA).child(1, |fields| {
                fields.symbol(symbols::FIELDS).child_count(2).child(
                    0,
                    |assignment| {
                        assignment
                            .symbol(symbols::ASSIGNMENT)
                            .child(0, |field| field.token_value("NAME"))
                            .child(2, |value| value.token_value("Filter"))
                    },
                )
            })
        });
    }

    #[test]
    fn test_import_parses_path() {
        let tree = parse_source("IMPORT \"styles/base.sift\"").unwrap();
        assert_tree(&tree).child(0, |import| {
            import
                .symbol(symbols::IMPORT)
                .child(1, |path| path.symbol(symbols::PATH).token_value("styles/base.sift"))
        });
    }

    #[test]
    fn test_variable_declaration() {
        let tree = parse_source("var chroma => \"60\"").unwrap();
        assert_tree(&tree).child(0, |declaration| {
            declaration
                .symbol(symbols::VARIABLE_DECLARATION)
                .child_count(4)
                .child(1, |name| name.symbol(symbols::NAME).token_value("chroma"))
        });
    }

    #[test]
    fn test_macro_definition_collects_body() {
        let tree = parse_source("MACRO cheap => QUALITY < 5 + dim").unwrap();
        assert_tree(&tree).child(0, |definition| {
            definition
                .symbol(symbols::MACRO_DEFINITION)
                .child(3, |body| body.symbol(symbols::BODY).child_count(5))
        });
    }

    #[test]
    fn test_section_with_conditions_and_rules() {
        let source = "SECTION {\n\
                      NAME => \"Currency\"\n\
                      WHERE => ITEMLEVEL >= 60 -> RARITY == 3\n\
                      RULES { # STRICT QUALITY > 10 + bright !override }\n\
                      }";
        let tree = parse_source(source).unwrap();
        assert_tree(&tree).child(0, |section| {
            section.symbol(symbols::SECTION).child(1, |body| {
                body.child_count(3)
                    .child(0, |assignment| assignment.symbol(symbols::ASSIGNMENT))
                    .child(1, |conditions| {
                        conditions
                            .symbol(symbols::CONDITIONS)
                            .has_child(symbols::CONDITION_CHAIN)
                    })
                    .child(2, |rules| rules.symbol(symbols::RULES))
            })
        });
    }

    #[test]
    fn test_condition_chain_links() {
        let tree =
            parse_source("SECTION { WHERE ITEMLEVEL >= 60 -> QUALITY == 20 }").unwrap();
        assert_tree(&tree).child(0, |section| {
            section.child(1, |body| {
                body.child(0, |conditions| {
                    conditions.child(1, |chain| {
                        chain
                            .symbol(symbols::CONDITION_CHAIN)
                            .child(0, |first| first.symbol(symbols::CONDITION))
                            .child(1, |links| links.symbol("chain_links").child_count(1))
                    })
                })
            })
        });
    }

    #[test]
    fn test_unrecognized_input_falls_back_to_any() {
        let tree = parse_source("=> =>").unwrap();
        assert_tree(&tree)
            .child_count(2)
            .child(0, |any| any.symbol(symbols::ANY))
            .child(1, |any| any.symbol(symbols::ANY));
    }

    #[test]
    fn test_strictness_marker_is_a_pair() {
        use crate::sift::parsing::rules::{PAIR_FIRST_SYMBOL, PAIR_SECOND_SYMBOL};
        let tree = parse_source("SECTION { RULES { # SOFT } }").unwrap();
        assert_tree(&tree).child(0, |section| {
            section.child(1, |body| {
                body.child(0, |rules| {
                    rules.child(1, |rule_body| {
                        rule_body.child(0, |marker| {
                            marker
                                .symbol(symbols::STRICTNESS_MARKER)
                                .child(0, |hash| hash.symbol(PAIR_FIRST_SYMBOL))
                                .child(1, |level| {
                                    level.symbol(PAIR_SECOND_SYMBOL).token_value("SOFT")
                                })
                        })
                    })
                })
            })
        });
    }
}
