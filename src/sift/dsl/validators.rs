//! Validators of the sift DSL
//!
//! Each validator is one self-contained check over the finished parse tree;
//! [default_validators] assembles the pipeline in the order the checks build
//! on each other. Structural checks run first so the later field and
//! variable checks can assume well-formed blocks.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::sift::dsl::keywords;
use crate::sift::dsl::symbols;
use crate::sift::dsl::tokens::SiftToken;
use crate::sift::error::ValidationError;
use crate::sift::parsing::ParseTree;
use crate::sift::transform::{transform, NodeCallback};
use crate::sift::validate::Validator;

/// One declared field inside a block, read off an assignment node
struct DeclaredField {
    kind: SiftToken,
    name: String,
}

/// The assignments directly inside a block's `fields` or `body` container
fn block_assignments(block: &ParseTree<SiftToken>) -> Vec<&ParseTree<SiftToken>> {
    let container = block
        .child(symbols::FIELDS)
        .or_else(|| block.child(symbols::BODY));
    match container {
        Some(container) => container
            .children_named(symbols::ASSIGNMENT)
            .collect(),
        None => Vec::new(),
    }
}

fn declared_fields(block: &ParseTree<SiftToken>) -> Vec<DeclaredField> {
    block_assignments(block)
        .into_iter()
        .filter_map(|assignment| assignment.child(symbols::FIELD))
        .filter_map(|field| field.token.as_ref())
        .map(|token| DeclaredField {
            kind: token.kind,
            name: token.value.clone(),
        })
        .collect()
}

/// Field policy of one block kind: which fields must appear, which may,
/// and whether the required ones must keep their declared order
struct FieldRules {
    required: Vec<(SiftToken, &'static str)>,
    optional: Vec<SiftToken>,
    enforce_order: bool,
}

impl FieldRules {
    fn required_index(&self, kind: SiftToken) -> Option<usize> {
        self.required.iter().position(|(required, _)| *required == kind)
    }

    fn check(&self, block: &ParseTree<SiftToken>) -> Result<(), ValidationError> {
        let fields = declared_fields(block);
        let mut seen = Vec::new();
        let mut last_required = None;
        for field in &fields {
            let required_index = self.required_index(field.kind);
            if required_index.is_none() && !self.optional.contains(&field.kind) {
                return Err(ValidationError::UnknownField {
                    field: field.name.clone(),
                });
            }
            if seen.contains(&field.kind) {
                return Err(ValidationError::DuplicateField {
                    field: field.name.clone(),
                });
            }
            seen.push(field.kind);
            if let Some(index) = required_index {
                if self.enforce_order && matches!(last_required, Some(last) if index < last) {
                    return Err(ValidationError::FieldOutOfOrder {
                        field: field.name.clone(),
                    });
                }
                last_required = Some(index);
            }
        }
        for (kind, name) in &self.required {
            if !seen.contains(kind) {
                return Err(ValidationError::MissingRequiredField {
                    field: (*name).to_string(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Structural validators
// ---------------------------------------------------------------------------

/// The document must open with its metadata block
pub struct FirstBlockValidator;

impl Validator<SiftToken> for FirstBlockValidator {
    fn name(&self) -> &str {
        "first_block"
    }

    fn validate(&self, tree: &ParseTree<SiftToken>) -> Result<(), ValidationError> {
        match tree.children.first() {
            None => Err(ValidationError::EmptyDocument),
            Some(first) if first.symbol != symbols::METADATA => {
                Err(ValidationError::FirstBlockNotMetadata {
                    found: first.symbol.clone(),
                })
            }
            Some(_) => Ok(()),
        }
    }
}

/// No top-level node may carry the fallback symbol; its presence means the
/// grammar recognized nothing at that token
pub struct CorrectSyntaxValidator;

impl Validator<SiftToken> for CorrectSyntaxValidator {
    fn name(&self) -> &str {
        "correct_syntax"
    }

    fn validate(&self, tree: &ParseTree<SiftToken>) -> Result<(), ValidationError> {
        for child in &tree.children {
            if child.symbol == symbols::ANY {
                let token = child
                    .token
                    .as_ref()
                    .map(|token| token.value.clone())
                    .unwrap_or_default();
                return Err(ValidationError::SyntaxFallback { token });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Field validators
// ---------------------------------------------------------------------------

/// NAME, VERSION and STRICTNESS must appear in the metadata block, in that
/// order; BUILD and DESCRIPTION may
pub struct MetadataFieldsValidator {
    rules: FieldRules,
}

impl MetadataFieldsValidator {
    pub fn new() -> Self {
        MetadataFieldsValidator {
            rules: FieldRules {
                required: vec![
                    (SiftToken::Name, "NAME"),
                    (SiftToken::Version, "VERSION"),
                    (SiftToken::Strictness, "STRICTNESS"),
                ],
                optional: vec![SiftToken::Build, SiftToken::Description],
                enforce_order: true,
            },
        }
    }
}

impl Default for MetadataFieldsValidator {
    fn default() -> Self {
        MetadataFieldsValidator::new()
    }
}

impl Validator<SiftToken> for MetadataFieldsValidator {
    fn name(&self) -> &str {
        "metadata_fields"
    }

    fn validate(&self, tree: &ParseTree<SiftToken>) -> Result<(), ValidationError> {
        match tree.child(symbols::METADATA) {
            Some(metadata) => self.rules.check(metadata),
            None => Ok(()),
        }
    }
}

/// Every `STRICTNESS =>` assignment, wherever it appears, must carry one of
/// the named strictness levels
pub struct StrictnessValueValidator;

impl StrictnessValueValidator {
    fn check_assignment(assignment: &ParseTree<SiftToken>) -> Result<(), ValidationError> {
        let field_kind = assignment
            .child(symbols::FIELD)
            .and_then(|field| field.token.as_ref())
            .map(|token| token.kind);
        if field_kind != Some(SiftToken::Strictness) {
            return Ok(());
        }
        let value = match assignment.child("value").and_then(|v| v.token.as_ref()) {
            Some(token) => token,
            None => return Ok(()),
        };
        let named_level = value.kind == SiftToken::StrictnessLevel
            && keywords::STRICTNESS_LEVELS.contains(&value.value.as_str());
        if !named_level {
            return Err(ValidationError::InvalidStrictness {
                value: value.value.clone(),
            });
        }
        Ok(())
    }
}

impl Validator<SiftToken> for StrictnessValueValidator {
    fn name(&self) -> &str {
        "strictness_value"
    }

    fn validate(&self, tree: &ParseTree<SiftToken>) -> Result<(), ValidationError> {
        let mut verdict = Ok(());
        crate::sift::transform::walk(tree, &mut |node| {
            if node.symbol == symbols::ASSIGNMENT && verdict.is_ok() {
                verdict = StrictnessValueValidator::check_assignment(node);
            }
        });
        verdict
    }
}

/// Every section must name itself; DESCRIPTION and STRICTNESS are allowed
/// in any order
pub struct SectionValidator {
    rules: FieldRules,
}

impl SectionValidator {
    pub fn new() -> Self {
        SectionValidator {
            rules: FieldRules {
                required: vec![(SiftToken::Name, "NAME")],
                optional: vec![SiftToken::Description, SiftToken::Strictness],
                enforce_order: false,
            },
        }
    }
}

impl Default for SectionValidator {
    fn default() -> Self {
        SectionValidator::new()
    }
}

impl Validator<SiftToken> for SectionValidator {
    fn name(&self) -> &str {
        "section_fields"
    }

    fn validate(&self, tree: &ParseTree<SiftToken>) -> Result<(), ValidationError> {
        for section in tree.children_named(symbols::SECTION) {
            self.rules.check(section)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Variable validator
// ---------------------------------------------------------------------------

/// Every `$name` reference must resolve to a `var` declaration or a
/// built-in. Declarations are collected in a first pass over the whole tree
/// and references checked in a second, so declaration order in the script
/// does not matter.
pub struct VariableValidator;

impl Validator<SiftToken> for VariableValidator {
    fn name(&self) -> &str {
        "variables"
    }

    fn validate(&self, tree: &ParseTree<SiftToken>) -> Result<(), ValidationError> {
        let declared: Rc<RefCell<HashSet<String>>> = Rc::new(RefCell::new(HashSet::new()));
        let offender: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));

        let collect: NodeCallback<'_, SiftToken> = {
            let declared = Rc::clone(&declared);
            Rc::new(RefCell::new(move |node: &ParseTree<SiftToken>| {
                let name = node
                    .child(symbols::NAME)
                    .and_then(|name| name.token.as_ref());
                if let Some(token) = name {
                    declared.borrow_mut().insert(token.value.clone());
                }
            }))
        };
        let check: NodeCallback<'_, SiftToken> = {
            let declared = Rc::clone(&declared);
            let offender = Rc::clone(&offender);
            Rc::new(RefCell::new(move |node: &ParseTree<SiftToken>| {
                if let Some(token) = node.token.as_ref() {
                    let name = token.value.trim_start_matches('$');
                    let known = declared.borrow().contains(name)
                        || keywords::BUILTIN_VARIABLES.contains(name);
                    if !known && offender.borrow().is_none() {
                        *offender.borrow_mut() = Some(name.to_string());
                    }
                }
            }))
        };

        transform(tree, |node| {
            if node.symbol == symbols::VARIABLE_DECLARATION {
                Some((Rc::clone(&collect), 0))
            } else if matches!(&node.token, Some(token) if token.kind == SiftToken::VariableReference)
            {
                Some((Rc::clone(&check), 1))
            } else {
                None
            }
        });

        let offender = offender.borrow().clone();
        match offender {
            Some(name) => Err(ValidationError::UnknownVariable { name }),
            None => Ok(()),
        }
    }
}

/// The standard pipeline, in dependency order
pub fn default_validators() -> Vec<Box<dyn Validator<SiftToken>>> {
    vec![
        Box::new(FirstBlockValidator),
        Box::new(CorrectSyntaxValidator),
        Box::new(MetadataFieldsValidator::new()),
        Box::new(StrictnessValueValidator),
        Box::new(SectionValidator::new()),
        Box::new(VariableValidator),
    ]
}
