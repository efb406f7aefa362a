//! Validation tests over complete scripts
//!
//! Runs the default pipeline through `compile_source` and checks the exact
//! diagnostic each malformed script earns.

use rstest::rstest;
use sift::sift::dsl::compile_source;
use sift::sift::error::FrontendError;

fn compile_message(source: &str) -> String {
    match compile_source(source).unwrap_err() {
        FrontendError::Validation(error) => error.to_string(),
        other => panic!("expected a validation error, got {}", other),
    }
}

const VALID_SCRIPT: &str = "METADATA {\n\
                            NAME => \"Filter\"\n\
                            VERSION => 1\n\
                            STRICTNESS => STRICT\n\
                            }";

#[test]
fn test_valid_script_passes_the_pipeline() {
    assert!(compile_source(VALID_SCRIPT).is_ok());
}

#[test]
fn test_missing_strictness_field() {
    let message = compile_message("METADATA { NAME => \"F\" VERSION => 1 }");
    assert_eq!(message, "missing required metadata field STRICTNESS");
}

#[test]
fn test_invalid_strictness_value() {
    let message =
        compile_message("METADATA { NAME => \"F\" VERSION => 1 STRICTNESS => MEDIUM }");
    assert_eq!(message, "invalid strictness: MEDIUM");
}

#[test]
fn test_valid_strictness_value_passes() {
    let source = "METADATA { NAME => \"F\" VERSION => 1 STRICTNESS => STRICT }";
    assert!(compile_source(source).is_ok());
}

#[test]
fn test_unknown_variable_reference() {
    let source = "METADATA { NAME => \"F\" VERSION => 1 STRICTNESS => STRICT }\n\
                  var foo => \"1\"\n\
                  SECTION { NAME => \"S\" RULES { + $bar } }";
    assert_eq!(compile_message(source), "unknown variable: bar");
}

#[test]
fn test_declared_variable_reference_passes() {
    let source = "METADATA { NAME => \"F\" VERSION => 1 STRICTNESS => STRICT }\n\
                  var foo => \"1\"\n\
                  SECTION { NAME => \"S\" RULES { + $foo } }";
    assert!(compile_source(source).is_ok());
}

#[rstest]
#[case::all("ALL")]
#[case::soft("SOFT")]
#[case::strict("STRICT")]
#[case::semi_strict("SEMI-STRICT")]
#[case::super_strict("SUPER-STRICT")]
fn test_every_named_strictness_level_passes(#[case] level: &str) {
    let source = format!(
        "METADATA {{ NAME => \"F\" VERSION => 1 STRICTNESS => {} }}",
        level
    );
    assert!(compile_source(&source).is_ok(), "level {} must pass", level);
}

#[rstest]
#[case::empty_document("", "document is empty")]
#[case::section_first(
    "SECTION { NAME => \"S\" }",
    "first block must be METADATA, found section"
)]
#[case::duplicate_name(
    "METADATA { NAME => \"F\" NAME => \"G\" VERSION => 1 STRICTNESS => STRICT }",
    "duplicate metadata field NAME"
)]
#[case::out_of_order(
    "METADATA { VERSION => 1 NAME => \"F\" STRICTNESS => STRICT }",
    "metadata field NAME out of order"
)]
fn test_malformed_scripts(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(compile_message(source), expected);
}

#[test]
fn test_unrecognized_construct_is_reported() {
    let message = compile_message("METADATA { NAME => \"F\" VERSION => 1 STRICTNESS => STRICT }\n=>");
    assert_eq!(message, "unrecognized construct near \"=>\"");
}

#[test]
fn test_section_without_name_fails() {
    let source = "METADATA { NAME => \"F\" VERSION => 1 STRICTNESS => STRICT }\n\
                  SECTION { DESCRIPTION => \"spare\" }";
    assert_eq!(compile_message(source), "missing required metadata field NAME");
}

/// Adding a compliant declaration never flips a valid script to failure
#[test]
fn test_validators_are_monotone_under_additions() {
    let base = "METADATA { NAME => \"F\" VERSION => 1 STRICTNESS => STRICT }";
    assert!(compile_source(base).is_ok());

    let additions = [
        "\nIMPORT \"base.sift\"",
        "\nvar radius => 3",
        "\nSECTION { NAME => \"S\" }",
        "\nMACRO cheap => QUALITY < 5",
    ];
    let mut script = base.to_string();
    for addition in additions {
        script.push_str(addition);
        assert!(
            compile_source(&script).is_ok(),
            "script stopped compiling after adding {:?}",
            addition
        );
    }

    // Removing the required STRICTNESS declaration flips it back to failure
    let without = script.replace("STRICTNESS => STRICT ", "");
    assert!(compile_source(&without).is_err());
}
