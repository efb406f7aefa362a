//! Word tables of the sift DSL
//!
//! The lexer matches each table as one alternation of boundary-checked
//! keyword rules, longest word first so that prefixes never shadow longer
//! entries. Validators reuse the tables when checking values.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Accepted values of the STRICTNESS metadata field
pub const STRICTNESS_LEVELS: &[&str] = &["SUPER-STRICT", "SEMI-STRICT", "STRICT", "SOFT", "ALL"];

/// Condition names usable on the left of a comparison
pub const CONDITIONS: &[&str] = &[
    "CLASS",
    "BASETYPE",
    "RARITY",
    "ITEMLEVEL",
    "DROPLEVEL",
    "AREALEVEL",
    "QUALITY",
    "SOCKETS",
    "LINKS",
    "STACKSIZE",
    "MAPTIER",
    "GEMLEVEL",
    "CORRUPTED",
    "IDENTIFIED",
    "INFLUENCE",
    "HEIGHT",
    "WIDTH",
];

/// Build-class names accepted as the BUILD metadata value
pub const BUILD_CLASSES: &[&str] = &[
    "BOW",
    "CLAW",
    "DAGGER",
    "WAND",
    "SWORD",
    "AXE",
    "MACE",
    "STAFF",
    "SCEPTRE",
    "SHIELD",
    "QUIVER",
    "HELMET",
    "BODY-ARMOUR",
    "GLOVES",
    "BOOTS",
    "BELT",
    "AMULET",
    "RING",
    "JEWEL",
    "FLASK",
    "GEM",
    "MAP",
    "CURRENCY",
];

/// Variable names the compiler itself provides; references to these never
/// require a `var` declaration
pub static BUILTIN_VARIABLES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["buildclass", "strictness", "version"]));

/// `words` sorted longest first, for alternations of boundary-checked
/// keyword rules
pub fn by_descending_length(words: &[&'static str]) -> Vec<&'static str> {
    let mut sorted = words.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    sorted
}
