//! Canonical spellings used across the front-end.
//!
//! One `&'static str` per identifier the pipeline treats specially, so the
//! lexer's keyword table, the extended parser's callback rules, and the
//! symbol-use scanner all compare against the same constants. The
//! well-known subset is also pre-registered in the global string registry
//! with the stable IDs below.

use crate::registry::GlobalStringId;

// ---------------------------------------------------------------------------
// Language keywords
// ---------------------------------------------------------------------------

pub const STR_IF: &str = "if";
pub const STR_ELSE: &str = "else";
pub const STR_DO: &str = "do";
pub const STR_WHILE: &str = "while";
pub const STR_FOR: &str = "for";
pub const STR_IN: &str = "in";
pub const STR_NEXT: &str = "next";
pub const STR_BREAK: &str = "break";
pub const STR_RETURN: &str = "return";

// ---------------------------------------------------------------------------
// Language constants
// ---------------------------------------------------------------------------

pub const STR_T: &str = "T";
pub const STR_F: &str = "F";
pub const STR_NULL: &str = "NULL";
pub const STR_PI: &str = "PI";
pub const STR_E: &str = "E";
pub const STR_INF: &str = "INF";
pub const STR_NAN: &str = "NAN";

// ---------------------------------------------------------------------------
// Wildcard triggers - identifiers that defeat the symbol-use analysis
// ---------------------------------------------------------------------------

pub const STR_EXECUTE_LAMBDA: &str = "executeLambda";
pub const STR_LS: &str = "ls";
pub const STR_RM: &str = "rm";

// ---------------------------------------------------------------------------
// Block kinds and callback declarations
// ---------------------------------------------------------------------------

pub const STR_EVENT: &str = "event";
pub const STR_INITIALIZE: &str = "initialize";
pub const STR_FITNESS: &str = "fitness";
pub const STR_MATE_CHOICE: &str = "mateChoice";
pub const STR_MODIFY_CHILD: &str = "modifyChild";

// ---------------------------------------------------------------------------
// Simulator globals and callback parameters
// ---------------------------------------------------------------------------

pub const STR_SIM: &str = "sim";
pub const STR_SELF: &str = "self";

pub const STR_MUT: &str = "mut";
pub const STR_REL_FITNESS: &str = "relFitness";
pub const STR_GENOME1: &str = "genome1";
pub const STR_GENOME2: &str = "genome2";
pub const STR_SUBPOP: &str = "subpop";
pub const STR_HOMOZYGOUS: &str = "homozygous";
pub const STR_SOURCE_SUBPOP: &str = "sourceSubpop";
pub const STR_WEIGHTS: &str = "weights";
pub const STR_CHILD_GENOME1: &str = "childGenome1";
pub const STR_CHILD_GENOME2: &str = "childGenome2";
pub const STR_CHILD_IS_FEMALE: &str = "childIsFemale";
pub const STR_PARENT1_GENOME1: &str = "parent1Genome1";
pub const STR_PARENT1_GENOME2: &str = "parent1Genome2";
pub const STR_PARENT2_GENOME1: &str = "parent2Genome1";
pub const STR_PARENT2_GENOME2: &str = "parent2Genome2";
pub const STR_IS_CLONING: &str = "isCloning";
pub const STR_IS_SELFING: &str = "isSelfing";

// ---------------------------------------------------------------------------
// Script-block property names
// ---------------------------------------------------------------------------

pub const STR_ID: &str = "id";
pub const STR_START: &str = "start";
pub const STR_END: &str = "end";
pub const STR_TYPE: &str = "type";
pub const STR_SOURCE: &str = "source";
pub const STR_ACTIVE: &str = "active";
pub const STR_TAG: &str = "tag";

// ---------------------------------------------------------------------------
// Stable registry IDs for the well-known subset
// ---------------------------------------------------------------------------

/// Sentinel for "no registered string".
pub const ID_NONE: GlobalStringId = 0;

pub const ID_ID: GlobalStringId = 1;
pub const ID_START: GlobalStringId = 2;
pub const ID_END: GlobalStringId = 3;
pub const ID_TYPE: GlobalStringId = 4;
pub const ID_SOURCE: GlobalStringId = 5;
pub const ID_ACTIVE: GlobalStringId = 6;
pub const ID_TAG: GlobalStringId = 7;
pub const ID_SIM: GlobalStringId = 8;
pub const ID_SELF: GlobalStringId = 9;
pub const ID_EVENT: GlobalStringId = 10;
pub const ID_INITIALIZE: GlobalStringId = 11;
pub const ID_FITNESS: GlobalStringId = 12;
pub const ID_MATE_CHOICE: GlobalStringId = 13;
pub const ID_MODIFY_CHILD: GlobalStringId = 14;

/// The `(spelling, id)` pairs installed by
/// [`crate::registry::register_well_known_strings`].
pub(crate) const WELL_KNOWN: &[(&str, GlobalStringId)] = &[
    (STR_ID, ID_ID),
    (STR_START, ID_START),
    (STR_END, ID_END),
    (STR_TYPE, ID_TYPE),
    (STR_SOURCE, ID_SOURCE),
    (STR_ACTIVE, ID_ACTIVE),
    (STR_TAG, ID_TAG),
    (STR_SIM, ID_SIM),
    (STR_SELF, ID_SELF),
    (STR_EVENT, ID_EVENT),
    (STR_INITIALIZE, ID_INITIALIZE),
    (STR_FITNESS, ID_FITNESS),
    (STR_MATE_CHOICE, ID_MATE_CHOICE),
    (STR_MODIFY_CHILD, ID_MODIFY_CHILD),
];
