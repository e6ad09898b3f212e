//! Symbol-use scanner.
//!
//! A post-order walk over a block's tree that records which well-known free
//! identifiers the block mentions, so the evaluator can skip allocating and
//! binding globals the block cannot touch. The summary is conservative by
//! contract: false positives are benign, false negatives are not.
//!
//! Three mechanisms set bits:
//!
//! - the **recognised table**: named spellings (language constants,
//!   simulator globals, callback parameters) mapped to bit indices. The
//!   table is an [`IndexMap`] and the bit index is the insertion index, so
//!   adding a new hook parameter is one new line, no renumbering.
//! - the **instance heuristic**: any identifier of length >= 2 starting
//!   with `p`, `g`, `m`, or `s` whose second character is a digit marks the
//!   class bit for that prefix. Deliberately broad - `p0` is flagged even
//!   though ids start at 1 - erring toward "used".
//! - **wildcard triggers** (`executeLambda`, `ls`, `rm`): identifiers that
//!   can reach any global. Seeing one forces every other bit after the
//!   walk.

use std::sync::LazyLock;

use indexmap::IndexMap;
use static_assertions::const_assert;

use loci_lex::TokenKind;
use loci_par::Node;
use loci_util::strings;

/// Identifiers whose presence defeats the analysis.
const WILDCARD_TRIGGERS: [&str; 3] = [
    strings::STR_EXECUTE_LAMBDA,
    strings::STR_LS,
    strings::STR_RM,
];

/// Entity classes recognised by the instance heuristic, by prefix letter.
const INSTANCE_PREFIXES: [char; 4] = ['p', 'g', 'm', 's'];

/// The recognised named spellings, in bit order. Appending here is all it
/// takes to recognise a new hook parameter.
const RECOGNIZED_SPELLINGS: [&str; 26] = [
    // language constants
    strings::STR_T,
    strings::STR_F,
    strings::STR_NULL,
    strings::STR_PI,
    strings::STR_E,
    strings::STR_INF,
    strings::STR_NAN,
    // simulator globals
    strings::STR_SIM,
    strings::STR_SELF,
    // callback parameters
    strings::STR_MUT,
    strings::STR_REL_FITNESS,
    strings::STR_GENOME1,
    strings::STR_GENOME2,
    strings::STR_SUBPOP,
    strings::STR_HOMOZYGOUS,
    strings::STR_SOURCE_SUBPOP,
    strings::STR_WEIGHTS,
    strings::STR_CHILD_GENOME1,
    strings::STR_CHILD_GENOME2,
    strings::STR_CHILD_IS_FEMALE,
    strings::STR_PARENT1_GENOME1,
    strings::STR_PARENT1_GENOME2,
    strings::STR_PARENT2_GENOME1,
    strings::STR_PARENT2_GENOME2,
    strings::STR_IS_CLONING,
    strings::STR_IS_SELFING,
];

const WILDCARD_BIT: u8 = (RECOGNIZED_SPELLINGS.len() + INSTANCE_PREFIXES.len()) as u8;
const ALL_BITS_MASK: u64 = (1u64 << (WILDCARD_BIT + 1)) - 1;

// every named bit, the instance-class bits, and the wildcard bit must fit
const_assert!(RECOGNIZED_SPELLINGS.len() + INSTANCE_PREFIXES.len() + 1 <= 64);

/// Spelling-to-bit lookup; bit index = position in the table.
static RECOGNIZED: LazyLock<IndexMap<&'static str, u8>> = LazyLock::new(|| {
    RECOGNIZED_SPELLINGS
        .iter()
        .enumerate()
        .map(|(index, spelling)| (*spelling, index as u8))
        .collect()
});

fn instance_bit(prefix: char) -> Option<u8> {
    INSTANCE_PREFIXES
        .iter()
        .position(|&p| p == prefix)
        .map(|offset| (RECOGNIZED_SPELLINGS.len() + offset) as u8)
}

/// A block's conservative summary of the well-known free identifiers it may
/// reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SymbolUses {
    bits: u64,
}

impl SymbolUses {
    /// An empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one identifier spelling.
    pub fn observe_identifier(&mut self, spelling: &str) {
        if WILDCARD_TRIGGERS.contains(&spelling) {
            self.mark(WILDCARD_BIT);
        }

        if let Some(&bit) = RECOGNIZED.get(spelling) {
            self.mark(bit);
        }

        // instance identifiers like p1, g1, m1, s1; the heuristic is very
        // dumb, but errs on the safe side
        let bytes = spelling.as_bytes();
        if bytes.len() >= 2 && bytes[1].is_ascii_digit() {
            if let Some(bit) = instance_bit(bytes[0] as char) {
                self.mark(bit);
            }
        }
    }

    /// Record every identifier in the subtree, post-order.
    pub fn observe_tree(&mut self, node: &Node) {
        for child in node.children() {
            self.observe_tree(child);
        }
        if node.kind() == TokenKind::Identifier {
            self.observe_identifier(&node.token().text);
        }
    }

    /// If a wildcard trigger was observed, force every recognised bit.
    pub fn apply_wildcard(&mut self) {
        if self.contains_wildcard() {
            self.bits = ALL_BITS_MASK;
        }
    }

    /// True if the named spelling was observed (or a wildcard forced it).
    ///
    /// Unrecognised spellings are never "used".
    pub fn contains(&self, spelling: &str) -> bool {
        RECOGNIZED
            .get(spelling)
            .is_some_and(|&bit| self.bits & (1 << bit) != 0)
    }

    /// True if an instance identifier of the given class (`'p'`, `'g'`,
    /// `'m'`, `'s'`) was observed.
    pub fn contains_instance(&self, prefix: char) -> bool {
        instance_bit(prefix).is_some_and(|bit| self.bits & (1 << bit) != 0)
    }

    /// True if a wildcard trigger was observed.
    pub fn contains_wildcard(&self) -> bool {
        self.bits & (1 << WILDCARD_BIT) != 0
    }

    /// The raw bitset.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    fn mark(&mut self, bit: u8) {
        self.bits |= 1 << bit;
    }
}

/// Scan a block's compound statement. Also callable for re-scans.
pub fn scan_symbols(compound_statement: &Node) -> SymbolUses {
    let mut uses = SymbolUses::new();
    uses.observe_tree(compound_statement);
    uses.apply_wildcard();
    uses
}

#[cfg(test)]
mod tests {
    use super::*;
    use loci_par::{Parser, Script};
    use loci_util::strings;
    use std::rc::Rc;

    fn scan_source(source: &str) -> SymbolUses {
        let mut script = Script::new(source, 0);
        script.tokenize(false).unwrap();
        script.parse_interpreter_block_to_ast().unwrap();
        scan_symbols(script.ast().unwrap())
    }

    #[test]
    fn test_named_spellings() {
        let uses = scan_source("if (homozygous) x = relFitness; y = T;");
        assert!(uses.contains(strings::STR_HOMOZYGOUS));
        assert!(uses.contains(strings::STR_REL_FITNESS));
        assert!(uses.contains(strings::STR_T));
        assert!(!uses.contains(strings::STR_SIM));
        assert!(!uses.contains_wildcard());
    }

    #[test]
    fn test_soundness_every_recognised_spelling() {
        // no false negatives: each table entry, mentioned alone, is seen
        for (spelling, _) in RECOGNIZED.iter() {
            let uses = scan_source(&format!("x = {spelling};"));
            assert!(uses.contains(spelling), "missed {spelling}");
        }
    }

    #[test]
    fn test_instance_heuristic() {
        let uses = scan_source("p1.size(); g22; m0; x = s9;");
        assert!(uses.contains_instance('p'));
        assert!(uses.contains_instance('g'));
        assert!(uses.contains_instance('m'), "m0 flagged despite ids starting at 1");
        assert!(uses.contains_instance('s'));
    }

    #[test]
    fn test_instance_heuristic_needs_digit_second() {
        let uses = scan_source("pop = 1; grid = 2; sub = 3;");
        assert!(!uses.contains_instance('p'));
        assert!(!uses.contains_instance('g'));
        assert!(!uses.contains_instance('s'));
    }

    #[test]
    fn test_strings_are_not_scanned() {
        let uses = scan_source("x = \"p1\"; y = 'sim';");
        assert!(!uses.contains_instance('p'));
        assert!(!uses.contains(strings::STR_SIM));
    }

    #[test]
    fn test_wildcard_forces_every_bit() {
        for trigger in WILDCARD_TRIGGERS {
            let uses = scan_source(&format!("{trigger}(\"x\");"));
            assert!(uses.contains_wildcard());
            for (spelling, _) in RECOGNIZED.iter() {
                assert!(uses.contains(spelling), "{trigger} did not force {spelling}");
            }
            for prefix in INSTANCE_PREFIXES {
                assert!(uses.contains_instance(prefix));
            }
        }
    }

    #[test]
    fn test_without_wildcard_bits_stay_clear() {
        let uses = scan_source("x = 1 + 2;");
        assert_eq!(uses.bits(), 0);
    }

    #[test]
    fn test_scan_walks_every_position() {
        // identifiers in conditions, subscripts, members, and arguments
        let uses = scan_source("if (sim.generation > 10) x[m1] = f(weights, p2.id);");
        assert!(uses.contains(strings::STR_SIM));
        assert!(uses.contains(strings::STR_WEIGHTS));
        assert!(uses.contains_instance('m'));
        assert!(uses.contains_instance('p'));
    }

    #[test]
    fn test_observe_tree_via_parser_directly() {
        let tokens = loci_lex::tokenize("{ sim; }", 0, false).unwrap();
        let mut parser = Parser::new(&tokens);
        let compound: Rc<Node> = parser.parse_compound_statement().unwrap();
        let uses = scan_symbols(&compound);
        assert!(uses.contains(strings::STR_SIM));
    }
}
