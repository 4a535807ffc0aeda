/*
    This module is for storing, matching and printing grammars
*/

use std::fmt::Display;

use itertools::Itertools;

// The base unit in a grammar rule and in a sentential form
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Symbol {
    Start,
    Terminal(char),
    Nonterminal(char),
    Epsilon,
}

impl Symbol {
    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Start => write!(f, "S"),
            Symbol::Terminal(c) | Symbol::Nonterminal(c) => write!(f, "{}", c),
            Symbol::Epsilon => write!(f, "ε"),
        }
    }
}

// The symbols in a single alternative
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

pub fn render(symbols: &[Symbol]) -> String {
    symbols.iter().join("")
}

// Drops the epsilon markers, which stand for "nothing" in a replacement
pub fn without_epsilon(alternative: &[Symbol]) -> Alternative {
    alternative.iter().copied().filter(|s| *s != Symbol::Epsilon).collect()
}

#[derive(Debug, PartialEq, Clone)]
pub struct Rule {
    pub pattern: Vec<Symbol>,
    pub rewrite: Rewrite,
}

impl Rule {
    // Finds the leftmost start index at or after `from` where the whole
    // pattern occurs contiguously in `form`
    pub fn find_match(&self, form: &[Symbol], from: usize) -> Option<usize> {
        if self.pattern.is_empty() || self.pattern.len() > form.len() {
            return None;
        }
        (from..=form.len() - self.pattern.len())
            .find(|&i| form[i..i + self.pattern.len()] == self.pattern[..])
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rewrite = self.rewrite.iter().map(|alternative| render(alternative)).join(" | ");
        write!(f, "{} => {}", render(&self.pattern), rewrite)
    }
}

// Rules are kept in declaration order, which is also their matching priority.
// The first rule is always the start rule `S => ...`
#[derive(Debug, PartialEq, Default)]
pub struct Grammar {
    pub rules: Vec<Rule>,
}

impl Grammar {
    pub fn start_rule(&self) -> Option<&Rule> {
        self.rules.first()
    }

    // The rewriting rules, paired with their index in the grammar
    pub fn rewriting_rules(&self) -> impl Iterator<Item = (usize, &Rule)> {
        self.rules.iter().enumerate().skip(1)
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rules.iter().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn symbols(text: &str) -> Vec<Symbol> {
        text.chars()
            .map(|c| match c {
                'S' => Symbol::Start,
                'E' => Symbol::Epsilon,
                c if c.is_ascii_uppercase() => Symbol::Nonterminal(c),
                c => Symbol::Terminal(c),
            })
            .collect()
    }

    fn rule(pattern: &str, alternatives: &[&str]) -> Rule {
        Rule {
            pattern: symbols(pattern),
            rewrite: alternatives.iter().map(|a| symbols(a)).collect(),
        }
    }

    #[test]
    fn match_leftmost_occurrence() {
        let r = rule("aB", &["c"]);
        assert_eq!(r.find_match(&symbols("aBaB"), 0), Some(0));
        assert_eq!(r.find_match(&symbols("xaBaB"), 0), Some(1));
    }

    #[test]
    fn match_from_offset() {
        let r = rule("aB", &["c"]);
        assert_eq!(r.find_match(&symbols("aBaB"), 1), Some(2));
        assert_eq!(r.find_match(&symbols("aBaB"), 3), None);
        assert_eq!(r.find_match(&symbols("aBaB"), 10), None);
    }

    #[test]
    fn match_pattern_longer_than_form() {
        let r = rule("ABC", &["c"]);
        assert_eq!(r.find_match(&symbols("AB"), 0), None);
        assert_eq!(r.find_match(&[], 0), None);
    }

    #[test]
    fn match_terminal_and_nonterminal_are_distinct() {
        let r = rule("A", &["a"]);
        assert_eq!(r.find_match(&symbols("aaA"), 0), Some(2));
        assert_eq!(r.find_match(&symbols("aaa"), 0), None);
    }

    #[test]
    fn epsilon_is_filtered() {
        assert_eq!(without_epsilon(&symbols("E")), vec![]);
        assert_eq!(without_epsilon(&symbols("aEB")), symbols("aB"));
    }

    #[test]
    fn display_grammar() {
        let grammar = Grammar {
            rules: vec![rule("S", &["aAb"]), rule("A", &["E", "aA"]), rule("bA", &["B"])],
        };
        assert_eq!(grammar.to_string(), "S => aAb\nA => ε | aA\nbA => B");
    }

    #[test]
    fn rewriting_rules_skip_start() {
        let grammar = Grammar {
            rules: vec![rule("S", &["A"]), rule("A", &["a"])],
        };
        let indices: Vec<_> = grammar.rewriting_rules().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![1]);
        assert_eq!(grammar.start_rule(), Some(&rule("S", &["A"])));
    }

    proptest! {
        #[test]
        fn match_is_leftmost_at_or_after_offset(
            form in "[abAB]{0,12}",
            pattern in "[abAB]{1,3}",
            from in 0usize..14,
        ) {
            let form = symbols(&form);
            let r = rule(&pattern, &["a"]);
            let len = r.pattern.len();
            let occurs = |i: usize| i + len <= form.len() && form[i..i + len] == r.pattern[..];

            match r.find_match(&form, from) {
                Some(i) => {
                    prop_assert!(i >= from);
                    prop_assert!(occurs(i));
                    prop_assert!((from..i).all(|j| !occurs(j)));
                }
                None => prop_assert!((from..form.len().max(from)).all(|j| !occurs(j))),
            }
        }
    }
}
