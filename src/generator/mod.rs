/*
    This module derives sentences by rewriting
*/

pub mod chooser;

use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;

use crate::error_handling::*;
use crate::grammar::*;
use chooser::Chooser;

const SEPARATOR_WIDTH: usize = 46;

#[derive(Debug)]
pub enum GenerateErrorType {
    // The grammar has no start rule
    // This is a problem with the parser, not the grammar
    EmptyGrammar,
    // A rule without any alternative reached the chooser
    // This is a problem with the parser, not the grammar
    EmptyAlternatives,
    // The answer to a choice was not one of the listed options
    InvalidSelection(String),
    // No rule matches anywhere in the current form
    StuckDerivation(String),
    // The derivation needed more rewrites than allowed
    StepLimitExceeded(usize),
    // Reading the answer or writing the trace failed
    Io(std::io::Error),
}

impl ErrorType for GenerateErrorType {}

impl PartialEq for GenerateErrorType {
    fn eq(&self, other: &Self) -> bool {
        use GenerateErrorType::*;
        match (self, other) {
            (Io(a), Io(b)) => a.kind() == b.kind(),
            (InvalidSelection(a), InvalidSelection(b)) => a == b,
            (StuckDerivation(a), StuckDerivation(b)) => a == b,
            (StepLimitExceeded(a), StepLimitExceeded(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl From<std::io::Error> for GenerateErrorType {
    fn from(error: std::io::Error) -> Self {
        GenerateErrorType::Io(error)
    }
}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::EmptyGrammar => write!(f, "Grammar has no start rule (this is a problem with the parser, not the grammar)"),
            GenerateErrorType::EmptyAlternatives => write!(f, "Rule without alternatives found (this is a problem with the parser, not the grammar)"),
            GenerateErrorType::InvalidSelection(answer) => write!(f, "Invalid selection `{}`", answer),
            GenerateErrorType::StuckDerivation(form) => write!(f, "No rule found for `{}`", form),
            GenerateErrorType::StepLimitExceeded(steps) => write!(f, "Derivation did not finish within {} steps", steps),
            GenerateErrorType::Io(e) => write!(f, "Console error: {}", e),
        }
    }
}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult<T> = Result<T, GenerateError>;

// One applied rewrite. Rule 0 is the start rule
#[derive(Debug, PartialEq, Clone)]
pub struct Step {
    pub rule: usize,
    pub start: usize,
    pub length: usize,
    pub replacement: Alternative,
}

#[derive(Debug, PartialEq)]
pub struct Derivation {
    pub sentence: Vec<Symbol>,
    pub steps: Vec<Step>,
}

// Rewrites `S` with the rules of a grammar until only terminals are left,
// writing every step to `trace`.
// The search for the next match starts where the previous rewrite happened.
// Only when nothing matches from there on is the whole form searched again,
// and if that fails too the derivation is stuck.
pub struct Generator<'g, C: Chooser, W: Write> {
    grammar: &'g Grammar,
    chooser: C,
    trace: W,
    max_steps: Option<usize>,
}

impl<'g, C: Chooser, W: Write> Generator<'g, C, W> {
    pub fn new(grammar: &'g Grammar, chooser: C, trace: W) -> Self {
        Generator {
            grammar,
            chooser,
            trace,
            max_steps: None,
        }
    }

    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn generate(&mut self, file: PathBuf) -> GenResult<Derivation> {
        self.derive().map_err(|error| GenerateError {
            location: Location::file(file),
            error,
        })
    }

    fn derive(&mut self) -> Result<Derivation, GenerateErrorType> {
        let grammar = self.grammar;
        let start_rule = grammar.start_rule().ok_or(GenerateErrorType::EmptyGrammar)?;

        let mut form = vec![Symbol::Start];
        let replacement = self.choose(&form, 0, 1, &start_rule.rewrite)?;
        form = replacement.clone();
        let mut steps = vec![Step { rule: 0, start: 0, length: 1, replacement }];

        // At least one pass always runs, even when the start alternative
        // has no nonterminal left
        let mut cursor = 0;
        loop {
            let found = grammar
                .rewriting_rules()
                .find_map(|(index, rule)| rule.find_match(&form, cursor).map(|start| (index, rule, start)));

            match found {
                Some((index, rule, start)) => {
                    if self.max_steps.is_some_and(|max| steps.len() > max) {
                        return Err(GenerateErrorType::StepLimitExceeded(steps.len() - 1));
                    }

                    cursor = start;
                    let length = rule.pattern.len();
                    let replacement = self.choose(&form, start, length, &rule.rewrite)?;
                    form.splice(start..start + length, replacement.iter().copied());
                    steps.push(Step { rule: index, start, length, replacement });
                }
                None if cursor != 0 => cursor = 0,
                None => {
                    self.print_form(&form)?;
                    return Err(GenerateErrorType::StuckDerivation(render(&form)));
                }
            }

            if !form.iter().any(Symbol::is_nonterminal) {
                break;
            }
        }

        writeln!(self.trace, "Final State:")?;
        writeln!(self.trace, "{}", "=".repeat(SEPARATOR_WIDTH))?;
        writeln!(self.trace, "{}", render(&form))?;
        writeln!(self.trace, "{}", "=".repeat(SEPARATOR_WIDTH))?;

        Ok(Derivation { sentence: form, steps })
    }

    fn print_form(&mut self, form: &[Symbol]) -> std::io::Result<()> {
        writeln!(self.trace, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        writeln!(self.trace, "{}", render(form))
    }

    // Shows the matched span, settles on an alternative and returns it
    // without its epsilons
    fn choose(&mut self, form: &[Symbol], start: usize, length: usize, rewrite: &Rewrite) -> Result<Alternative, GenerateErrorType> {
        self.print_form(form)?;
        writeln!(self.trace, "{}{}", " ".repeat(start), "↑".repeat(length))?;

        let index = match rewrite.len() {
            0 => return Err(GenerateErrorType::EmptyAlternatives),
            1 => 0,
            count => {
                let index = self.chooser.pick(rewrite)?;
                if index >= count {
                    return Err(GenerateErrorType::InvalidSelection((index + 1).to_string()));
                }
                index
            }
        };

        let chosen = &rewrite[index];
        writeln!(
            self.trace,
            "{}{}__will be replaced by '{}'\n",
            " ".repeat(start),
            "|".repeat(length),
            render(chosen)
        )?;

        Ok(without_epsilon(chosen))
    }
}
