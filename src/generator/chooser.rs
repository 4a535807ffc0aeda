use std::io::{BufRead, Write};

use rand::Rng;

use super::GenerateErrorType;
use crate::grammar::{render, Alternative};

// Resolves which alternative of a rule is used when there is more than one
pub trait Chooser {
    // Picks one of two or more alternatives, returning its zero-based index
    fn pick(&mut self, alternatives: &[Alternative]) -> Result<usize, GenerateErrorType>;
}

impl<C: Chooser + ?Sized> Chooser for &mut C {
    fn pick(&mut self, alternatives: &[Alternative]) -> Result<usize, GenerateErrorType> {
        (**self).pick(alternatives)
    }
}

// Turns a 1-based answer typed by the user into an index. The whole answer
// has to be a number, so `2x` is refused
pub fn parse_selection(answer: &str, count: usize) -> Result<usize, GenerateErrorType> {
    match answer.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
        _ => Err(GenerateErrorType::InvalidSelection(answer.to_string())),
    }
}

// Lists the alternatives and asks for one line of input
pub struct ConsoleChooser<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleChooser<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsoleChooser { input, output }
    }
}

impl<R: BufRead, W: Write> Chooser for ConsoleChooser<R, W> {
    fn pick(&mut self, alternatives: &[Alternative]) -> Result<usize, GenerateErrorType> {
        writeln!(self.output, "Choose an option:")?;
        for (i, alternative) in alternatives.iter().enumerate() {
            writeln!(self.output, "{}) {}", i + 1, render(alternative))?;
        }
        write!(self.output, "[1-{}] >", alternatives.len())?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        parse_selection(answer.trim(), alternatives.len())
    }
}

pub struct RandomChooser<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomChooser<R> {
    pub fn new(rng: R) -> Self {
        RandomChooser { rng }
    }
}

impl<R: Rng> Chooser for RandomChooser<R> {
    fn pick(&mut self, alternatives: &[Alternative]) -> Result<usize, GenerateErrorType> {
        if alternatives.is_empty() {
            return Err(GenerateErrorType::EmptyAlternatives);
        }
        Ok(self.rng.gen_range(0..alternatives.len()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    use super::*;
    use crate::grammar::Symbol;

    fn alternatives() -> Vec<Alternative> {
        vec![
            vec![Symbol::Terminal('a'), Symbol::Nonterminal('B')],
            vec![Symbol::Epsilon],
        ]
    }

    #[rstest]
    #[case("1", Ok(0))]
    #[case("2", Ok(1))]
    #[case("0", Err(GenerateErrorType::InvalidSelection("0".to_string())))]
    #[case("3", Err(GenerateErrorType::InvalidSelection("3".to_string())))]
    #[case("x", Err(GenerateErrorType::InvalidSelection("x".to_string())))]
    #[case("2x", Err(GenerateErrorType::InvalidSelection("2x".to_string())))]
    #[case("-1", Err(GenerateErrorType::InvalidSelection("-1".to_string())))]
    #[case("", Err(GenerateErrorType::InvalidSelection("".to_string())))]
    fn selection_bounds(#[case] answer: &str, #[case] expected: Result<usize, GenerateErrorType>) {
        assert_eq!(parse_selection(answer, 2), expected);
    }

    #[test]
    fn console_lists_and_prompts() {
        let mut output = Vec::new();
        let mut chooser = ConsoleChooser::new(Cursor::new("2\n"), &mut output);

        assert_eq!(chooser.pick(&alternatives()), Ok(1));
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Choose an option:\n1) aB\n2) ε\n[1-2] >"
        );
    }

    #[test]
    fn console_trims_answer() {
        let mut chooser = ConsoleChooser::new(Cursor::new("  1 \r\n"), Vec::new());
        assert_eq!(chooser.pick(&alternatives()), Ok(0));
    }

    #[test]
    fn console_without_input() {
        let mut chooser = ConsoleChooser::new(Cursor::new(""), Vec::new());
        assert_eq!(
            chooser.pick(&alternatives()),
            Err(GenerateErrorType::InvalidSelection(String::new()))
        );
    }

    #[test]
    fn random_stays_in_range() {
        let mut chooser = RandomChooser::new(StdRng::seed_from_u64(7));
        for _ in 0..100 {
            assert!(chooser.pick(&alternatives()).unwrap() < 2);
        }
        assert_eq!(chooser.pick(&[]), Err(GenerateErrorType::EmptyAlternatives));
    }
}
