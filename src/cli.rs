use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error_handling::Location;
use crate::parser::{CompileError, CompileErrorType, CompileResult};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar (`.lang` is added when missing)
    pub file: PathBuf,

    /// Pick alternatives at random instead of asking
    #[arg(short, long)]
    pub random: bool,

    /// Seed for the random choices
    #[arg(short, long, value_name = "SEED", requires = "random")]
    pub seed: Option<u64>,

    /// Give up after this many rewrites (default: no limit)
    #[arg(short, long, value_name = "STEPS")]
    pub max_steps: Option<usize>,

    /// Print the parsed grammar before deriving
    #[arg(short = 'g', long)]
    pub show_grammar: bool
}

// Adds the `.lang` extension if needed and makes the path absolute. The
// file has to exist
pub fn resolve_path(file: &Path) -> CompileResult<PathBuf> {
    let mut name = file.as_os_str().to_os_string();
    if !file.to_string_lossy().ends_with(".lang") {
        name.push(".lang");
    }

    let path = std::path::absolute(&name).map_err(|e| CompileError {
        location: Location::file(PathBuf::from(&name)),
        error: CompileErrorType::FileError(e)
    })?;

    if !path.exists() {
        return Err(CompileError {
            location: Location::file(path),
            error: CompileErrorType::MissingFile
        });
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_adds_extension() {
        let with = resolve_path(Path::new("example_data/choice.lang")).unwrap();
        let without = resolve_path(Path::new("example_data/choice")).unwrap();

        assert!(with.is_absolute());
        assert!(with.ends_with("example_data/choice.lang"));
        assert_eq!(with, without);
    }

    #[test]
    fn resolve_missing_file() {
        let error = resolve_path(Path::new("example_data/missing")).unwrap_err();
        assert_eq!(error.error, CompileErrorType::MissingFile);
        assert!(error.location.file.ends_with("example_data/missing.lang"));
    }

    #[test]
    fn parse_arguments() {
        let cli = Cli::try_parse_from(["rewriter", "grammar", "--random", "--seed", "4", "-m", "20"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("grammar"));
        assert!(cli.random);
        assert_eq!(cli.seed, Some(4));
        assert_eq!(cli.max_steps, Some(20));
        assert!(!cli.show_grammar);

        assert!(Cli::try_parse_from(["rewriter"]).is_err());
        assert!(Cli::try_parse_from(["rewriter", "grammar", "--seed", "4"]).is_err());
    }
}
