use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Convert CSV files to IIF format for QuickBooks
#[derive(Parser, Debug)]
#[command(name = "csv2iif", version)]
#[command(about = "Convert CSV files to IIF format for QuickBooks", long_about = None)]
#[command(args_conflicts_with_subcommands = true, arg_required_else_help = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input CSV file (shorthand for `convert INPUT OUTPUT`)
    #[arg(value_name = "INPUT", requires = "output")]
    pub input: Option<PathBuf>,

    /// Output IIF file (shorthand for `convert INPUT OUTPUT`)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging (DEBUG level)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Convert CSV to IIF
    Convert(ConvertArgs),

    /// Validate CSV file
    Validate(ValidateArgs),

    /// Clean and trim CSV file
    Clean(CleanArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ConvertArgs {
    /// Input CSV file path
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output IIF file path
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ValidateArgs {
    /// Input CSV file path
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CleanArgs {
    /// Input CSV file path
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output cleaned CSV file path
    #[arg(
        value_name = "OUTPUT",
        required_unless_present = "in_place",
        conflicts_with = "in_place"
    )]
    pub output: Option<PathBuf>,

    /// Edit file in place
    #[arg(short = 'i', long = "in-place")]
    pub in_place: bool,
}

impl CleanArgs {
    /// Destination of the cleaned file
    pub fn destination(&self) -> &Path {
        match &self.output {
            Some(output) if !self.in_place => output,
            _ => &self.input,
        }
    }
}

impl CliArgs {
    /// Resolve the command to run
    ///
    /// The bare `INPUT OUTPUT` form is treated as `convert`. Returns `None`
    /// when neither a subcommand nor both paths were given.
    pub fn into_command(self) -> Option<Command> {
        match (self.command, self.input, self.output) {
            (Some(command), _, _) => Some(command),
            (None, Some(input), Some(output)) => {
                Some(Command::Convert(ConvertArgs { input, output }))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn convert(input: &str, output: &str) -> Command {
        Command::Convert(ConvertArgs {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        })
    }

    #[rstest]
    #[case::subcommand(&["csv2iif", "convert", "in.csv", "out.iif"], convert("in.csv", "out.iif"), false)]
    #[case::shorthand(&["csv2iif", "in.csv", "out.iif"], convert("in.csv", "out.iif"), false)]
    #[case::shorthand_verbose(&["csv2iif", "in.csv", "out.iif", "-v"], convert("in.csv", "out.iif"), true)]
    #[case::subcommand_verbose(&["csv2iif", "convert", "--verbose", "in.csv", "out.iif"], convert("in.csv", "out.iif"), true)]
    #[case::validate(
        &["csv2iif", "validate", "in.csv"],
        Command::Validate(ValidateArgs { input: PathBuf::from("in.csv") }),
        false
    )]
    fn test_command_parsing(
        #[case] args: &[&str],
        #[case] expected: Command,
        #[case] verbose: bool,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.verbose, verbose);
        assert_eq!(parsed.into_command(), Some(expected));
    }

    #[rstest]
    #[case::output_path(&["csv2iif", "clean", "in.csv", "out.csv"], "out.csv", false)]
    #[case::in_place_short(&["csv2iif", "clean", "-i", "in.csv"], "in.csv", true)]
    #[case::in_place_long(&["csv2iif", "clean", "in.csv", "--in-place"], "in.csv", true)]
    fn test_clean_destination(
        #[case] args: &[&str],
        #[case] expected: &str,
        #[case] in_place: bool,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        match parsed.into_command() {
            Some(Command::Clean(clean)) => {
                assert_eq!(clean.in_place, in_place);
                assert_eq!(clean.destination(), Path::new(expected));
            }
            other => panic!("Expected clean command, got {:?}", other),
        }
    }

    #[rstest]
    #[case::no_arguments(&["csv2iif"])]
    #[case::shorthand_missing_output(&["csv2iif", "in.csv"])]
    #[case::convert_missing_output(&["csv2iif", "convert", "in.csv"])]
    #[case::validate_missing_input(&["csv2iif", "validate"])]
    #[case::clean_without_destination(&["csv2iif", "clean", "in.csv"])]
    #[case::clean_output_and_in_place(&["csv2iif", "clean", "in.csv", "out.csv", "-i"])]
    #[case::unknown_flag(&["csv2iif", "convert", "--format", "qbo", "in.csv", "out.iif"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
