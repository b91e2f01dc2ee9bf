use std::path::PathBuf;

use clap::Parser;

use docdiff_engine::Algorithm;
use docdiff_render::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "docdiff",
    about = "Compare documents line by line or block by block",
    version,
    disable_version_flag = true,
    after_help = "\
Examples:
  docdiff old.txt new.txt                      Compare text files in the terminal
  docdiff old.md new.md -f html -o diff.html   Write an HTML diff
  docdiff a.ndoc b.ndoc --block-diff -f json   Compare extracted documents by block

Exit status: 0 if the inputs are identical, 1 if they differ, 2 on error."
)]
pub struct Cli {
    /// Path to the old/original file
    pub old: PathBuf,

    /// Path to the new/modified file
    pub new: PathBuf,

    /// Output format: ansi (terminal), html, json, columns, unified, context, png
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Unchanged lines to show around each change
    #[arg(short, long)]
    pub context: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Diff positional blocks instead of lines
    #[arg(long)]
    pub block_diff: bool,

    /// Alignment algorithm: lcs, ratcliff, myers, patience
    #[arg(long)]
    pub algorithm: Option<Algorithm>,

    /// Line pitch used to place blocks without a line number
    #[arg(long)]
    pub line_height: Option<f64>,

    /// Refuse inputs with more lines (or blocks) than this
    #[arg(long)]
    pub max_lines: Option<usize>,

    /// Print nothing when the inputs are identical; no progress messages
    #[arg(short, long)]
    pub quiet: bool,

    /// Only print similarity and change counts
    #[arg(short, long)]
    pub summary: bool,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Print version
    #[arg(short = 'v', short_alias = 'V', long, action = clap::ArgAction::Version)]
    pub version: (),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal() {
        let cli = Cli::try_parse_from(["docdiff", "a.txt", "b.txt"]).unwrap();
        assert_eq!(cli.old, PathBuf::from("a.txt"));
        assert_eq!(cli.new, PathBuf::from("b.txt"));
        assert!(cli.format.is_none());
        assert!(!cli.quiet && !cli.summary && !cli.block_diff);
    }

    #[test]
    fn parse_all_flags() {
        let cli = Cli::try_parse_from([
            "docdiff", "a.pdf.ndoc", "b.ndoc", "-f", "json", "-o", "out.json", "-c", "5",
            "--no-color", "--block-diff", "--algorithm", "patience", "--line-height", "14.5",
            "--max-lines", "1000", "-q", "-s", "--config", "docdiff.toml", "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert_eq!(cli.context, Some(5));
        assert!(cli.no_color && cli.block_diff && cli.quiet && cli.summary && cli.verbose);
        assert_eq!(cli.algorithm, Some(Algorithm::Patience));
        assert_eq!(cli.line_height, Some(14.5));
        assert_eq!(cli.max_lines, Some(1000));
        assert_eq!(cli.config, Some(PathBuf::from("docdiff.toml")));
    }

    #[test]
    fn parse_terminal_alias() {
        let cli = Cli::try_parse_from(["docdiff", "a", "b", "--format", "terminal"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Ansi));
    }

    #[test]
    fn reject_unknown_format() {
        assert!(Cli::try_parse_from(["docdiff", "a", "b", "-f", "bmp"]).is_err());
        let cli = Cli::try_parse_from(["docdiff", "a", "b", "-f", "context"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Context));
    }

    #[test]
    fn short_v_prints_version() {
        for flag in ["-v", "-V", "--version"] {
            let err = Cli::try_parse_from(["docdiff", flag]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion, "{flag}");
        }
        let cli = Cli::try_parse_from(["docdiff", "a", "b", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn reject_unknown_algorithm() {
        assert!(Cli::try_parse_from(["docdiff", "a", "b", "--algorithm", "histogram"]).is_err());
    }

    #[test]
    fn require_two_paths() {
        assert!(Cli::try_parse_from(["docdiff", "a"]).is_err());
    }
}
