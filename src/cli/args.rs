use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "testdoc")]
#[command(
    about = "Decision tables from annotated test sources and JUnit result documents",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Root of the test source tree
    #[arg(long, env = "TESTDOC_SOURCES")]
    pub sources: PathBuf,

    /// Directory holding JUnit/Surefire result documents
    #[arg(long, env = "TESTDOC_REPORTS")]
    pub reports: PathBuf,

    /// Configuration file (defaults to a discovered .testdoc.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only report this method-under-test
    #[arg(long)]
    pub method: Option<String>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
