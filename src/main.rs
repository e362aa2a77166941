use anyhow::Result;
use testdoc::cli::{handle_run, parse_args};
use testdoc::observability::init_tracing;

fn main() -> Result<()> {
    let cli = parse_args();
    init_tracing(cli.verbose);
    handle_run(&cli)
}
