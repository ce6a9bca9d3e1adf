mod commands;
mod terminal;

use commands::{CommandLine, fix};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose);
    print::banner();

    let cfg = commands.load_config()?;

    print::header(if cfg.dry_run {
        "fixing phone numbers (dry run)"
    } else {
        "fixing phone numbers"
    });
    fix::fix(&cfg).await
}
