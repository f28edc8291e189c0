use clap::Parser;

fn main() -> anyhow::Result<()> {
    drill_service::block_on(drill_service::run(drill_service::Cli::parse()))?
}
