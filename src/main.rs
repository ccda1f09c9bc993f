use anyhow::Context;
use notebook::{Config, Vault, parse_cli, run};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Some(cli) = parse_cli(std::env::args_os()) else {
        return Ok(());
    };
    let config = Config::load_or_init().context("failed to load configuration")?;
    let vault = Vault::open_default();

    run(cli, &vault, &config)?;
    Ok(())
}
