//! Local hosting runtime for the storage-event augmentation handler

use augmento::io::cli::{Cli, Invocation};
use clap::Parser;

fn main() -> augmento::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    Invocation::new(cli).run()?;
    Ok(())
}
