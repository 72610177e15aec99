// src/bin/cli.rs
use clap::Parser;
use color_eyre::eyre::Report;
use jobwatch::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = cli::Args::parse();
    if let Err(e) = cli::run(args) {
        let code = e.exit_code();
        eprintln!("Error: {:?}", Report::new(e));
        std::process::exit(code);
    }
    Ok(())
}
