use clap::Parser;

use mtg_manabase::cli;

fn main() {
    let args = cli::Args::parse();
    if let Err(error) = cli::run(&args) {
        eprintln!("✗ {error}");
        std::process::exit(1);
    }
}
