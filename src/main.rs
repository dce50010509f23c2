use ThermoHarvest::cli::cli_main::run_cli;

pub fn main() {
    if let Err(e) = run_cli() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
