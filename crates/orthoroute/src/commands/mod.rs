pub mod batch;
pub mod completion;
pub mod config;
pub mod report;
pub mod route;

use colored::Colorize;

pub fn print_version() {
    println!(
        "{} {}",
        "orthoroute".bold(),
        env!("CARGO_PKG_VERSION").green()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION").dimmed());
}
