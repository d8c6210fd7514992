use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use orthoroute::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
        ConfigCommands::Path => {
            println!("{}", Config::path()?.display());
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = if path.exists() {
        Config::load_from(&path)?
    } else {
        println!("{}", "No config file, using defaults.".yellow());
        Config::default()
    };

    let effective = config.routing_config();
    println!("{} {}", "Config file:".bold(), path.display());
    println!();
    println!("{}", "routing:".bold());
    println!(
        "  turn_penalty: {}{}",
        effective.turn_penalty,
        default_marker(config.routing.as_ref().and_then(|r| r.turn_penalty).is_none())
    );
    println!(
        "  center_line:  {}{}",
        effective.center_line,
        default_marker(config.routing.as_ref().and_then(|r| r.center_line).is_none())
    );
    Ok(())
}

fn default_marker(is_default: bool) -> String {
    if is_default {
        format!(" {}", "(default)".dimmed())
    } else {
        String::new()
    }
}

fn set(key: &str, value: &str) -> Result<()> {
    let path = Config::path()?;
    let mut config = if path.exists() {
        Config::load_from(&path)?
    } else {
        Config::default()
    };
    config.set(key, value)?;
    config.save_to(&path)?;
    println!(
        "{}",
        format!("Set {key} = {value} in {}", path.display()).green()
    );
    Ok(())
}
