use clap::{App, Arg, SubCommand};

use chrono::prelude::*;
use log::error;
use simplelog::*;

use std::fs::File;
use std::process;

pub mod commands;
pub mod utils;

fn main() {
    let app = App::new("FleetPass")
        .version("0.3.0")
        .about("Broadcasts a root password change to the local host and a fleet of remote hosts over SSH")
        .subcommand(
            SubCommand::with_name("rotate")
                .arg(
                    Arg::with_name("hosts")
                        .short('f')
                        .long("hosts")
                        .takes_value(true)
                        .help("Hosts file to read targets from (default hosts.txt)"),
                )
                .arg(
                    Arg::with_name("config")
                        .short('c')
                        .long("config")
                        .takes_value(true)
                        .help("JSON config with hosts file path and ssh options"),
                )
                .arg(
                    Arg::with_name("yes")
                        .short('y')
                        .long("yes")
                        .takes_value(false)
                        .help("Skip the confirmation prompt"),
                )
                .about("Change the root password on localhost and every host in the hosts file"),
        )
        .subcommand(
            SubCommand::with_name("check")
                .arg(
                    Arg::with_name("hosts")
                        .short('f')
                        .long("hosts")
                        .takes_value(true)
                        .help("Hosts file to read targets from (default hosts.txt)"),
                )
                .arg(
                    Arg::with_name("config")
                        .short('c')
                        .long("config")
                        .takes_value(true)
                        .help("JSON config with hosts file path and ssh options"),
                )
                .about("Probe SSH reachability of every host in the hosts file"),
        )
        .get_matches();

    let dt = Local::now();

    match app.subcommand() {
        None => {
            eprintln!("[ERROR] No Subcommand Provided! See fleetpass --help");
            process::exit(1);
        }
        Some(("rotate", cmd)) => {
            let log_path = format!(
                "fleetpass_rotate_{}.log",
                dt.format("%Y_%m_%d_%H_%M_%S").to_string()
            );
            let log_file = match File::create(&log_path) {
                Ok(file) => file,
                Err(x) => {
                    eprintln!("[ERROR] Failed to create log file {}: {}", log_path, x);
                    process::exit(1);
                }
            };
            CombinedLogger::init(vec![
                TermLogger::new(
                    LevelFilter::Debug,
                    Config::default(),
                    TerminalMode::Mixed,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
            ])
            .unwrap();
            match commands::rotate::main(cmd) {
                Ok(tally) => process::exit(tally.exit_code()),
                Err(x) => {
                    error!("{}", x);
                    process::exit(1);
                }
            }
        }
        Some(("check", cmd)) => {
            let log_path = format!(
                "fleetpass_check_{}.log",
                dt.format("%Y_%m_%d_%H_%M_%S").to_string()
            );
            let log_file = match File::create(&log_path) {
                Ok(file) => file,
                Err(x) => {
                    eprintln!("[ERROR] Failed to create log file {}: {}", log_path, x);
                    process::exit(1);
                }
            };
            CombinedLogger::init(vec![
                TermLogger::new(
                    LevelFilter::Debug,
                    Config::default(),
                    TerminalMode::Mixed,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
            ])
            .unwrap();
            match commands::check::main(cmd) {
                Ok(tally) => process::exit(tally.exit_code()),
                Err(x) => {
                    error!("{}", x);
                    process::exit(1);
                }
            }
        }
        Some((x, _)) => {
            eprintln!("[ERROR] Unknown Command: {}", x);
            process::exit(1);
        }
    };
}
