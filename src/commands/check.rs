use crate::commands::Tally;
use crate::utils::{
    config::FleetConfig,
    hosts::{fingerprint, probe_argv, read_hosts},
    tools::exec_cmd,
};
use clap::ArgMatches;
use log::{debug, error, info};

fn probe(host: &str, config: &FleetConfig) -> Result<(), Box<dyn std::error::Error>> {
    let argv = probe_argv(host, config);
    let args: Vec<&str> = argv[1..].iter().map(|arg| arg.as_str()).collect();
    let output = exec_cmd(&argv[0], &args, false)?.wait_with_output()?;
    if output.status.success() {
        Ok(())
    } else {
        let err = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        match err.is_empty() {
            true => Err("unreachable".into()),
            false => Err(err.into()),
        }
    }
}

pub fn main(cmd: &ArgMatches) -> Result<Tally, Box<dyn std::error::Error>> {
    let config = match cmd.value_of("config") {
        Some(path) => FleetConfig::load(path)?,
        None => FleetConfig::default(),
    };
    let hosts_path = cmd.value_of("hosts").unwrap_or(&config.hosts_file);
    let hosts = read_hosts(hosts_path)?;
    info!(
        "Loaded {} hosts from {} (sha1 {})",
        hosts.len(),
        hosts_path,
        fingerprint(hosts_path)?
    );

    let mut tally = Tally::new();
    for host in &hosts {
        debug!("Probing {}", host);
        match probe(host, &config) {
            Ok(()) => {
                info!("[OK] {}", host);
                tally.ok += 1;
            }
            Err(x) => {
                error!("[FAIL] {} -> {}", host, x);
                tally.fail += 1;
            }
        }
    }
    info!(
        "Done: {} reachable, {} unreachable out of {} hosts",
        tally.ok,
        tally.fail,
        tally.total()
    );
    Ok(tally)
}
