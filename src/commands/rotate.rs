use crate::commands::Tally;
use crate::utils::{
    config::FleetConfig,
    hosts::{build_targets, fingerprint, read_hosts},
    password::read_new_password,
    tools::{exec_cmd, yes_no},
};
use clap::ArgMatches;
use log::{debug, error, info};

fn running_as_root() -> Result<bool, Box<dyn std::error::Error>> {
    let id_cmd = exec_cmd("/usr/bin/id", &["-u"], false)?.wait_with_output()?;
    if !id_cmd.status.success() {
        return Err("Failed to check current uid".into());
    }
    Ok(String::from_utf8_lossy(&id_cmd.stdout).trim() == "0")
}

pub fn main(cmd: &ArgMatches) -> Result<Tally, Box<dyn std::error::Error>> {
    if !running_as_root()? {
        return Err("rotate must run as root on the admin node".into());
    }
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

    if !cmd.is_present("yes")
        && !yes_no(format!(
            "Change the root password on localhost and {} remote hosts",
            hosts.len()
        ))
    {
        return Err("Aborted by operator".into());
    }

    // Nothing is contacted until the password is confirmed.
    let password = read_new_password()?;

    let targets = build_targets(&hosts);
    let mut tally = Tally::new();
    for target in &targets {
        debug!("Changing root password on {}", target);
        match target.change_password(&password, &config) {
            Ok(()) => {
                info!("[OK] {}", target);
                tally.ok += 1;
            }
            Err(x) => {
                error!("[FAIL] {} -> {}", target, x);
                tally.fail += 1;
            }
        }
    }
    info!(
        "Done: {} succeeded, {} failed out of {} targets",
        tally.ok,
        tally.fail,
        tally.total()
    );
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_probe_runs() {
        assert!(running_as_root().is_ok());
    }
}
