use crate::utils::config::FleetConfig;
use crate::utils::tools::{exec_cmd, read_lines, sha1_hex};
use std::fmt::Display;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Reads the newline-delimited hosts file. Blank lines and `#` comments
/// are skipped; a `user@` prefix is stripped since connections always run
/// as the invoking root user. Order and duplicates are preserved.
pub fn read_hosts<P>(path: P) -> Result<Vec<String>, Box<dyn std::error::Error>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.is_file() {
        return Err(format!("Hosts file not found: {}", path.display()).into());
    }
    let mut hosts: Vec<String> = Vec::new();
    for line in read_lines(path)? {
        let line = line?;
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        let host = match entry.split_once('@') {
            Some((_, host)) => host,
            None => entry,
        };
        hosts.push(host.to_owned());
    }
    Ok(hosts)
}

/// SHA-1 of the raw hosts file, recorded in the log so an audit can tell
/// exactly which host list a run used.
pub fn fingerprint<P>(path: P) -> Result<String, Box<dyn std::error::Error>>
where
    P: AsRef<Path>,
{
    let content = fs::read(path)?;
    Ok(sha1_hex(&content))
}

pub enum Target {
    Local,
    Remote(String),
}

/// Localhost first, then the remote hosts in file order.
pub fn build_targets(hosts: &[String]) -> Vec<Target> {
    let mut targets = vec![Target::Local];
    for host in hosts {
        targets.push(Target::Remote(host.to_owned()));
    }
    targets
}

impl Target {
    pub fn name(&self) -> &str {
        match self {
            Target::Local => "localhost",
            Target::Remote(host) => host,
        }
    }

    pub fn chpasswd_argv(&self, config: &FleetConfig) -> Vec<String> {
        match self {
            Target::Local => vec![String::from("/usr/sbin/chpasswd")],
            Target::Remote(host) => {
                let mut argv = vec![
                    String::from("ssh"),
                    String::from("-o"),
                    format!("ConnectTimeout={}", config.connect_timeout),
                ];
                for opt in &config.ssh_options {
                    argv.push(opt.to_owned());
                }
                argv.push(host.to_owned());
                argv.push(String::from("chpasswd"));
                argv
            }
        }
    }

    /// Runs the password change against this target, feeding chpasswd its
    /// `root:<password>` line on stdin.
    pub fn change_password(
        &self,
        password: &str,
        config: &FleetConfig,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let argv = self.chpasswd_argv(config);
        let args: Vec<&str> = argv[1..].iter().map(|arg| arg.as_str()).collect();
        let proc = exec_cmd(&argv[0], &args, true)?;
        proc.stdin
            .as_ref()
            .ok_or("Failed to open stdin for chpasswd")?
            .write_all(format!("root:{}\n", password).as_bytes())?;
        let output = proc.wait_with_output()?;
        if output.status.success() {
            Ok(())
        } else {
            let err = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            match err.is_empty() {
                true => Err("unknown error".into()),
                false => Err(err.into()),
            }
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Argv for a reachability probe: batch mode so a dead host fails fast
/// instead of hanging on an auth prompt.
pub fn probe_argv(host: &str, config: &FleetConfig) -> Vec<String> {
    let mut argv = vec![
        String::from("ssh"),
        String::from("-o"),
        String::from("BatchMode=yes"),
        String::from("-o"),
        format!("ConnectTimeout={}", config.connect_timeout),
    ];
    for opt in &config.ssh_options {
        argv.push(opt.to_owned());
    }
    argv.push(host.to_owned());
    argv.push(String::from("true"));
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn hosts_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn read_hosts_skips_blanks_and_comments() {
        let file = hosts_file("# fleet nodes\n\nnode1\n   \nnode2\n# spare\nnode3\n");
        let hosts = read_hosts(file.path()).unwrap();
        assert_eq!(hosts, vec!["node1", "node2", "node3"]);
    }

    #[test]
    fn read_hosts_strips_user_prefix() {
        let file = hosts_file("root@node1\nadmin@node2\nnode3\n");
        let hosts = read_hosts(file.path()).unwrap();
        assert_eq!(hosts, vec!["node1", "node2", "node3"]);
    }

    #[test]
    fn read_hosts_keeps_order_and_duplicates() {
        let file = hosts_file("node2\nnode1\nnode2\n");
        let hosts = read_hosts(file.path()).unwrap();
        assert_eq!(hosts, vec!["node2", "node1", "node2"]);
    }

    #[test]
    fn read_hosts_missing_file_is_error() {
        let err = read_hosts("/nonexistent/hosts.txt").unwrap_err();
        assert!(err.to_string().contains("Hosts file not found"));
    }

    #[test]
    fn build_targets_is_localhost_plus_hosts() {
        let hosts = vec![String::from("node1"), String::from("node2")];
        let targets = build_targets(&hosts);
        assert_eq!(targets.len(), hosts.len() + 1);
        assert_eq!(targets[0].name(), "localhost");
        assert_eq!(targets[1].name(), "node1");
        assert_eq!(targets[2].name(), "node2");
    }

    #[test]
    fn local_chpasswd_argv() {
        let config = FleetConfig::default();
        assert_eq!(
            Target::Local.chpasswd_argv(&config),
            vec!["/usr/sbin/chpasswd"]
        );
    }

    #[test]
    fn remote_chpasswd_argv_carries_options() {
        let config = FleetConfig {
            hosts_file: String::from("hosts.txt"),
            ssh_options: vec![String::from("-o"), String::from("StrictHostKeyChecking=no")],
            connect_timeout: 5,
        };
        let argv = Target::Remote(String::from("node1")).chpasswd_argv(&config);
        assert_eq!(
            argv,
            vec![
                "ssh",
                "-o",
                "ConnectTimeout=5",
                "-o",
                "StrictHostKeyChecking=no",
                "node1",
                "chpasswd"
            ]
        );
    }

    #[test]
    fn probe_argv_uses_batch_mode() {
        let config = FleetConfig::default();
        let argv = probe_argv("node1", &config);
        assert_eq!(
            argv,
            vec![
                "ssh",
                "-o",
                "BatchMode=yes",
                "-o",
                "ConnectTimeout=10",
                "node1",
                "true"
            ]
        );
    }

    #[test]
    fn fingerprint_matches_content_sha1() {
        let file = hosts_file("abc");
        assert_eq!(
            fingerprint(file.path()).unwrap(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }
}
