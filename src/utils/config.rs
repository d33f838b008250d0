use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
pub struct FleetConfig {
    #[serde(default = "default_hosts_file")]
    pub hosts_file: String,
    #[serde(default)]
    pub ssh_options: Vec<String>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

fn default_hosts_file() -> String {
    String::from("hosts.txt")
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for FleetConfig {
    fn default() -> FleetConfig {
        FleetConfig {
            hosts_file: default_hosts_file(),
            ssh_options: Vec::new(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl FleetConfig {
    pub fn load<P>(path: P) -> Result<FleetConfig, Box<dyn std::error::Error>>
    where
        P: AsRef<Path>,
    {
        let content = read_to_string(path)?;
        let config: FleetConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
