//! Command-line interface parsing
//!
//! CLI flags take precedence over environment configuration, so
//! `atlasd --port 8080` wins over `ATLAS_PORT`.

use clap::Parser;

use crate::config::Config;

/// atlasd - REST backend serving cached country data
#[derive(Parser, Debug)]
#[command(name = "atlasd")]
#[command(about = "Country data API with caching, pagination and search")]
#[command(version)]
pub struct Cli {
    /// Port to listen on (overrides ATLAS_PORT)
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Address to bind to
    #[arg(long, value_name = "ADDR", default_value = "0.0.0.0")]
    pub bind: String,
}

/// Resolves the socket address to bind, merging CLI flags over config.
pub fn bind_address(cli: &Cli, config: &Config) -> String {
    let port = cli.port.unwrap_or(config.port);
    format!("{}:{}", cli.bind, port)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            port: 3000,
            upstream_url: "https://restcountries.com/v3.1".to_string(),
            cache_ttl_secs: 3600,
            upstream_timeout_secs: 10,
        }
    }

    #[test]
    fn test_cli_parse_no_args_uses_defaults() {
        let cli = Cli::parse_from(["atlasd"]);
        assert!(cli.port.is_none());
        assert_eq!(cli.bind, "0.0.0.0");
    }

    #[test]
    fn test_cli_parse_port_flag() {
        let cli = Cli::parse_from(["atlasd", "--port", "8080"]);
        assert_eq!(cli.port, Some(8080));
    }

    #[test]
    fn test_bind_address_prefers_cli_port() {
        let cli = Cli::parse_from(["atlasd", "--port", "8080"]);
        assert_eq!(bind_address(&cli, &test_config()), "0.0.0.0:8080");
    }

    #[test]
    fn test_bind_address_falls_back_to_config_port() {
        let cli = Cli::parse_from(["atlasd"]);
        assert_eq!(bind_address(&cli, &test_config()), "0.0.0.0:3000");
    }

    #[test]
    fn test_bind_address_custom_host() {
        let cli = Cli::parse_from(["atlasd", "--bind", "127.0.0.1"]);
        assert_eq!(bind_address(&cli, &test_config()), "127.0.0.1:3000");
    }
}
