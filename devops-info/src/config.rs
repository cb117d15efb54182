use clap::{ArgAction, Parser};
use std::net::Ipv6Addr;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Startup configuration, read once from flags or the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "devops-info", version, about = "DevOps info service")]
pub struct Config {
    /// Bind address
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Bind port
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Debug mode (only a case-insensitive "true" enables it)
    #[arg(
        long,
        env = "DEBUG",
        default_value = "false",
        default_missing_value = "true",
        num_args = 0..=1,
        action = ArgAction::Set,
        value_parser = parse_debug_flag
    )]
    pub debug: bool,
}

fn parse_debug_flag(s: &str) -> Result<bool, String> {
    Ok(s.trim().eq_ignore_ascii_case("true"))
}

impl Config {
    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub fn log_directive(&self) -> &'static str {
        if self.debug {
            "devops_info=debug,tower_http=debug"
        } else {
            "devops_info=info,tower_http=warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["devops-info", "--host", "127.0.0.1", "--port", "8080"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_bind_addr_ipv4() {
        let config = parse(&["--debug", "false"]);
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert!(!config.debug);
    }

    #[test]
    fn test_bind_addr_ipv6_is_bracketed() {
        let config =
            Config::try_parse_from(["devops-info", "--host", "::", "--port", "5000"]).unwrap();
        assert_eq!(config.bind_addr(), "[::]:5000");
    }

    #[test]
    fn test_debug_flag_parsing() {
        assert!(parse(&["--debug"]).debug);
        assert!(parse(&["--debug", "TRUE"]).debug);
        assert!(parse(&["--debug", "True"]).debug);
        assert!(!parse(&["--debug", "yes"]).debug);
        assert!(!parse(&["--debug", "1"]).debug);
    }

    #[test]
    fn test_log_directive_follows_debug() {
        assert_eq!(
            parse(&["--debug", "true"]).log_directive(),
            "devops_info=debug,tower_http=debug"
        );
        assert_eq!(
            parse(&["--debug", "false"]).log_directive(),
            "devops_info=info,tower_http=warn"
        );
    }

    #[test]
    fn test_invalid_port_rejected() {
        let result = Config::try_parse_from(["devops-info", "--port", "70000"]);
        assert!(result.is_err());
    }
}
