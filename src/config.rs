//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or through its `GQA_*` environment
//! variable; the flag wins when both are set.

use clap::Parser;

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "quick-actions",
    about = "Runs GitHub quick actions (/label, /assign, ...) from webhook deliveries",
    version
)]
pub struct Config {
    #[arg(
        long,
        env = "GQA_LISTEN_ADDR",
        default_value = "127.0.0.1:3000",
        help = "Address the webhook server binds to (host:port)"
    )]
    pub listen_addr: String,

    #[arg(
        long,
        env = "GQA_LISTEN_PATH",
        default_value = "/api/v1/webhook",
        value_parser = parse_listen_path,
        help = "HTTP path receiving GitHub webhook deliveries"
    )]
    pub listen_path: String,

    #[arg(
        long,
        env = "GQA_LOG_LEVEL",
        default_value = "info",
        help = "Tracing filter directive (e.g. \"debug\" or \"quick_actions=trace\"); RUST_LOG takes precedence"
    )]
    pub log_level: String,
}

fn parse_listen_path(raw: &str) -> Result<String, String> {
    if !raw.starts_with('/') {
        return Err(format!("listen path must start with '/', got '{raw}'"));
    }
    if raw.contains(char::is_whitespace) {
        return Err(format!("listen path must not contain whitespace, got '{raw}'"));
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["quick-actions"]).unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:3000");
        assert_eq!(config.listen_path, "/api/v1/webhook");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "quick-actions",
            "--listen-addr",
            "0.0.0.0:8080",
            "--listen-path",
            "/hooks/github",
            "--log-level",
            "quick_actions=debug",
        ])
        .unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.listen_path, "/hooks/github");
        assert_eq!(config.log_level, "quick_actions=debug");
    }

    #[test]
    fn relative_listen_path_is_rejected() {
        let err = Config::try_parse_from(["quick-actions", "--listen-path", "webhook"]).unwrap_err();
        assert!(err.to_string().contains("must start with '/'"), "{err}");
    }

    #[test]
    fn listen_path_validation() {
        assert_eq!(parse_listen_path("/"), Ok("/".to_string()));
        assert!(parse_listen_path("").is_err());
        assert!(parse_listen_path("/a b").is_err());
    }

    #[test]
    fn command_definition_is_valid() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
