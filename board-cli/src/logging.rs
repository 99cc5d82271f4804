use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

const FALLBACK_LEVEL: &str = "warn";

/// Подключает вывод `tracing` в stderr.
///
/// `level` уже разрешён в [`Settings`](crate::settings::Settings):
/// `LOG_LEVEL`, затем `RUST_LOG`, затем `warn`.
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(filter_for(level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_uses_resolved_level() {
        assert_eq!(filter_for("info").to_string(), "info");
        assert_eq!(filter_for("board_cli=debug").to_string(), "board_cli=debug");
    }

    #[test]
    fn log_level_env_wins_over_rust_log() {
        let settings = crate::settings::Settings::from_lookup(|key| match key {
            "LOG_LEVEL" => Some("info".to_string()),
            "RUST_LOG" => Some("trace".to_string()),
            _ => None,
        })
        .expect("settings must parse");

        assert_eq!(filter_for(&settings.log_level).to_string(), "info");
    }

    #[test]
    fn invalid_level_falls_back_to_warn() {
        assert_eq!(filter_for("board_cli=loud").to_string(), FALLBACK_LEVEL);
    }
}
