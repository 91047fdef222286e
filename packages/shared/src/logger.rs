//! Logging setup utilities for the Hanare binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for the given targets.
///
/// Every target gets the same level, e.g. `hanare_server=debug,tower_http=debug`.
/// Hyphens are replaced because tracing targets use the Rust crate name.
pub fn default_directive(targets: &[&str], default_log_level: &str) -> String {
    targets
        .iter()
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `targets` - Crate and binary names to enable (e.g. `["hanare-server", "tower_http"]`)
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use hanare_shared::logger::setup_logger;
///
/// setup_logger(&["hanare-server", "tower_http"], "debug");
/// ```
pub fn setup_logger(targets: &[&str], default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(targets, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_joins_targets() {
        // テスト項目: 複数のターゲットが同じレベルで結合される
        // given (前提条件):
        let targets = ["hanare-server", "hanare_shared"];

        // when (操作):
        let directive = default_directive(&targets, "debug");

        // then (期待する結果):
        assert_eq!(directive, "hanare_server=debug,hanare_shared=debug");
    }

    #[test]
    fn test_default_directive_with_no_targets() {
        // テスト項目: ターゲットが空の場合、空文字列になる
        // given (前提条件):
        let targets: [&str; 0] = [];

        // when (操作):
        let directive = default_directive(&targets, "info");

        // then (期待する結果):
        assert!(directive.is_empty());
    }
}
