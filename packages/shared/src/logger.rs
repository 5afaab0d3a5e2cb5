//! Logging setup shared by the Hiroba binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the binary itself and every `hiroba_*` crate of the
/// workspace. It can be overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "hiroba-server", "hiroba-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use hiroba_shared::logger::setup_logger;
///
/// setup_logger("hiroba-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default filter directive used when `RUST_LOG` is not set.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    format!(
        "hiroba_shared={level},hiroba_server={level},hiroba_client={level},{binary}={level},tower_http={level}",
        level = default_log_level,
        binary = binary_target,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_contains_workspace_crates() {
        // テスト項目: デフォルトのフィルタにワークスペースの全クレートが含まれる
        // given (前提条件):
        let binary_name = "hiroba-server";

        // when (操作):
        let filter = default_filter(binary_name, "debug");

        // then (期待する結果):
        assert!(filter.contains("hiroba_shared=debug"));
        assert!(filter.contains("hiroba_server=debug"));
        assert!(filter.contains("hiroba_client=debug"));
        assert!(filter.contains("tower_http=debug"));
    }

    #[test]
    fn test_default_filter_normalizes_binary_name() {
        // テスト項目: バイナリ名のハイフンがアンダースコアに変換される
        // given (前提条件):
        let binary_name = "hiroba-client";

        // when (操作):
        let filter = default_filter(binary_name, "info");

        // then (期待する結果):
        assert!(filter.ends_with("hiroba_client=info,tower_http=info"));
        assert!(!filter.contains("hiroba-client"));
    }
}
