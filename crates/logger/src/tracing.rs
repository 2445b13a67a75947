use tracing::level_filters::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_subscriber::filter;
use tracing_subscriber::fmt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;
use tracing_subscriber::{self, layer::SubscriberExt};

fn env_filter() -> filter::EnvFilter {
    filter::EnvFilter::builder()
        .with_regex(true)
        .try_from_env()
        .unwrap_or_else(|_| {
            filter::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .parse_lossy("")
        })
}

/// Filter with `RUST_LOG`, for example `RUST_LOG=adhan=debug,info` logs
/// everything from the decision loop at debug and the rest at info. Without
/// `RUST_LOG` everything at info or above is logged.
///
/// # Note
/// If the service runs under systemd it logs to the journal. Then the
/// standard journald CODE_LINE and CODE_FILE fields are emitted, read them
/// with: `journalctl -fu adhan --output-fields=CODE_FILE,CODE_LINE,MESSAGE -o cat`
pub fn setup() {
    let fmt = fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(true);

    let registry =
        tracing_subscriber::Registry::default().with(ErrorLayer::default());

    if !libsystemd::logging::connected_to_journal() {
        registry.with(fmt.with_filter(env_filter())).init();
        tracing::info!("Started logging & tracing to stderr");
        return;
    }

    match tracing_journald::layer() {
        Ok(journal) => {
            registry.with(journal.with_filter(env_filter())).init();
            tracing::info!("Started logging & tracing to journald");
        }
        Err(err) => {
            registry.with(fmt.with_filter(env_filter())).init();
            tracing::error!(
                "Could not log to journald directly. Logging to stderr \
                as fallback. Error connecting to journald:: {err}"
            );
        }
    }
}

pub fn setup_for_tests() {
    use std::sync::Once;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        color_eyre::install().unwrap();

        let test_subscriber = fmt::layer()
            .with_test_writer()
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .with_ansi(true)
            .pretty()
            .with_filter(filter::EnvFilter::from_default_env());
        tracing_subscriber::registry()
            .with(test_subscriber)
            .with(ErrorLayer::default())
            .init();
    })
}
