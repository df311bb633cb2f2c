use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `ERRNO_TABLE_TEST_LOG` is unset: parser skips are logged at trace.
const DEFAULT_TEST_FILTER: &str = "errno_table=trace,info";

static LOGGING: OnceLock<()> = OnceLock::new();

/// Install JSON test logging once per test binary.
pub fn init_test_logging() {
    LOGGING.get_or_init(|| {
        let directive = std::env::var("ERRNO_TABLE_TEST_LOG")
            .unwrap_or_else(|_| DEFAULT_TEST_FILTER.to_string());
        let filter = EnvFilter::try_new(&directive)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .with_test_writer()
                    .with_file(true)
                    .with_line_number(true)
                    .with_current_span(false),
            )
            .with(filter)
            .try_init();
    });
}

/// Listing fixtures under `tests/fixtures/`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> &'static str {
    const FIXTURES: &[(&str, &str)] = &[
        (
            "errno_list_linux.txt",
            include_str!("../fixtures/errno_list_linux.txt"),
        ),
        (
            "errno_list_noisy.txt",
            include_str!("../fixtures/errno_list_noisy.txt"),
        ),
    ];

    FIXTURES
        .iter()
        .find(|(fixture_name, _)| *fixture_name == name)
        .map(|(_, contents)| *contents)
        .unwrap_or_else(|| panic!("unknown listing fixture: {name}"))
}
