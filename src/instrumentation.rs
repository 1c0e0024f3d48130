use tracing_chrome::{ChromeLayerBuilder, FlushGuard};
use tracing_subscriber::{filter::LevelFilter, prelude::*};

/// Install the global tracing subscriber.
///
/// With `trace` the spans are recorded for chrome://tracing or https://ui.perfetto.dev/. Make
/// sure to store the returned guard in a variable in the scope to be instrumented, otherwise the
/// trace will be disabled immediately.
///
/// With `verbose` debug events are logged to stderr, otherwise only warnings are.
pub fn init(trace: bool, verbose: bool) -> Option<FlushGuard> {
    let (chrome_layer, guard) = if trace {
        let (layer, guard) = ChromeLayerBuilder::new().build();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(chrome_layer)
        .with(fmt_layer)
        .init();

    guard
}
