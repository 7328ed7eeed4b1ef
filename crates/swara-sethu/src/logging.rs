use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "swara_sethu=info,swara_sethu_core=info,tower_http=info";

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub(crate) fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
