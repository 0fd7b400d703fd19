//! Process-wide log and span output for the `chatrelay` binary.
//!
//! Log lines go to stdout through a `fmt` layer. With `--otel` (or
//! `CHATRELAY_OTEL`) spans such as the per-request `chat` span are also
//! exported through OpenTelemetry's stdout exporter.

use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const TRACER_NAME: &str = "chatrelay";

static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// Log filter for this process: `RUST_LOG` if it parses, else `default_directive`.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    filter_from(std::env::var("RUST_LOG").ok().as_deref(), default_directive)
}

fn filter_from(rust_log: Option<&str>, default_directive: &str) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive))
}

/// Install the global subscriber.
///
/// `default_directive` comes from the CLI verbosity flags. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(
    default_directive: &str,
    enable_otel: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let otel_layer = enable_otel.then(|| {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer(TRACER_NAME);
        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);
        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    tracing_subscriber::registry()
        .with(env_filter(default_directive))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(otel_layer)
        .try_init()?;

    Ok(())
}

/// Flush exported spans before exit. Does nothing unless OTel was enabled.
pub fn shutdown_tracing() {
    let Some(provider) = TRACER_PROVIDER.get() else {
        return;
    };
    if let Err(e) = provider.shutdown() {
        eprintln!("chatrelay: failed to flush OpenTelemetry spans: {e}");
    }
}
