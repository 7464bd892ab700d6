use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// `PATHVIZ_LOG` or `RUST_LOG` override the configured level. A bare level
/// such as "debug" is scoped to this crate.
pub fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_env("PATHVIZ_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}

fn filter_directive(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("pathviz={}", level)
    }
}
