use crate::cli::LogFormat;
use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

pub type BoxedSubscriber = Box<dyn Subscriber + Send + Sync + 'static>;

/// Builds the subscriber for the whole process.
///
/// `RUST_LOG` wins over `default_level` when it is set. Nothing is installed
/// here; see [`install`].
pub fn build_subscriber<Sink>(
    default_level: &str,
    format: LogFormat,
    sink: Sink,
) -> anyhow::Result<BoxedSubscriber>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)?,
    };
    let registry = Registry::default().with(env_filter);

    let subscriber: BoxedSubscriber = match format {
        LogFormat::Plain => Box::new(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(sink),
            ),
        ),
        LogFormat::Json => Box::new(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_writer(sink),
            ),
        ),
    };

    Ok(subscriber)
}

/// Installs `subscriber` as the process-wide default and routes `log`
/// records (emitted by sqlx) into it. Call once, from `main`.
pub fn install(subscriber: BoxedSubscriber) -> anyhow::Result<()> {
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn json_format_emits_structured_fields() {
        let capture = Capture::default();
        let subscriber = build_subscriber("info", LogFormat::Json, capture.clone()).unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(code = "abc12345", "created short url");
        });

        let line = capture.contents();
        let event: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(event["code"], "abc12345");
        assert_eq!(event["message"], "created short url");
    }

    #[test]
    fn plain_format_respects_level() {
        let capture = Capture::default();
        let subscriber = build_subscriber("warn", LogFormat::Plain, capture.clone()).unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("hidden");
            tracing::warn!("shown");
        });

        let output = capture.contents();
        assert!(output.contains("shown"));
        assert!(!output.contains("hidden"));
    }
}
