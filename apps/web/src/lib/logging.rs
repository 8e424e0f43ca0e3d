//! Console logging for the browser build. Events go through `tracing` and are
//! written to the devtools console; the level comes from `GATEHOUSE_LOG_LEVEL`
//! at build time. Never log credentials, tokens or full gateway responses.

use tracing::Level;

const DEFAULT_LEVEL: Level = Level::INFO;

/// Parses a log level name or number (0 = error .. 4 = trace).
pub fn parse_level(value: &str) -> Option<Level> {
    let value = value.trim();
    if let Ok(parsed) = value.parse::<u8>() {
        return match parsed {
            0 => Some(Level::ERROR),
            1 => Some(Level::WARN),
            2 => Some(Level::INFO),
            3 => Some(Level::DEBUG),
            4 => Some(Level::TRACE),
            _ => None,
        };
    }

    match value.to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Level selected at build time, falling back to `info`.
pub fn configured_level() -> Level {
    option_env!("GATEHOUSE_LOG_LEVEL")
        .and_then(parse_level)
        .unwrap_or(DEFAULT_LEVEL)
}

/// Installs the panic hook and the console subscriber. Safe to call once at startup.
#[cfg(target_arch = "wasm32")]
pub fn init() {
    console_error_panic_hook::set_once();

    let subscriber = tracing_subscriber::fmt()
        .with_writer(console::MakeConsoleWriter)
        .with_max_level(configured_level())
        .with_ansi(false)
        .without_time()
        .with_target(true)
        .finish();

    // A second init (hot reload) keeps the first subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;
    use tracing_subscriber::fmt::MakeWriter;

    pub struct MakeConsoleWriter;

    /// Buffers one formatted event and flushes it to `console.log` on drop.
    pub struct ConsoleLine(Vec<u8>);

    impl io::Write for ConsoleLine {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleLine {
        fn drop(&mut self) {
            if self.0.is_empty() {
                return;
            }
            let line = String::from_utf8_lossy(&self.0);
            web_sys::console::log_1(&line.trim_end().into());
        }
    }

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleLine;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleLine(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_level;
    use tracing::Level;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(parse_level("DEBUG"), Some(Level::DEBUG));
        assert_eq!(parse_level(" warn "), Some(Level::WARN));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn parses_numeric_levels() {
        assert_eq!(parse_level("0"), Some(Level::ERROR));
        assert_eq!(parse_level("4"), Some(Level::TRACE));
        assert_eq!(parse_level("9"), None);
    }
}
