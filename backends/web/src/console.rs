//! Browser console output for diagnostics.

use std::io::{self, Write};

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::writer::MakeWriter;
use wasm_bindgen::JsValue;

/// Enables diagnostics in the browser: panics go to `console.error`, and `tracing`
/// events go to the console method matching their level. Idempotent.
pub fn init_diagnostics(level: Option<&str>) {
    console_error_panic_hook::set_once();
    demohost::debug::init_diagnostics_with(ConsoleWriter, level);
}

/// [`MakeWriter`] emitting one console call per formatted event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleWriter;

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleLine::new(*meta.level())
    }
}

/// Buffers a single event and flushes it to the console when dropped.
#[derive(Debug)]
pub struct ConsoleLine {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleLine {
    const fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.buffer).trim_end().to_owned()
    }
}

impl Write for ConsoleLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = JsValue::from_str(&self.text());
        match self.level {
            Level::ERROR => web_sys::console::error_1(&text),
            Level::WARN => web_sys::console::warn_1(&text),
            Level::INFO => web_sys::console::info_1(&text),
            Level::DEBUG => web_sys::console::debug_1(&text),
            _ => web_sys::console::log_1(&text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_accumulate_until_dropped() {
        let mut line = ConsoleLine::new(Level::WARN);
        line.write_all(b"WARN demohost: ").expect("buffered");
        line.write_all(b"rejected unsupported demo\n").expect("buffered");
        assert_eq!(line.text(), "WARN demohost: rejected unsupported demo");
        // Leave the buffer empty so dropping does not touch the console.
        line.buffer.clear();
    }
}
