//! Browser console backend for the `log` facade. Stands in for `env_logger`,
//! which has no wasm target.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

/// `log` backend writing to the browser console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format_record(
            record.level(),
            record.target(),
            &record.args().to_string(),
        ));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Installs the console logger. A second call is a no-op.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// `?debug=true` in the page URL turns on debug output.
pub fn level_from_query(search: &str) -> LevelFilter {
    let debug = search
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair == "debug=true");
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("[{level} {target}] {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_in_query_enables_debug() {
        assert_eq!(level_from_query("?debug=true"), LevelFilter::Debug);
        assert_eq!(level_from_query("?a=1&debug=true"), LevelFilter::Debug);
        assert_eq!(level_from_query(""), LevelFilter::Info);
        assert_eq!(level_from_query("?debug=false"), LevelFilter::Info);
        assert_eq!(level_from_query("?nodebug=true"), LevelFilter::Info);
    }

    #[test]
    fn record_format_carries_level_and_target() {
        assert_eq!(
            format_record(Level::Warn, "md_preview::prefs", "quota exceeded"),
            "[WARN md_preview::prefs] quota exceeded"
        );
    }
}
