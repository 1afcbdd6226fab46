//! Log output of a single diagram build.
//!
//! Lives in its own test binary because the logger is process-global.

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

use meshview::DiagramBuilder;

struct RecordingLogger {
    messages: Mutex<Vec<String>>,
}

impl Log for RecordingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.messages.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static LOGGER: RecordingLogger = RecordingLogger {
    messages: Mutex::new(Vec::new()),
};

#[test]
fn test_build_logs_construction_once() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Info);

    DiagramBuilder::default().build().unwrap();

    let messages = LOGGER.messages.lock().unwrap();
    let count = |message: &str| messages.iter().filter(|logged| *logged == message).count();
    assert_eq!(count("Constructing diagram"), 1);
    assert_eq!(count("Diagram constructed"), 1);
}
