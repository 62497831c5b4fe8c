//! Stderr log helpers and the gated logger behind `--verbose`.

pub fn log_error(msg: &str) {
    eprintln!("Error: {}", msg);
}

pub fn log_warning(msg: &str) {
    eprintln!("Warning: {}", msg);
}

/// Logger that only emits when `--verbose` was passed.
pub struct VerboseLogger {
    enabled: bool,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn log(&self, msg: &str) {
        if self.enabled {
            println!("Verbose: {}", msg);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
