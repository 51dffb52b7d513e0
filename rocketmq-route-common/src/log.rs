// Copyright 2023 The RocketMQ Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::str::FromStr;

/// Initializes the logger with the specified configuration.
///
/// Reads the log level from the `RUST_LOG` environment variable, defaulting to "INFO" if it is
/// unset or not a level name. Thread names, levels, line numbers and thread ids are included in
/// the output. Calling it again after a subscriber is installed is a no-op.
pub fn init_logger() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|value| Level::parse(value.as_str()))
        .unwrap_or(Level::INFO);
    init_logger_with_level(level);
}

pub fn init_logger_with_level(level: Level) {
    let max_level = tracing::Level::from_str(level.as_str()).unwrap_or(tracing::Level::INFO);
    let _ = tracing_subscriber::fmt()
        .with_thread_names(true)
        .with_level(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_max_level(max_level)
        .try_init();
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Level(&'static str);

impl Level {
    /// Constant representing the ERROR log level.
    pub const ERROR: Level = Level("ERROR");

    /// Constant representing the WARN log level.
    pub const WARN: Level = Level("WARN");

    /// Constant representing the INFO log level.
    pub const INFO: Level = Level("INFO");

    /// Constant representing the DEBUG log level.
    pub const DEBUG: Level = Level("DEBUG");

    /// Constant representing the TRACE log level.
    pub const TRACE: Level = Level("TRACE");

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Case-insensitive lookup of a level name.
    pub fn parse(level: &str) -> Option<Level> {
        match level.trim().to_ascii_uppercase().as_str() {
            "ERROR" => Some(Level::ERROR),
            "WARN" => Some(Level::WARN),
            "INFO" => Some(Level::INFO),
            "DEBUG" => Some(Level::DEBUG),
            "TRACE" => Some(Level::TRACE),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_as_str_returns_correct_value() {
        assert_eq!(Level::ERROR.as_str(), "ERROR");
        assert_eq!(Level::WARN.as_str(), "WARN");
        assert_eq!(Level::INFO.as_str(), "INFO");
        assert_eq!(Level::DEBUG.as_str(), "DEBUG");
        assert_eq!(Level::TRACE.as_str(), "TRACE");
    }

    #[test]
    fn level_parse_is_case_insensitive() {
        assert_eq!(Level::parse("error"), Some(Level::ERROR));
        assert_eq!(Level::parse(" Warn "), Some(Level::WARN));
        assert_eq!(Level::parse("DEBUG"), Some(Level::DEBUG));
        assert_eq!(Level::parse("verbose"), None);
    }

    #[test]
    fn level_display_formats_correctly() {
        assert_eq!(format!("{}", Level::INFO), "INFO");
        assert_eq!(format!("{:>6}", Level::WARN), "  WARN");
    }

    #[test]
    fn init_logger_twice_does_not_panic() {
        init_logger_with_level(Level::DEBUG);
        init_logger();
    }
}
