// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

// Diagnostic switches. None of these change what the library computes; they only decide whether
// progress, messages and warnings get logged.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde_json::Value;

use crate::errors::SeqError;

pub const ENV_PROGRESS: &str = "FASTASEQ_PROGRESS";
pub const ENV_MESSAGES: &str = "FASTASEQ_MESSAGES";
pub const ENV_WARNINGS: &str = "FASTASEQ_WARNINGS";
pub const ENV_CLEAN_RAW_DATA: &str = "FASTASEQ_CLEAN_RAW_DATA";

const CONFIG_FILE_NAME: &str = ".fastaseqconfig";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Verbosity {
    pub progress: bool,
    pub messages: bool,
    pub warnings: bool,
    // Report characters dropped while normalizing raw sequence text.
    pub clean_raw_data: bool,
}

impl Verbosity {
    pub fn quiet() -> Self {
        Verbosity::default()
    }

    pub fn from_env() -> Self {
        Verbosity::default().merge_env()
    }

    /// Overrides each flag for which the corresponding environment variable is set. Only "true"
    /// and "false" (any case) are recognized; anything else leaves the flag as it was.
    pub fn merge_env(mut self) -> Self {
        let lookup = |key: &str| env::var(key).ok().and_then(|v| parse_flag(&v));
        if let Some(b) = lookup(ENV_PROGRESS) {
            self.progress = b;
        }
        if let Some(b) = lookup(ENV_MESSAGES) {
            self.messages = b;
        }
        if let Some(b) = lookup(ENV_WARNINGS) {
            self.warnings = b;
        }
        if let Some(b) = lookup(ENV_CLEAN_RAW_DATA) {
            self.clean_raw_data = b;
        }
        self
    }

    pub fn from_value(value: &Value) -> Self {
        let flag = |key: &str| match value.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => parse_flag(s).unwrap_or(false),
            _ => false,
        };
        Verbosity {
            progress: flag("progress"),
            messages: flag("messages"),
            warnings: flag("warnings"),
            clean_raw_data: flag("clean_raw_data"),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SeqError> {
        let text = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)?;
        if !value.is_object() {
            return Err(SeqError::Config(String::from(
                "expected a JSON object at top level",
            )));
        }
        Ok(Verbosity::from_value(&value))
    }

    /// Most permissive log level these flags ask for.
    pub fn log_level(&self) -> LevelFilter {
        if self.progress || self.messages {
            LevelFilter::Info
        } else if self.warnings {
            LevelFilter::Warn
        } else {
            LevelFilter::Error
        }
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

pub fn find_config() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        let path = PathBuf::from(home).join(CONFIG_FILE_NAME);
        if path.exists() {
            return Some(path);
        }
    }
    if let Ok(cwd) = env::current_dir() {
        let path = cwd.join(CONFIG_FILE_NAME);
        if path.exists() {
            return Some(path);
        }
    }
    None
}
