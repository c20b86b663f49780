//! Bootstrap configuration.
//!
//! All values are compile-time defaults; the bridge reads no environment
//! variables and no files.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Component tag used for every diagnostic record.
pub const DEFAULT_COMPONENT_TAG: &str = "AppUpdater";
/// Message emitted when a load notification arrives.
pub const DEFAULT_LOAD_MESSAGE: &str = "JNI_OnLoad called! Initializing native modules...";
/// Message emitted when an unload notification arrives.
pub const DEFAULT_UNLOAD_MESSAGE: &str = "JNI_OnUnload called! Native modules released.";

/// Static settings for one bootstrap bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    pub component_tag: String,
    pub load_message: String,
    pub unload_message: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            component_tag: DEFAULT_COMPONENT_TAG.to_string(),
            load_message: DEFAULT_LOAD_MESSAGE.to_string(),
            unload_message: DEFAULT_UNLOAD_MESSAGE.to_string(),
        }
    }
}

impl BootstrapConfig {
    pub fn with_component_tag(mut self, tag: impl Into<String>) -> Self {
        self.component_tag = tag.into();
        self
    }

    pub fn with_load_message(mut self, message: impl Into<String>) -> Self {
        self.load_message = message.into();
        self
    }

    pub fn with_unload_message(mut self, message: impl Into<String>) -> Self {
        self.unload_message = message.into();
        self
    }

    /// Checks that the tag is usable as a log target.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tag = self.component_tag.trim();
        if tag.is_empty() {
            return Err(ConfigError::EmptyComponentTag);
        }
        if tag.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidComponentTag(tag.to_string()));
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyComponentTag,
    InvalidComponentTag(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyComponentTag => write!(f, "component tag cannot be empty"),
            Self::InvalidComponentTag(tag) => {
                write!(f, "component tag must not contain whitespace: `{tag}`")
            }
        }
    }
}

impl Error for ConfigError {}
