//! # Output configuration
//!
//! Column layout, pagination, and comment verbosity for the rendering
//! engine. Owned by the front end; the engine only reads it.

use std::fmt;

/// Smallest usable page length when pagination is enabled (the page
/// header alone occupies five lines)
pub const MIN_PAGE_LENGTH: u32 = 8;

/// Rendering configuration
///
/// Columns are 1-based, matching the engine's column counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Column of the directive/opcode mnemonic
    pub mnemonic_col: u32,
    /// Column of the operand/argument list
    pub arg_col: u32,
    /// Column of the trailing comment
    pub comment_col: u32,
    /// Column of the ASCII dump inside trailing comments
    pub text_col: u32,
    /// Labels whose text ends past this column force a line break
    pub label_break: u32,
    /// Lines per page; 0 disables pagination
    pub page_length: u32,
    /// Emit a form feed on page breaks
    pub form_feeds: bool,
    /// Render forward-label offsets in hex rather than decimal
    pub use_hex_offs: bool,
    /// Trailing comment verbosity (0-4)
    pub comments: u8,
    /// Input file name shown in the page header
    pub input_file: String,
    /// Creation timestamp shown in the page header, supplied by the driver
    pub created: String,
}

impl Config {
    /// Default layout: mnemonics at 9, arguments at 17, comments at 49,
    /// ASCII dump at 81, label break at 20, pagination off.
    pub const DEFAULT: Self = Self {
        mnemonic_col: 9,
        arg_col: 17,
        comment_col: 49,
        text_col: 81,
        label_break: 20,
        page_length: 0,
        form_feeds: false,
        use_hex_offs: false,
        comments: 0,
        input_file: String::new(),
        created: String::new(),
    };

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mnemonic_col == 0
            || self.arg_col == 0
            || self.comment_col == 0
            || self.text_col == 0
            || self.label_break == 0
        {
            return Err(ConfigError::ZeroColumn);
        }

        // The engine indents left-to-right through these stops; they
        // must be strictly ascending up to the comment column.
        if self.mnemonic_col >= self.arg_col
            || self.arg_col >= self.comment_col
            || self.comment_col > self.text_col
        {
            return Err(ConfigError::UnorderedColumns);
        }

        if self.comments > 4 {
            return Err(ConfigError::InvalidVerbosity);
        }

        if self.page_length != 0 && self.page_length < MIN_PAGE_LENGTH {
            return Err(ConfigError::InvalidPageLength);
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ cols: {}/{}/{}/{}, break: {}, page: {}, comments: {} }}",
            self.mnemonic_col,
            self.arg_col,
            self.comment_col,
            self.text_col,
            self.label_break,
            self.page_length,
            self.comments,
        )
    }
}

/// Configuration error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Columns are 1-based; 0 is not a position
    ZeroColumn,
    /// Column stops must ascend: mnemonic < arg < comment <= text
    UnorderedColumns,
    /// Comment verbosity must be in range [0, 4]
    InvalidVerbosity,
    /// Page length must be 0 (off) or at least MIN_PAGE_LENGTH
    InvalidPageLength,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroColumn => {
                write!(f, "columns are 1-based and must be nonzero")
            }
            ConfigError::UnorderedColumns => {
                write!(f, "column stops must ascend: mnemonic < arg < comment <= text")
            }
            ConfigError::InvalidVerbosity => {
                write!(f, "comment verbosity must be in range [0, 4]")
            }
            ConfigError::InvalidPageLength => {
                write!(
                    f,
                    "page length must be 0 or at least {} lines",
                    MIN_PAGE_LENGTH
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.mnemonic_col, 9);
        assert_eq!(config.arg_col, 17);
        assert_eq!(config.comment_col, 49);
        assert_eq!(config.text_col, 81);
        assert_eq!(config.label_break, 20);
        assert_eq!(config.page_length, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.comments = 4;
        assert!(config.validate().is_ok());

        config.comments = 5;
        assert_eq!(config.validate().unwrap_err(), ConfigError::InvalidVerbosity);

        let mut config = Config::default();
        config.arg_col = 9;
        assert_eq!(config.validate().unwrap_err(), ConfigError::UnorderedColumns);

        let mut config = Config::default();
        config.mnemonic_col = 0;
        assert_eq!(config.validate().unwrap_err(), ConfigError::ZeroColumn);

        let mut config = Config::default();
        config.page_length = 4;
        assert_eq!(config.validate().unwrap_err(), ConfigError::InvalidPageLength);

        config.page_length = MIN_PAGE_LENGTH;
        assert!(config.validate().is_ok());
    }
}
