// File I/O for generated server configs

pub mod error;
pub mod files;
pub mod ini;

pub use error::{ExportIoError, IniError};
pub use files::{read_config, read_file_as_utf8, read_sections, write_config};
