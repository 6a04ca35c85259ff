//! Command-line interfaces of both binaries.

pub mod args;

pub use args::{DownloaderArgs, SubtitleArgs};
