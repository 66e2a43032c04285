//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "creator-proxy")]
#[command(about = "Comment reply and thumbnail generation proxy")]
pub struct CliOptions {
    /// Enable debug logging.
    #[arg(long, env = "CREATOR_PROXY_DEBUG")]
    pub debug: bool,

    /// Listen address.
    #[arg(long, short, default_value = "127.0.0.1", env = "CREATOR_PROXY_LISTEN_ADDRESS")]
    pub listen_address: String,

    /// HTTP port.
    #[arg(long, short, default_value = "3000", env = "CREATOR_PROXY_PORT")]
    pub port: NonZeroU16,

    /// Directory holding generated images and thumbnails.
    #[arg(long, short, default_value = "uploads", env = "CREATOR_PROXY_UPLOADS_DIR")]
    pub uploads_dir: PathBuf,
}
