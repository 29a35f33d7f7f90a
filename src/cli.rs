//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

/// tpdf-install - bootstrap installer for the tpdf terminal PDF viewer
#[derive(Parser, Debug)]
#[command(
    name = "tpdf-install",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Download and install the latest tpdf release",
    long_about = "Identifies the host platform, resolves the newest published tpdf release, \
                  downloads the matching prebuilt archive and places the executable in a \
                  user-local bin directory. If that directory is not on PATH, prints the one \
                  line of shell configuration to add it.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  tpdf-install\n    \
                  tpdf-install --install-dir ~/bin\n    \
                  tpdf-install --tag v1.2.0\n    \
                  tpdf-install --sha256 2c26b46b68ffc68ff99b453c1d30413413422d706483bfa0f98a5e886266e7ae\n\n\
                  \x1b[1m\x1b[32mDocumentation:\x1b[0m\n    \
                  https://github.com/IWhitebird/tpdf"
)]
pub struct Cli {
    /// Install directory (defaults to the user-local bin directory)
    #[arg(long, short = 'd', env = "TPDF_INSTALL_DIR", value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// GitHub repository publishing the release archives
    #[arg(long, value_name = "OWNER/REPO", default_value = "IWhitebird/tpdf")]
    pub repo: String,

    /// Install a specific release tag instead of the latest
    #[arg(long, value_name = "TAG")]
    pub tag: Option<String>,

    /// Expected SHA-256 of the release archive, verified before unpacking
    #[arg(long, value_name = "HEX")]
    pub sha256: Option<String>,

    /// Suppress status output (diagnostics and PATH guidance still print)
    #[arg(long, short = 'q')]
    pub quiet: bool,
}
