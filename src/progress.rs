//! Console status output for the installer

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Status lines and download progress for one run
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print one status line for a pipeline stage.
    pub fn step(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", Style::new().bold().cyan().apply_to("::"), message);
        }
    }

    /// Print the final success line.
    pub fn done(&self, message: &str) {
        if !self.quiet {
            println!(
                "{} {}",
                Style::new().bold().green().apply_to("ok"),
                message
            );
        }
    }

    /// Progress bar for the archive download. Byte-accurate when the
    /// server reports a length, a plain spinner otherwise.
    pub fn download_bar(&self, total_bytes: Option<u64>) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        match total_bytes {
            Some(len) => {
                let style = ProgressStyle::default_bar()
                    .template("  [{bar:40.cyan/blue}] {bytes}/{total_bytes}")
                    .unwrap()
                    .progress_chars("#>-");
                let pb = ProgressBar::new(len);
                pb.set_style(style);
                pb
            }
            None => {
                let style = ProgressStyle::default_spinner()
                    .template("  {spinner} {bytes}")
                    .unwrap();
                let pb = ProgressBar::new_spinner();
                pb.set_style(style);
                pb
            }
        }
    }
}
