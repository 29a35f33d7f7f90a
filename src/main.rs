//! tpdf-install - bootstrap installer for the tpdf terminal PDF viewer
//!
//! One-shot sequential pipeline: identify the host platform, resolve the
//! newest published release, derive the archive address, download and
//! install the executable, then check PATH and print guidance if needed.
//! The first error aborts the run with a single diagnostic on stderr.

use clap::Parser;

mod advisor;
mod artifact;
mod cli;
mod error;
mod fetch;
mod platform;
mod progress;
mod release;
mod scratch;
mod target;

use cli::Cli;
use error::Result;
use platform::Platform;
use progress::Reporter;
use target::InstallTarget;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let reporter = Reporter::new(cli.quiet);

    let platform = Platform::current()?;
    reporter.step(&format!("Host platform: {platform}"));

    // Fail on a missing HTTP capability before touching the network
    let client = release::http_client()?;

    let version = match cli.tag {
        Some(tag) => tag,
        None => {
            reporter.step(&format!("Resolving latest release of {}", cli.repo));
            release::latest_tag(&client, &cli.repo)?
        }
    };

    let artifact = artifact::locate(&cli.repo, &platform, &version);
    let target = InstallTarget::resolve(cli.install_dir)?;

    reporter.step(&format!("Downloading {}", artifact.download_url));
    let installed = fetch::run(
        &client,
        &artifact,
        &target,
        cli.sha256.as_deref(),
        &reporter,
    )?;
    reporter.done(&format!("Installed tpdf {} at {}", version, installed.display()));

    if let Some(line) = advisor::advise(&target.directory) {
        println!();
        println!(
            "{} is not on your PATH. To run tpdf from anywhere:",
            target.directory.display()
        );
        println!("  {line}");
    }

    Ok(())
}
