//! Manual maintenance of the block manifest

use crate::commands::report_outcome;
use crate::context::HookContext;
use crate::errors::CliError;
use crate::GlobalOpts;
use bldr_config::HostConfig;
use bldr_logger as logger;
use bldr_manifest::{BlockManifest, PackageRef};
use colored::Colorize;

pub fn register_block(
    package: String,
    class: String,
    opts: &GlobalOpts,
) -> Result<(), CliError> {
    let ctx = HookContext::load(opts)?;
    let package = PackageRef::new(package).with_block_class(class);
    let outcome = ctx.synchronizer.register(&package)?;
    report_outcome(&outcome, true);
    Ok(())
}

pub fn unregister_block(
    package: String,
    class: String,
    opts: &GlobalOpts,
) -> Result<(), CliError> {
    let ctx = HookContext::load(opts)?;
    let package = PackageRef::new(package).with_block_class(class);
    let outcome = ctx.synchronizer.unregister(&package)?;
    report_outcome(&outcome, false);
    Ok(())
}

/// Print registered blocks in manifest order, one per line
pub fn list_blocks(opts: &GlobalOpts) -> Result<(), CliError> {
    let config = HostConfig::load()?;
    let loader = opts.loader_config(&config);
    let manifest = BlockManifest::load_from_path(loader.manifest_path())?;

    if manifest.is_empty() {
        if opts.verbosity_level() > 0 {
            eprintln!("  {}", "(no blocks registered)".yellow());
        }
        return Ok(());
    }

    for entry in manifest.entries() {
        println!("{}", entry);
    }
    logger::debug(&format!(
        "{} block(s) in {}",
        manifest.len(),
        loader.manifest_path().display()
    ));
    Ok(())
}

pub fn show_manifest_path(opts: &GlobalOpts) -> Result<(), CliError> {
    let config = HostConfig::load()?;
    println!("{}", opts.loader_config(&config).manifest_path().display());
    Ok(())
}
