use crate::errors::CliError;
use crate::GlobalOpts;
use bldr_config::HostConfig;
use bldr_manifest::ManifestSynchronizer;

/// Everything a manifest-mutating command needs, loaded once per invocation
pub struct HookContext {
    pub synchronizer: ManifestSynchronizer,
}

impl HookContext {
    pub fn load(opts: &GlobalOpts) -> Result<Self, CliError> {
        let config = HostConfig::load()?;
        let synchronizer = ManifestSynchronizer::new(opts.loader_config(&config));

        Ok(HookContext { synchronizer })
    }
}
