use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::{BackupLogic, BackupTarget};
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        dir,
        file,
        compress,
        force,
    } = cmd
    {
        let target = match (file, dir) {
            (Some(f), _) => BackupTarget::File(expand_tilde(f)),
            (None, Some(d)) => BackupTarget::Dir(expand_tilde(d)),
            (None, None) => BackupTarget::Dir(expand_tilde(&cfg.backup_dir)),
        };

        BackupLogic::backup(cfg, &target, *compress, *force)?;
    }

    Ok(())
}
