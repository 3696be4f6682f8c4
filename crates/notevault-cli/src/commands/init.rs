use std::path::PathBuf;

use notevault_core::KeyManager;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{
    default_backup_dir, default_key_path, default_store_path, write_config, NotevaultConfig,
};
use crate::errors::CliError;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        ))
        .into());
    }

    let store_path = match &ctx.cli().store {
        Some(path) => PathBuf::from(path),
        None => default_store_path()?,
    };
    let key_path = match &args.key_path {
        Some(path) => PathBuf::from(path),
        None => default_key_path()?,
    };
    let backup_dir = match &args.backup_dir {
        Some(dir) => PathBuf::from(dir),
        None => default_backup_dir()?,
    };

    let keys = KeyManager::new(&key_path);
    keys.ensure_key()?;

    let config = NotevaultConfig::new(
        store_path.clone(),
        key_path.clone(),
        Some(backup_dir),
        args.max_backups.unwrap_or(0),
    );
    write_config(&config_path, &config)?;

    if !ctx.quiet() {
        println!("Initialized notevault");
        println!("  config: {}", config_path.display());
        println!("  store:  {}", store_path.display());
        println!("  key:    {}", key_path.display());
        println!();
        println!("Keep a copy of the key file somewhere safe; notes cannot be read without it.");
    }
    Ok(())
}
