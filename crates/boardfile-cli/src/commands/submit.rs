use std::path::Path;

use boardfile_core::SubmitOutcome;

use crate::cli::ChangeArgs;
use crate::commands::common::{prepare_manager, resolve_config};
use crate::error::CliError;

pub async fn run_submit(
    changes: &ChangeArgs,
    url: Option<String>,
    timeout: Option<u64>,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    let config = resolve_config(config_path, changes, url, timeout)?;
    if config.action_url.is_none() {
        return Err(CliError::MissingActionUrl);
    }

    let mut prepared = prepare_manager(config, changes)?;
    match prepared.manager.on_save_requested().await {
        Some(SubmitOutcome::Navigate(_)) => Ok(()),
        Some(SubmitOutcome::Completed) => {
            println!("Submitted");
            Ok(())
        }
        Some(SubmitOutcome::Alert(_)) => Err(CliError::SubmitRejected),
        None => Err(CliError::MissingActionUrl),
    }
}
