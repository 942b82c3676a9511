use cstemplate_config::{IniConfig, connection_config, delete_ids};
use cstemplate_core::{connect, disconnect};
use cstemplate_core::workflow::delete;
use tracing::{info, warn};

use crate::cli::DeleteArgs;
use crate::error::CliError;

pub async fn handle(config: &IniConfig, args: DeleteArgs) -> Result<(), CliError> {
    let ids = delete_ids(config, args.ids);
    let client = connect(&connection_config(config)?).await?;

    let mut out = std::io::stdout().lock();
    let result = delete(&client, &ids, &mut out).await;

    if let Err(err) = disconnect(&client).await {
        warn!(error = %err, "logout failed");
    }

    let summary = result?;
    info!(processed = summary.processed, deleted = summary.deleted, "delete finished");
    Ok(())
}
