use cstemplate_config::{IniConfig, ListOverrides, connection_config, list_settings};
use cstemplate_core::{connect, disconnect};
use cstemplate_core::workflow::list;
use tracing::{debug, warn};

use crate::cli::ListArgs;
use crate::error::CliError;

pub async fn handle(config: &IniConfig, args: ListArgs) -> Result<(), CliError> {
    let settings = list_settings(
        config,
        ListOverrides {
            keyword: args.keyword,
            columns: args.columns,
        },
    );
    let client = connect(&connection_config(config)?).await?;

    let mut out = std::io::stdout().lock();
    let result = list(&client, &settings, &mut out).await;

    if let Err(err) = disconnect(&client).await {
        warn!(error = %err, "logout failed");
    }

    let summary = result?;
    debug!(total = summary.total, columns = ?summary.columns, "list finished");
    Ok(())
}
