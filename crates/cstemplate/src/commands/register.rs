use cstemplate_config::{IniConfig, RegisterOverrides, connection_config, register_settings};
use cstemplate_core::workflow::register;
use cstemplate_core::{StatusPoller, TemplateSource, connect, disconnect};
use tracing::{info, warn};

use crate::cli::RegisterArgs;
use crate::error::CliError;

pub async fn handle(config: &IniConfig, args: RegisterArgs) -> Result<(), CliError> {
    let template = match (args.name, args.url) {
        (Some(name), Some(url)) => Some(TemplateSource::new(name, url)),
        _ => None,
    };

    let settings = register_settings(
        config,
        RegisterOverrides {
            template,
            ostype: args.ostype,
            password_enabled: args.password_enabled,
        },
    );
    let client = connect(&connection_config(config)?).await?;

    let mut out = std::io::stdout().lock();
    let result = register(&client, &settings, &StatusPoller::default(), &mut out).await;

    if let Err(err) = disconnect(&client).await {
        warn!(error = %err, "logout failed");
    }

    let summary = result?;
    info!(
        processed = summary.processed,
        registered = summary.registered.len(),
        "register finished"
    );
    Ok(())
}
