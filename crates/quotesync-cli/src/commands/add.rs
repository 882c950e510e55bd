use crate::commands::common::CliContext;
use crate::error::CliError;
use crate::view::TerminalView;

pub async fn run_add(
    text_parts: &[String],
    category: &str,
    push: bool,
    context: &CliContext,
) -> Result<(), CliError> {
    let remote_configured = context.settings.remote_url().is_some();
    if push && !remote_configured {
        return Err(CliError::SyncNotConfigured);
    }

    let app = context
        .build_app(TerminalView::new())?
        .with_push_on_add(remote_configured && (push || context.settings.push_on_add));
    let quote = app.on_add_requested(&text_parts.join(" "), category).await?;

    tracing::debug!("Added quote {}", quote.id);
    println!("{}", quote.id);
    Ok(())
}
