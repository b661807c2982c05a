use crate::context::CliContext;
use crate::output;

pub async fn handle_fetch(ctx: &mut CliContext, if_needed: bool) -> anyhow::Result<()> {
    let status = if if_needed {
        ctx.store.ensure_remote_data_loaded().await
    } else {
        ctx.store.fetch_remote_data().await
    };

    if let Some(error) = &status.error {
        output::output_error(error);
    }
    ctx.save()?;
    output::output_success(serde_json::json!({
        "status": status,
        "boards": ctx.store.boards_len(),
    }));
    Ok(())
}
