use crate::cli::{SidebarAction, ThemeAction};
use crate::context::CliContext;
use crate::output;

pub async fn handle_theme(ctx: &mut CliContext, action: ThemeAction) -> anyhow::Result<()> {
    match action {
        ThemeAction::Get => {}
        ThemeAction::Toggle => {
            ctx.store.toggle_theme();
            ctx.save()?;
        }
    }
    output::output_success(serde_json::json!({"theme": ctx.store.theme()}));
    Ok(())
}

pub async fn handle_sidebar(ctx: &mut CliContext, action: SidebarAction) -> anyhow::Result<()> {
    let changed = match action {
        SidebarAction::Show => ctx.store.set_sidebar_visible(true),
        SidebarAction::Hide => ctx.store.set_sidebar_visible(false),
        SidebarAction::Toggle => {
            ctx.store.toggle_sidebar();
            true
        }
    };
    if changed {
        ctx.save()?;
    }
    output::output_success(serde_json::json!({"sidebarVisible": ctx.store.sidebar_visible()}));
    Ok(())
}

pub async fn handle_login(ctx: &mut CliContext, logged_in: bool) -> anyhow::Result<()> {
    let changed = if logged_in {
        ctx.store.login()
    } else {
        ctx.store.logout()
    };
    if changed {
        ctx.save()?;
    }
    output::output_success(serde_json::json!({"isLoggedIn": ctx.store.is_logged_in()}));
    Ok(())
}

pub fn handle_status(ctx: &CliContext) {
    output::output_success(serde_json::json!({
        "boards": ctx.store.boards_len(),
        "version": ctx.store.version(),
        "sidebarVisible": ctx.store.sidebar_visible(),
        "theme": ctx.store.theme(),
        "isLoggedIn": ctx.store.is_logged_in(),
        "remote": ctx.store.remote_status(),
    }));
}
