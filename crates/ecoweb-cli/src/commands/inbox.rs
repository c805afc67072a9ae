use crate::bootstrap::AppContext;
use anyhow::{Result, anyhow};
use ecoweb_core::conversation::{Conversation, ConversationFilter, InboxView, WorkflowAction};
use ecoweb_core::session::Route;
use std::str::FromStr;

fn parse_view(view: &str) -> Result<InboxView> {
    InboxView::from_str(view)
        .map_err(|_| anyhow!("Visualização inválida '{}': use all, unread ou archived", view))
}

fn print_row(conversation: &Conversation) {
    let unread = if conversation.has_unread() {
        format!(" [{} nova(s)]", conversation.unread_count)
    } else {
        String::new()
    };
    println!(
        "{:<12} {:<10} {} ({}) - {}{}",
        conversation.id,
        conversation.status.label(),
        conversation.interested_party_name,
        conversation.interested_party_type,
        conversation.material_name,
        unread
    );
    if !conversation.last_message.is_empty() {
        println!("{:<12} {}", "", conversation.last_message);
    }
}

pub async fn list(ctx: &AppContext, material: Option<String>, view: &str) -> Result<()> {
    let view = parse_view(view)?;
    ctx.require(Route::Inbox).await?;

    let filter = material
        .map(ConversationFilter::for_material)
        .unwrap_or_default();
    ctx.inbox.fetch_conversations(filter).await?;

    let visible = ctx.inbox.visible(view).await;
    if visible.is_empty() {
        println!("Nenhuma conversa encontrada");
        return Ok(());
    }
    for conversation in &visible {
        print_row(conversation);
    }
    println!(
        "\n{} conversa(s), {} mensagem(ns) não lida(s)",
        visible.len(),
        ctx.inbox.unread_total().await
    );
    Ok(())
}

pub async fn show(ctx: &AppContext, id: &str) -> Result<()> {
    ctx.require(Route::Conversation(id.to_string())).await?;
    let conversation = ctx.inbox.open_conversation(id).await?;

    print_row(&conversation);
    println!();
    for message in &conversation.messages {
        println!("[{}] {}: {}", message.timestamp, message.sender, message.content);
    }

    let actions: Vec<String> = conversation
        .status
        .available_actions()
        .iter()
        .map(|a| a.to_string())
        .collect();
    if !actions.is_empty() {
        println!("\nAções disponíveis: {}", actions.join(", "));
    }
    Ok(())
}

pub async fn send(ctx: &AppContext, id: &str, text: &str) -> Result<()> {
    ctx.require(Route::Conversation(id.to_string())).await?;
    let message = ctx.inbox.send_message(id, text).await?;
    println!("✉️  Mensagem enviada ({})", message.timestamp);
    Ok(())
}

pub async fn transition(ctx: &AppContext, id: &str, action: WorkflowAction) -> Result<()> {
    ctx.require(Route::Conversation(id.to_string())).await?;
    ctx.inbox.fetch_conversations(ConversationFilter::all()).await?;

    let updated = ctx.inbox.run_workflow(id, action).await?;
    println!("✅ {}: {}", updated.id, updated.status.label());
    Ok(())
}
