//! Scripted driver for the flow engine.
//!
//! A script is a JSON array of user actions standing in for UI interaction.
//! Running one prints a line-oriented trace of what the flow did, which is
//! what the CLI tests assert against.

mod event_reader;
mod trace_writer;

pub use event_reader::{EventReader, FlowEvent};
pub use trace_writer::TraceWriter;

use crate::application::flow::{FlowEngine, Screen};
use crate::domain::payment::{NETWORK, TOKEN, WALLET_ADDRESS};
use crate::error::Result;
use std::io::Write;
use uuid::Uuid;

/// Applies each event in order, tracing screen changes as they happen.
pub async fn run_script<W: Write>(
    engine: &mut FlowEngine,
    events: Vec<FlowEvent>,
    out: &mut TraceWriter<W>,
) -> Result<()> {
    out.screen(engine.screen())?;
    for event in events {
        let before = engine.screen();
        apply(engine, event, out).await?;
        if engine.screen() != before {
            out.screen(engine.screen())?;
        }
    }
    Ok(())
}

async fn apply<W: Write>(
    engine: &mut FlowEngine,
    event: FlowEvent,
    out: &mut TraceWriter<W>,
) -> Result<()> {
    match event {
        FlowEvent::Login { email, password } => {
            if engine.login(&email, &password).await {
                out.line(&format!("login ok: {email}"))?;
            } else {
                let message = engine.login_error().unwrap_or_default().to_string();
                out.line(&format!("login failed: {message}"))?;
            }
        }
        FlowEvent::Logout => engine.logout(),
        FlowEvent::AddLink => {
            if engine.add_link().is_some() {
                let count = engine.link_form().map_or(0, |f| f.links().len());
                out.line(&format!("links: {count}"))?;
            }
        }
        FlowEvent::RemoveLink { index } => {
            if let Some(id) = link_id(engine, index) {
                engine.remove_link(id);
                let count = engine.link_form().map_or(0, |f| f.links().len());
                out.line(&format!("links: {count}"))?;
            }
        }
        FlowEvent::UpdateLink { index, field, value } => {
            if let Some(id) = link_id(engine, index) {
                engine.update_link(id, field, &value);
            } else {
                tracing::warn!(index, "update for a link that does not exist");
            }
        }
        FlowEvent::SubmitLinks => submit_links(engine, out).await?,
        FlowEvent::Recharge => {
            if let Some(form) = engine.recharge().then(|| engine.crypto_form()).flatten() {
                out.line(&format!(
                    "amount due: {:.2} {TOKEN} via {NETWORK}",
                    form.amount()
                ))?;
                out.line(&format!("address: {WALLET_ADDRESS}"))?;
            } else {
                out.line("recharge unavailable")?;
            }
        }
        FlowEvent::PayNow => {
            engine.pay_now();
            out.line("pay now pressed (no settlement)")?;
        }
        FlowEvent::Back => engine.back_to_entry(),
        FlowEvent::CopyAddress => {
            if let Some(address) = engine.copy_address() {
                out.line(&format!("copied: {address}"))?;
            }
        }
        FlowEvent::SetTxid { value } => engine.set_txid(&value),
        FlowEvent::SubmitTxid => {
            if engine.submit_txid() {
                let txid = engine.crypto_form().map_or("", |f| f.txid()).to_string();
                out.line(&format!("payment submitted, pending verification: {txid}"))?;
            } else if let Some(error) = engine.crypto_form().and_then(|f| f.error()) {
                let error = error.to_string();
                out.line(&format!("txid error: {error}"))?;
            }
        }
    }
    Ok(())
}

async fn submit_links<W: Write>(engine: &mut FlowEngine, out: &mut TraceWriter<W>) -> Result<()> {
    if !engine.submit_links() {
        let Some(form) = engine.link_form() else {
            return Ok(());
        };
        let errors: Vec<String> = form
            .links()
            .iter()
            .enumerate()
            .filter_map(|(i, link)| form.error(link.id).map(|e| format!("error link[{i}]: {e}")))
            .collect();
        if errors.is_empty() {
            out.line("submit blocked: total is zero")?;
        } else {
            for error in errors {
                out.line(&error)?;
            }
        }
        return Ok(());
    }

    out.screen(Screen::Processing)?;
    let mut stages = Vec::new();
    engine.run_processing(|stage| stages.push(stage)).await;
    for stage in stages {
        out.stage(stage)?;
    }

    if let Some(summary) = engine.payment_summary() {
        let action = if summary.needs_recharge() { "recharge" } else { "pay" };
        out.line(&format!(
            "summary: total={:.2} available={:.2} difference={:.2} action={action}",
            summary.total,
            summary.available,
            summary.difference(),
        ))?;
    }
    Ok(())
}

fn link_id(engine: &FlowEngine, index: usize) -> Option<Uuid> {
    engine
        .link_form()
        .and_then(|form| form.links().get(index))
        .map(|link| link.id)
}
