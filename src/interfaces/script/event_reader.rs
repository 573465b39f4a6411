use crate::domain::link::LinkField;
use crate::error::Result;
use serde::Deserialize;
use std::io::Read;

/// One scripted user action.
///
/// Link entries are addressed by list position, since entry ids only exist
/// at runtime.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FlowEvent {
    Login { email: String, password: String },
    Logout,
    AddLink,
    RemoveLink { index: usize },
    UpdateLink { index: usize, field: LinkField, value: String },
    SubmitLinks,
    Recharge,
    PayNow,
    Back,
    CopyAddress,
    SetTxid { value: String },
    SubmitTxid,
}

/// Reads a flow script from a JSON source.
///
/// Scripts are a JSON array of events and small enough to read eagerly.
pub struct EventReader<R: Read> {
    source: R,
}

impl<R: Read> EventReader<R> {
    /// Creates a new `EventReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn events(mut self) -> Result<Vec<FlowEvent>> {
        let mut buf = String::new();
        self.source.read_to_string(&mut buf)?;
        Ok(serde_json::from_str(&buf)?)
    }
}
