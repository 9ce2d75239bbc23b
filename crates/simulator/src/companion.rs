//! Scripted companion app.
//!
//! The script is a JSON list of replies; each refresh request is answered
//! with the next one, wrapping around at the end. Only the fields the running
//! revision understands are sent, plus any raw `extra` tuples (useful for
//! exercising unknown keys).
//!
//! ```json
//! { "replies": [
//!     { "temperature": 21, "conditions": "Clear",
//!       "price": "102.50", "change": "1.20", "negative": true },
//!     { "temperature": 19, "conditions": "Rain",
//!       "extra": [ { "key": 99, "value": 7 } ] }
//! ] }
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use platform::Dictionary;
use serde::Deserialize;
use watchface::{MessageKey, Revision};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    replies: Vec<Reply>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Reply {
    temperature: Option<i32>,
    conditions: Option<String>,
    price: Option<String>,
    change: Option<String>,
    negative: Option<bool>,
    #[serde(default)]
    extra: Vec<RawTuple>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTuple {
    key: u32,
    value: RawValue,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Int(i32),
    Text(String),
}

pub struct Companion {
    replies: Vec<Reply>,
    next: usize,
}

impl Companion {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading companion script {}", path.display()))?;
        let script: Script = serde_json::from_str(&raw)
            .with_context(|| format!("parsing companion script {}", path.display()))?;
        Self::from_script(script)
    }

    pub fn builtin() -> Self {
        Self {
            replies: vec![Reply {
                temperature: Some(21),
                conditions: Some("Clear".to_owned()),
                price: Some("102.50".to_owned()),
                change: Some("1.20".to_owned()),
                negative: Some(true),
                extra: Vec::new(),
            }],
            next: 0,
        }
    }

    fn from_script(script: Script) -> Result<Self> {
        if script.replies.is_empty() {
            bail!("companion script has no replies");
        }
        Ok(Self {
            replies: script.replies,
            next: 0,
        })
    }

    /// Build the next reply for `revision`.
    pub fn next_reply(&mut self, revision: Revision) -> Result<Dictionary> {
        let reply = self
            .replies
            .get(self.next)
            .context("companion script exhausted")?;
        self.next = self
            .next
            .saturating_add(1)
            .checked_rem(self.replies.len())
            .unwrap_or(0);
        encode(reply, revision)
    }
}

fn encode(reply: &Reply, revision: Revision) -> Result<Dictionary> {
    let mut dict = Dictionary::new();
    if revision.has_weather() {
        if let Some(t) = reply.temperature {
            dict.push_int32(MessageKey::Temperature.raw(), t)?;
        }
        if let Some(c) = &reply.conditions {
            dict.push_text(MessageKey::Conditions.raw(), c)?;
        }
    }
    if revision.has_stocks() {
        if let Some(p) = &reply.price {
            dict.push_text(MessageKey::Price.raw(), p)?;
        }
        if let Some(c) = &reply.change {
            dict.push_text(MessageKey::Change.raw(), c)?;
        }
        if let Some(n) = reply.negative {
            dict.push_int32(MessageKey::Negative.raw(), i32::from(n))?;
        }
    }
    for tuple in &reply.extra {
        match &tuple.value {
            RawValue::Int(v) => dict.push_int32(tuple.key, *v)?,
            RawValue::Text(s) => dict.push_text(tuple.key, s)?,
        }
    }
    tracing::debug!(tuples = dict.len(), "companion reply");
    Ok(dict)
}
