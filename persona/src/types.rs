use crate::fetish::FetishKey;
use crate::insult::InsultKind;
use crate::role::Role;
use crate::state::{Mood, MoodShift};
use serde::{Deserialize, Serialize};

/// Plain-text message routed to the persona.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inbound {
    pub body: String,
    pub author_id: i64,
}

impl Inbound {
    pub fn new(body: impl Into<String>, author_id: i64) -> Self {
        Self {
            body: body.into(),
            author_id,
        }
    }
}

/// Everything the classifiers found out about one message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub insult: InsultKind,
    pub mood: Mood,
    pub fetishes: Vec<FetishKey>,
    pub role: Role,
}

/// Which path of the pipeline produced a reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyKind {
    Greeting,
    Insult(InsultKind),
    Generated,
    Fallback,
}

/// Outbound result of handling one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    /// Transport-sized parts, in send order.
    pub chunks: Vec<String>,
    pub mood_shift: Option<MoodShift>,
}
