use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::NotificationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Bid,
    Outbid,
    Sale,
    Message,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bid => "bid",
            Self::Outbid => "outbid",
            Self::Sale => "sale",
            Self::Message => "message",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Display hint rendered by the bell panel, e.g. "now".
    pub time: String,
    pub read: bool,
}
