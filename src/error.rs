use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuerySenseError {
    #[error("chat message is empty")]
    EmptyMessage,

    #[error("assistant is still typing a reply")]
    AssistantBusy,

    #[error("no notification with id {0}")]
    UnknownNotification(u32),

    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("assistant reply task failed: {0}")]
    ReplyTask(String),
}
