use crate::core::envelope::MessageType;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResponseError {
    #[error("Message id is not set")]
    UnsetMessageId,
    #[error("Invalid message id: `{0}`")]
    InvalidMessageId(i32),
    #[error("Missing payload for `{0}`")]
    MissingPayload(MessageType),
    #[error("Not a search response: `{0}`")]
    UnexpectedOperation(String),
}

pub type ResponseResult<T> = std::result::Result<T, ResponseError>;
