use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("User {actor} is not the administrator")]
    Unauthorized { actor: i64 },
    #[error("User not found: {0}")]
    UserNotFound(i64),
    #[error("Common error: {0}")]
    Common(#[from] eyre::Error),
}
