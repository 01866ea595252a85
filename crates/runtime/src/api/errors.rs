//! Unified error types surfaced by the runtime API.
//!
//! Rejected player actions are not runtime errors: they come back as the inner
//! `Err` of [`RuntimeHandle::submit`](crate::RuntimeHandle::submit). The
//! variants here cover the plumbing around the simulation.
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("input provider not set")]
    ProviderNotSet,

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires an initial game state before building")]
    MissingState,
}
