//! Runtime orchestration for the hybrid turn/real-time dungeon game.
//!
//! This crate wires together the input provider abstraction, the simulation
//! worker and the event bus into a cohesive runtime API. Consumers embed
//! [`Runtime`] to drive sessions, subscribe to events, watch renderer
//! snapshots and interact with the world through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    ChannelProvider, CycleResult, InputProvider, Result, RuntimeError, RuntimeHandle,
    ScriptedProvider, WaitProvider,
};
pub use events::{Event, EventBus, GameStateEvent, SessionEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
