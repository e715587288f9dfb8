//! Arcade adapter - networked multiplayer mode
//!
//! One process owns the authoritative [`wordgrid_core::Game`]; clients
//! connect over TCP, speak a line-delimited JSON protocol, and receive a
//! full observation after every accepted command. The first client becomes
//! the controller; later clients observe. Determinism comes from the core:
//! an observer replaying the observation stream - or a replica replaying
//! the command stream from the same seed - reconstructs the session
//! exactly, which the `state_hash` field lets it verify.
//!
//! - [`protocol`]: message types, parsing, and the deterministic state hash
//! - [`server`]: the tokio TCP server and shared authoritative state

pub mod protocol;
pub mod server;

pub use protocol::{
    create_ack, create_error, create_hello, create_letter, create_welcome, parse_message,
    state_hash, AssignedRole, CommandMessage, CommandOp, ErrorCode, HelloMessage,
    ObservationMessage, ParsedMessage, PassInfo, PassOutcomeTag, RequestedRole, StateHash,
    TwistInfo, WelcomeMessage,
};
pub use server::{run_blocking, run_server, ServerConfig};
