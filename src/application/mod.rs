//! Application layer correlating commands with their asynchronous results.
//!
//! `CommandDispatcher` accepts commands, `SessionState` owns the single
//! pending-command slot, and `ResultRouter` resolves that slot from either
//! completion channel exactly once.

pub mod dispatcher;
pub mod guard;
pub mod router;
pub mod session;
