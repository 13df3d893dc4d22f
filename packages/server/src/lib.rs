//! Room-scoped real-time chat relay.
//!
//! Clients connect over WebSocket, join named (optionally password
//! protected) rooms, exchange styled chat messages and see a live roster
//! of the room's occupants.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
