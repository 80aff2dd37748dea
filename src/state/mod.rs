//! Per-host politeness state
//!
//! `HostState` is the value the rate governor keeps for each remote host. The
//! governor owns the map; nothing here is global.

mod host_state;

pub use host_state::HostState;
