//! Sub-reducers, one per component.  The root `update.rs` offers every
//! message to each of them in turn; the first one that claims it wins.

pub mod agent_node;
pub mod canvas;
