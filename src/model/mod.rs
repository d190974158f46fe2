//! Stress model: the state record, how it is shared, and how frames move it.

pub mod dynamics;
pub mod state;
