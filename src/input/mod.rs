//! Input domain: directional intent accumulated per tick.

mod accumulator;

#[cfg(test)]
mod tests;

pub use accumulator::{Axis, InputAccumulator, TieBreak};
