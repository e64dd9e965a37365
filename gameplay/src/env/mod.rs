//! All environment interaction stuff. Things like `Thinker`s that move parts of
//! the level or affect its appearance, and line specials

pub mod elevator;
pub mod floor;
pub mod liquid;
pub mod specials;

#[cfg(test)]
mod tests;
