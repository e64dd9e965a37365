//! Conversions between Doom's 16.16 `fixed_t` and `f32`.
//!
//! Gameplay stores heights as `f32`, but a few tables are kept exactly as they
//! appear in the original data so they can be compared against other ports.

pub const FRACBITS: i32 = 16;
pub const FRACUNIT: f32 = (1 << FRACBITS) as f32;

/// Convert a Doom `fixed_t` fixed-point float to `f32`
#[inline]
pub const fn fixed_to_float(value: i32) -> f32 {
    value as f32 / FRACUNIT
}

/// Convert a whole table of `fixed_t` values at compile time
pub const fn fixed_table_to_float<const N: usize>(table: [i32; N]) -> [f32; N] {
    let mut out = [0.0; N];
    let mut i = 0;
    while i < N {
        out[i] = fixed_to_float(table[i]);
        i += 1;
    }
    out
}
