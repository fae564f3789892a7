/// Largest f32 below 1.
pub const ONE_MINUS_EPSILON: f32 = 1.0 - f32::EPSILON / 2.0;

/// Mirrors the base-`base` digits of `n` around the radix point.
pub fn radical_inverse(mut n: u64, base: u64) -> f32 {
    debug_assert!(base >= 2);
    let inv_base = 1.0 / base as f64;
    let mut inv_bi = inv_base;
    let mut value = 0.0_f64;
    while n > 0 {
        value += inv_bi * (n % base) as f64;
        n /= base;
        inv_bi *= inv_base;
    }
    (value as f32).min(ONE_MINUS_EPSILON)
}

/// 2D Halton point for `idx`, using bases 2 and 3.
pub fn halton_2d(idx: u64) -> (f32, f32) {
    (radical_inverse(idx, 2), radical_inverse(idx, 3))
}
