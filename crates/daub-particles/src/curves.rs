//! Linear interpolation over a particle's lifetime

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two RGB triples
pub fn lerp_rgb(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

/// Fraction of the way from `start` to `end` that `now` lies, clamped to [0, 1].
/// A zero-length span counts as fully elapsed.
pub fn span_fraction(start: f32, end: f32, now: f32) -> f32 {
    let span = end - start;
    if span <= 0.0 {
        return 1.0;
    }
    ((now - start) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_rgb_midpoint() {
        let mid = lerp_rgb([1.0, 0.0, 0.25], [0.0, 1.0, 0.75], 0.5);
        for c in mid {
            assert!((c - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn span_fraction_clamps() {
        assert_eq!(span_fraction(100.0, 200.0, 50.0), 0.0);
        assert!((span_fraction(100.0, 200.0, 150.0) - 0.5).abs() < 1e-6);
        assert_eq!(span_fraction(100.0, 200.0, 500.0), 1.0);
        assert_eq!(span_fraction(100.0, 100.0, 100.0), 1.0);
    }
}
