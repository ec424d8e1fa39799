use crate::constants::FRAC_TOLERANCE;
use std::fmt;
use std::time::Instant;

/// A simple timer based on std::time::Instant that prints the elapsed time
pub struct Timer {
    time: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Timer {
            time: Instant::now(),
        }
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:>68} {:>8.2} s",
            "elapsed time:",
            self.time.elapsed().as_secs_f32()
        )
    }
}

/// Greatest common divisor of two integers
pub fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a.abs()
}

/// Maps a fractional coordinate into [0, 1). Values that are within the tolerance
/// below an integer are mapped onto this integer.
pub fn wrap_fractional(x: f64) -> f64 {
    let wrapped: f64 = x - (x + FRAC_TOLERANCE).floor();
    if wrapped < 0.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_of_coprime_and_shared_factors() {
        assert_eq!(gcd(3, 5), 1);
        assert_eq!(gcd(6, 10), 2);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
    }

    #[test]
    fn wrap_fractional_coordinates() {
        assert_eq!(wrap_fractional(0.25), 0.25);
        assert!((wrap_fractional(1.25) - 0.25).abs() < 1e-14);
        assert!((wrap_fractional(-0.25) - 0.75).abs() < 1e-14);
        assert_eq!(wrap_fractional(-1.0e-12), 0.0);
        assert_eq!(wrap_fractional(1.0 - 1.0e-12), 0.0);
    }
}
