//! Random numbers for the demo widget.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A drawn count with the hue used to color it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomCount {
    pub count: u32,
    pub hue: u32,
}

impl RandomCount {
    pub fn draw(min: u32, max: u32) -> Self {
        Self {
            count: get_random_count(min, max),
            hue: get_random_hue_color(),
        }
    }
}

/// A random integer in `[min, max]`, rounded from a uniform float.
///
/// The endpoints are half as likely as the inner values. Arguments are
/// swapped if given in the wrong order.
pub fn get_random_count(min: u32, max: u32) -> u32 {
    random_count_with(&mut rand::thread_rng(), min, max)
}

pub(crate) fn random_count_with<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let sample: f64 = rng.gen();
    (sample * f64::from(max - min) + f64::from(min)).round() as u32
}

/// A random hue in `[0, 360]`.
pub fn get_random_hue_color() -> u32 {
    get_random_count(0, 360)
}

/// Inline style that sets the app's `--hue` variable.
pub fn app_color_style(hue: u32) -> String {
    format!("--hue: {hue}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_count_within_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let n = random_count_with(&mut rng, 1, 10);
            assert!((1..=10).contains(&n));
        }
    }

    #[test]
    fn test_both_endpoints_reachable() {
        let mut rng = StdRng::seed_from_u64(42);
        let draws: Vec<u32> = (0..5000).map(|_| random_count_with(&mut rng, 1, 10)).collect();
        assert!(draws.contains(&1));
        assert!(draws.contains(&10));
    }

    #[test]
    fn test_degenerate_and_swapped_ranges() {
        assert_eq!(get_random_count(5, 5), 5);
        let n = get_random_count(10, 1);
        assert!((1..=10).contains(&n));
    }

    #[test]
    fn test_hue_and_style() {
        assert!(get_random_hue_color() <= 360);
        assert_eq!(app_color_style(120), "--hue: 120");
    }
}
