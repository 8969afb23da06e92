//! Outcome generator.
//!
//! A spin draws one value in `[0, 1)` from a [`RandomSource`] and maps it uniformly onto
//! the 38 pocket indices. The wheel keeps no state between spins and never looks at the
//! bets on the table.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use spinhall_types::casino::{Pocket, SpinResult, POCKET_COUNT, WHEEL_ORDER};

/// Source of uniform values in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Adapts any `rand` generator.
#[derive(Clone, Debug)]
pub struct RngSource<R>(R);

impl<R: RngCore> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }

    pub fn into_inner(self) -> R {
        self.0
    }
}

impl RngSource<ChaCha20Rng> {
    /// Deterministic source for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(ChaCha20Rng::from_entropy())
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Replays a fixed list of values, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Source whose next draws land on `pockets`, in order.
    pub fn landing_on(pockets: &[Pocket]) -> Self {
        Self::new(pockets.iter().map(|&pocket| value_for(pocket)).collect())
    }
}

impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value
    }
}

/// Midpoint of the draw interval that maps to `pocket`.
pub fn value_for(pocket: Pocket) -> f64 {
    (pocket.index() as f64 + 0.5) / POCKET_COUNT as f64
}

/// Map a draw onto a pocket. Out-of-range draws clamp to the nearest end; NaN maps to `0`.
pub fn pocket_for(value: f64) -> Pocket {
    let value = if value.is_nan() { 0.0 } else { value };
    let index = (value * POCKET_COUNT as f64).floor();
    let index = index.clamp(0.0, (POCKET_COUNT - 1) as f64) as u8;
    Pocket::from_index(index).unwrap_or(Pocket::ZERO)
}

/// Spin the wheel once.
pub fn spin<S: RandomSource + ?Sized>(source: &mut S) -> SpinResult {
    SpinResult::new(pocket_for(source.next_f64()))
}

/// Position of `pocket` on the physical wheel, clockwise from 0.
pub fn wheel_slot(pocket: Pocket) -> usize {
    WHEEL_ORDER
        .iter()
        .position(|&index| index == pocket.index())
        .unwrap_or(0)
}

/// Angle in degrees of the center of `pocket`'s slot, clockwise from the 0 slot's edge.
pub fn landing_angle(pocket: Pocket) -> f64 {
    let slot_degrees = 360.0 / POCKET_COUNT as f64;
    wheel_slot(pocket) as f64 * slot_degrees + slot_degrees / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use spinhall_types::casino::Color;

    #[test]
    fn test_pocket_for_bounds() {
        assert_eq!(pocket_for(0.0), Pocket::ZERO);
        assert_eq!(pocket_for(0.999_999), Pocket::DOUBLE_ZERO);
        assert_eq!(pocket_for(1.0), Pocket::DOUBLE_ZERO);
        assert_eq!(pocket_for(-3.0), Pocket::ZERO);
        assert_eq!(pocket_for(f64::NAN), Pocket::ZERO);
        assert_eq!(pocket_for(f64::INFINITY), Pocket::DOUBLE_ZERO);
        assert_eq!(pocket_for(f64::NEG_INFINITY), Pocket::ZERO);
    }

    #[test]
    fn test_value_for_lands_on_pocket() {
        for pocket in Pocket::all() {
            assert_eq!(pocket_for(value_for(pocket)), pocket);
        }
    }

    #[test]
    fn test_scripted_source_cycles() {
        let seventeen = Pocket::number(17).unwrap();
        let mut source = ScriptedSource::landing_on(&[seventeen, Pocket::DOUBLE_ZERO]);
        assert_eq!(spin(&mut source).pocket(), seventeen);
        assert_eq!(spin(&mut source).pocket(), Pocket::DOUBLE_ZERO);
        let again = spin(&mut source);
        assert_eq!(again.pocket(), seventeen);
        assert_eq!(again.color(), Color::Black);

        let mut empty = ScriptedSource::new(vec![]);
        assert_eq!(spin(&mut empty).pocket(), Pocket::ZERO);
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        for _ in 0..50 {
            assert_eq!(spin(&mut a), spin(&mut b));
        }
    }

    #[test]
    fn test_spin_through_trait_object() {
        let mut source: Box<dyn RandomSource> = Box::new(RngSource::new(StdRng::seed_from_u64(1)));
        let result = spin(&mut source);
        assert_eq!(result.color(), result.pocket().color());
    }

    #[test]
    fn test_distribution_is_roughly_uniform() {
        let mut source = RngSource::seeded(2024);
        let mut counts = [0u32; POCKET_COUNT];
        let spins = 38_000;
        for _ in 0..spins {
            counts[spin(&mut source).pocket().index() as usize] += 1;
        }
        // Expected 1000 per pocket; allow a generous band.
        for (index, count) in counts.iter().enumerate() {
            assert!(
                (800..=1200).contains(count),
                "pocket index {index} drawn {count} times"
            );
        }
    }

    #[test]
    fn test_wheel_slots() {
        assert_eq!(wheel_slot(Pocket::ZERO), 0);
        assert_eq!(wheel_slot(Pocket::DOUBLE_ZERO), 19);
        assert_eq!(wheel_slot(Pocket::number(2).unwrap()), 37);
        let half = 180.0 / POCKET_COUNT as f64;
        assert!((landing_angle(Pocket::ZERO) - half).abs() < 1e-9);
        assert!((landing_angle(Pocket::DOUBLE_ZERO) - (180.0 + half)).abs() < 1e-9);
    }
}
