//! Animatable value types
//!
//! Provides the interpolation trait tweens are built on, and
//! [`AnimatedProperty`], the typed binding a scheduler writes into.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

// ============================================================================
// Animated Property
// ============================================================================

#[derive(Debug, Default)]
struct PropertyCell {
    bits: AtomicU32,
    dirty: AtomicBool,
}

/// A shared `f32` slot that an animation writes into
///
/// The owner keeps one clone and hands another to the scheduler. Every write
/// marks the property dirty; the owner clears the flag with
/// [`take_dirty`](Self::take_dirty) when it schedules a redraw.
#[derive(Clone, Debug, Default)]
pub struct AnimatedProperty {
    cell: Arc<PropertyCell>,
}

impl AnimatedProperty {
    pub fn new(initial: f32) -> Self {
        Self {
            cell: Arc::new(PropertyCell {
                bits: AtomicU32::new(initial.to_bits()),
                dirty: AtomicBool::new(false),
            }),
        }
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.cell.bits.load(Ordering::Acquire))
    }

    /// Store a value and mark the property dirty
    pub fn set(&self, value: f32) {
        self.cell.bits.store(value.to_bits(), Ordering::Release);
        self.cell.dirty.store(true, Ordering::Release);
    }

    pub fn is_dirty(&self) -> bool {
        self.cell.dirty.load(Ordering::Acquire)
    }

    /// Check and clear the dirty flag
    pub fn take_dirty(&self) -> bool {
        self.cell.dirty.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_interpolation() {
        assert!((0.0_f32.lerp(&1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((10.0_f32.lerp(&20.0, 0.25) - 12.5).abs() < 1e-6);
        assert_eq!(100.0_f32.lerp(&0.0, 1.0), 0.0);
        // Overshoot is not clamped
        assert_eq!(0.0_f32.lerp(&10.0, 1.5), 15.0);
    }

    #[test]
    fn test_property_shared_between_clones() {
        let property = AnimatedProperty::new(0.0);
        let binding = property.clone();
        assert!(!property.is_dirty());

        binding.set(42.5);

        assert_eq!(property.get(), 42.5);
        assert!(property.take_dirty());
        assert!(!property.take_dirty());
        assert_eq!(AnimatedProperty::new(1.0).get(), 1.0);
    }
}
