//! Memoizing property provider.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::FluidResult;
use crate::fluid::Fluid;
use crate::property::Property;
use crate::provider::PropertyProvider;

type Key = (Fluid, Property, Property, u64, Property, u64);

/// Wraps a provider and memoizes successful lookups keyed on the exact input
/// bits, so cached answers are bit-identical to the wrapped provider's.
///
/// Finite-difference Jacobians re-evaluate every component once per column
/// while only one junction variable moves; most of those lookups repeat.
pub struct CachedProvider<P> {
    inner: P,
    capacity: usize,
    table: Mutex<HashMap<Key, f64>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<P: PropertyProvider> CachedProvider<P> {
    pub const DEFAULT_CAPACITY: usize = 250_000;

    pub fn new(inner: P) -> Self {
        Self::with_capacity(inner, Self::DEFAULT_CAPACITY)
    }

    /// The table is cleared wholesale once it holds `capacity` entries.
    pub fn with_capacity(inner: P, capacity: usize) -> Self {
        Self {
            inner,
            capacity: capacity.max(1),
            table: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// (hits, misses) since construction.
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    pub fn len(&self) -> usize {
        self.table.lock().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut table) = self.table.lock() {
            table.clear();
        }
    }
}

impl<P: PropertyProvider> PropertyProvider for CachedProvider<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn supports(&self, fluid: Fluid) -> bool {
        self.inner.supports(fluid)
    }

    fn lookup(
        &self,
        fluid: Fluid,
        output: Property,
        in1: Property,
        v1: f64,
        in2: Property,
        v2: f64,
    ) -> FluidResult<f64> {
        let key = (fluid, output, in1, v1.to_bits(), in2, v2.to_bits());

        if let Ok(table) = self.table.lock()
            && let Some(&v) = table.get(&key)
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(v);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = self.inner.lookup(fluid, output, in1, v1, in2, v2)?;

        if let Ok(mut table) = self.table.lock() {
            if table.len() >= self.capacity {
                table.clear();
            }
            table.insert(key, value);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perfect_gas::PerfectGasProvider;
    use proptest::prelude::*;

    #[test]
    fn repeated_lookups_hit_the_cache() {
        let cached = CachedProvider::new(PerfectGasProvider::air());
        let a = cached.enthalpy_pt(Fluid::Air, 1e5, 300.0).unwrap();
        let b = cached.enthalpy_pt(Fluid::Air, 1e5, 300.0).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
        assert_eq!(cached.stats(), (1, 1));
        assert_eq!(cached.len(), 1);
    }

    #[test]
    fn errors_are_not_cached() {
        let cached = CachedProvider::new(PerfectGasProvider::air());
        assert!(cached.quality_ph(Fluid::Air, 1e5, 0.0).is_err());
        assert!(cached.is_empty());
    }

    #[test]
    fn capacity_bounds_the_table() {
        let cached = CachedProvider::with_capacity(PerfectGasProvider::air(), 2);
        for t in [280.0, 290.0, 300.0] {
            cached.enthalpy_pt(Fluid::Air, 1e5, t).unwrap();
        }
        assert!(cached.len() <= 2);
        cached.clear();
        assert!(cached.is_empty());
    }

    proptest! {
        #[test]
        fn cached_values_are_bit_identical_to_backend(p in 1e3f64..1e7, t in 150.0f64..900.0) {
            let gas = PerfectGasProvider::air();
            let cached = CachedProvider::new(gas);
            let direct = gas.density_pt(Fluid::Air, p, t).unwrap();
            let first = cached.density_pt(Fluid::Air, p, t).unwrap();
            let second = cached.density_pt(Fluid::Air, p, t).unwrap();
            prop_assert_eq!(first.to_bits(), direct.to_bits());
            prop_assert_eq!(second.to_bits(), direct.to_bits());
            prop_assert_eq!(cached.stats(), (1, 1));
        }
    }
}
