//! Value normalization
//!
//! Thumbstick and d-pad axes already arrive in `[-1, 1]` and are passed
//! through unchanged. Triggers are the only control whose native range
//! differs between platforms; [`TriggerEncoding`] maps them to `[0, 1]`.

/// How a platform reports trigger axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerEncoding {
    /// Released `0.0`, fully pulled `1.0`
    UnitRange,
    /// Released `-1.0`, fully pulled `1.0`
    SignedUnit,
}

impl TriggerEncoding {
    /// Maps a raw trigger sample to `[0, 1]`.
    pub fn normalize(self, raw: f32) -> f32 {
        match self {
            TriggerEncoding::UnitRange => raw,
            TriggerEncoding::SignedUnit => (raw + 1.0) / 2.0,
        }
    }

    /// Maps a `[0, 1]` trigger value to this encoding's native range.
    pub fn encode(self, value: f32) -> f32 {
        match self {
            TriggerEncoding::UnitRange => value,
            TriggerEncoding::SignedUnit => value * 2.0 - 1.0,
        }
    }
}

/// Canonical 2-D stick value, both components in `[-1, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickVector {
    pub x: f32,
    pub y: f32,
}

impl StickVector {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_trigger_endpoints_are_exact() {
        assert_eq!(TriggerEncoding::SignedUnit.normalize(-1.0), 0.0);
        assert_eq!(TriggerEncoding::SignedUnit.normalize(1.0), 1.0);
        assert_eq!(TriggerEncoding::SignedUnit.normalize(0.0), 0.5);
    }

    #[test]
    fn signed_trigger_is_linear_and_monotonic() {
        let samples: Vec<f32> = (0..=20).map(|i| -1.0 + i as f32 * 0.1).collect();
        let normalized: Vec<f32> = samples
            .iter()
            .map(|v| TriggerEncoding::SignedUnit.normalize(*v))
            .collect();

        for pair in normalized.windows(2) {
            assert!(pair[1] > pair[0]);
            assert!((pair[1] - pair[0] - 0.05).abs() < 1e-5);
        }
    }

    #[test]
    fn unit_trigger_is_identity() {
        for raw in [-0.3, 0.0, 0.25, 0.5, 1.0, 1.7] {
            assert_eq!(TriggerEncoding::UnitRange.normalize(raw), raw);
        }
    }

    #[test]
    fn encode_inverts_normalize() {
        for value in [0.0, 0.25, 0.5, 1.0] {
            let raw = TriggerEncoding::SignedUnit.encode(value);
            assert_eq!(TriggerEncoding::SignedUnit.normalize(raw), value);
        }
    }
}
