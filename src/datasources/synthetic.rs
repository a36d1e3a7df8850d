use crate::models::{Coordinates, EnvironmentalReading, SatelliteIndices};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of placeholder data where no live upstream exists.
///
/// Satellite indices always come from here; air quality only when no
/// air-pollution upstream is configured. The scoring core never draws
/// randomness itself.
pub trait SyntheticDataProvider: Send + Sync {
    fn satellite_indices(&self, coords: Coordinates) -> SatelliteIndices;

    fn air_quality_index(&self, coords: Coordinates) -> f64;

    /// `days` readings, oldest first, ending with `current` unchanged.
    fn history_readings(
        &self,
        coords: Coordinates,
        current: &EnvironmentalReading,
        days: u32,
    ) -> Vec<EnvironmentalReading>;
}

/// Stream salts so each kind of synthetic value draws from its own sequence.
const SATELLITE_STREAM: u64 = 0x5341_5445;
const AIR_QUALITY_STREAM: u64 = 0x4151_4931;
const HISTORY_STREAM: u64 = 0x4849_5354;

/// Seeded generator whose output depends only on the seed and the coordinates,
/// so repeated requests for a location agree with each other.
#[derive(Debug, Clone, Copy)]
pub struct SeededSynthetic {
    seed: u64,
}

impl SeededSynthetic {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn rng_for(&self, coords: Coordinates, stream: u64) -> StdRng {
        let location = coords.lat.to_bits().rotate_left(32) ^ coords.lng.to_bits();
        StdRng::seed_from_u64(self.seed ^ location ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

impl SyntheticDataProvider for SeededSynthetic {
    fn satellite_indices(&self, coords: Coordinates) -> SatelliteIndices {
        let mut rng = self.rng_for(coords, SATELLITE_STREAM);
        SatelliteIndices {
            ndvi: round3(rng.gen_range(0.15..0.75)),
            ndmi: round3(rng.gen_range(-0.2..0.4)),
        }
    }

    fn air_quality_index(&self, coords: Coordinates) -> f64 {
        let mut rng = self.rng_for(coords, AIR_QUALITY_STREAM);
        rng.gen_range(30.0_f64..180.0).round()
    }

    fn history_readings(
        &self,
        coords: Coordinates,
        current: &EnvironmentalReading,
        days: u32,
    ) -> Vec<EnvironmentalReading> {
        if days == 0 {
            return Vec::new();
        }

        let mut rng = self.rng_for(coords, HISTORY_STREAM);
        let mut readings: Vec<EnvironmentalReading> = (1..days)
            .rev()
            .map(|age| {
                // Older days drift further from today's values
                let spread = (age as f64 / days as f64).min(1.0);
                EnvironmentalReading {
                    ndvi: round3(
                        (current.ndvi + rng.gen_range(-0.08_f64..0.08) * spread).clamp(-1.0, 1.0),
                    ),
                    moisture_index_pct: (current.moisture_index_pct
                        + rng.gen_range(-12.0_f64..12.0) * spread)
                        .clamp(0.0, 100.0)
                        .round(),
                    temperature_c: round1(
                        current.temperature_c + rng.gen_range(-4.0_f64..4.0) * spread,
                    ),
                    humidity_pct: (current.humidity_pct + rng.gen_range(-10.0_f64..10.0) * spread)
                        .clamp(0.0, 100.0)
                        .round(),
                    rainfall_mm: round1(
                        (current.rainfall_mm + rng.gen_range(-5.0_f64..5.0)).max(0.0),
                    ),
                    ..*current
                }
            })
            .collect();

        readings.push(*current);
        readings
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
