//! Demo Mode - Simulated tractor readings for dry runs
//!
//! Generates plausible tillage readings without a telemetry feed: engine
//! speed wandering around a governed setting, forward speed in the
//! 0.78-1.28 m/s band seen during field trials, and a GPS track drifting
//! slowly across the plot. Nothing in the pipeline depends on this source.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::SampleClock;
use crate::gear::GearLabel;
use crate::reading::RawReading;
use crate::realtime::ReadingSource;
use crate::unit_conversion::mps_to_kmh;

/// Field trial plot the simulated track starts at
const START_LATITUDE: f64 = 22.312841038797888;
const START_LONGITUDE: f64 = 87.33148608163823;

/// Simulated tractor reading generator
pub struct DemoSource {
    rng: StdRng,
    clock: SampleClock,
    gear: GearLabel,
    remaining: Option<usize>,
    engine_speed_rpm: f64,
    throttle_percent: f64,
    implement_depth_cm: f64,
    latitude: f64,
    longitude: f64,
}

impl DemoSource {
    /// Demo source with a fixed seed, so runs are reproducible
    pub fn seeded(seed: u64, interval: Duration) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), interval)
    }

    /// Demo source seeded from system entropy
    pub fn from_entropy(interval: Duration) -> Self {
        Self::with_rng(StdRng::from_entropy(), interval)
    }

    fn with_rng(rng: StdRng, interval: Duration) -> Self {
        Self {
            rng,
            clock: SampleClock::fixed(interval),
            gear: GearLabel::L1,
            remaining: None,
            engine_speed_rpm: 1490.0,
            throttle_percent: 51.0,
            implement_depth_cm: 27.72,
            latitude: START_LATITUDE,
            longitude: START_LONGITUDE,
        }
    }

    /// Stop after this many readings
    pub fn limit(mut self, samples: usize) -> Self {
        self.remaining = Some(samples);
        self
    }

    /// Select the simulated gear
    pub fn gear(mut self, gear: GearLabel) -> Self {
        self.gear = gear;
        self
    }

    /// Generate the next reading
    pub fn generate(&mut self) -> RawReading {
        // Small random walks, held inside field-trial ranges
        self.throttle_percent =
            (self.throttle_percent + self.rng.gen_range(-1.5..1.5)).clamp(40.0, 70.0);
        let governed = 24.49 * self.throttle_percent + 42.483;
        let target_rpm = governed + self.rng.gen_range(-250.0..150.0);
        self.engine_speed_rpm += (target_rpm - self.engine_speed_rpm) * 0.3;
        self.engine_speed_rpm = self.engine_speed_rpm.clamp(1000.0, 2200.0);
        self.implement_depth_cm =
            (self.implement_depth_cm + self.rng.gen_range(-0.8..0.8)).clamp(15.0, 32.0);

        let forward_speed_kmh = mps_to_kmh(self.rng.gen_range(0.78..=1.28));

        self.latitude += self.rng.gen_range(0.0..2e-6);
        self.longitude += self.rng.gen_range(-1e-6..1e-6);

        RawReading::new(
            self.clock.tick(),
            self.engine_speed_rpm,
            self.throttle_percent,
            self.implement_depth_cm,
            forward_speed_kmh,
            self.gear,
        )
        .with_position(self.latitude, self.longitude)
    }
}

impl ReadingSource for DemoSource {
    fn next_reading(&mut self) -> Option<RawReading> {
        if let Some(n) = self.remaining.as_mut() {
            if *n == 0 {
                return None;
            }
            *n -= 1;
        }
        Some(self.generate())
    }
}
