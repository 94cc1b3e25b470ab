use rand::Rng;

pub const BAR_COUNT: usize = 36;

const MIN_DURATION_SECS: f64 = 0.5;
const DURATION_SPREAD_SECS: f64 = 0.8;
const MAX_START_OFFSET_SECS: f64 = 1.0;

/// One radial bar around the avatar: fixed angle, randomized timing so the
/// ring looks irregular.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub angle_degrees: f64,
    pub duration_secs: f64,
    pub start_offset_secs: f64,
}

pub fn radial_bars<R: Rng>(rng: &mut R) -> Vec<BarSpec> {
    (0..BAR_COUNT)
        .map(|i| BarSpec {
            angle_degrees: (360.0 / BAR_COUNT as f64) * i as f64,
            duration_secs: MIN_DURATION_SECS + rng.gen::<f64>() * DURATION_SPREAD_SECS,
            start_offset_secs: rng.gen::<f64>() * MAX_START_OFFSET_SECS,
        })
        .collect()
}
