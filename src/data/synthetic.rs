//! Synthetic age-model generation.
//!
//! Produces a sorted tiepoint series whose sedimentation rate wanders around a
//! baseline:
//!
//! - ages advance by `age_step × U(0.5, 1.5)`
//! - each interval's rate is `rate × (1 + noise·z)`, `z ~ N(0, 1)`, floored at 0
//! - with probability `hiatus_prob` an interval is a hiatus (rate exactly 0)
//!
//! Depth deltas invert the LSR scaling, so running the pipeline on the output
//! recovers the sampled rates.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::{Normal, Uniform};
use tracing::debug;

use crate::domain::{AGE_SCALE, DEPTH_SCALE, SynthConfig, Tiepoints};
use crate::error::AppError;

/// A generated series together with the rate sampled for each interval.
#[derive(Debug, Clone)]
pub struct SyntheticModel {
    pub tiepoints: Tiepoints,
    pub rates: Vec<f64>,
}

pub fn generate_tiepoints(config: &SynthConfig) -> Result<SyntheticModel, AppError> {
    if config.count < 2 {
        return Err(AppError::new(2, "Synthetic series needs at least 2 tiepoints."));
    }
    if !(config.age_step.is_finite() && config.age_step > 0.0) {
        return Err(AppError::new(2, "Age step must be finite and > 0."));
    }
    if !(config.age_start.is_finite() && config.rate.is_finite() && config.rate >= 0.0) {
        return Err(AppError::new(2, "Start age and rate must be finite (rate >= 0)."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Noise must be finite and >= 0."));
    }
    if !(0.0..=1.0).contains(&config.hiatus_prob) {
        return Err(AppError::new(2, "Hiatus probability must be in [0, 1]."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;
    let jitter = Uniform::new(0.5, 1.5);

    let mut depths = Vec::with_capacity(config.count);
    let mut ages = Vec::with_capacity(config.count);
    let mut rates = Vec::with_capacity(config.count - 1);

    let mut depth = 0.0;
    let mut age = config.age_start;
    depths.push(depth);
    ages.push(age);

    for _ in 1..config.count {
        let age_delta = config.age_step * jitter.sample(&mut rng);
        let rate = if rng.gen_bool(config.hiatus_prob) {
            0.0
        } else {
            (config.rate * (1.0 + config.noise * normal.sample(&mut rng))).max(0.0)
        };

        depth += rate * age_delta * AGE_SCALE / DEPTH_SCALE;
        age += age_delta;
        depths.push(depth);
        ages.push(age);
        rates.push(rate);
    }

    debug!(count = config.count, seed = config.seed, "generated synthetic tiepoints");

    Ok(SyntheticModel {
        tiepoints: Tiepoints::new(depths, ages),
        rates,
    })
}
