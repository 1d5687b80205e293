//! Built-in SDC engine with permutation-test p-values.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use sdcmap_stats::pearson_correlation;
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::trace;

use crate::config::SdcParams;
use crate::engine::CorrelationEngine;
use crate::error::SdcError;
use crate::fragment::FragmentPair;

/// Pearson-based SDC engine.
///
/// For fragment size `w` over `n` samples, every start pair
/// `(start_1, start_2)` in `0..=n-w` with `min_lag <= start_1 - start_2 <= max_lag`
/// produces one row, in `start_1`-major order. Each pair draws its
/// permutations from its own RNG seeded by `(seed, start_1, start_2)`, so a
/// table never depends on scan order or thread count.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermutationEngine;

impl CorrelationEngine for PermutationEngine {
    fn evaluate(
        &self,
        driver: &[f64],
        local: &[f64],
        params: &SdcParams,
    ) -> Result<Vec<FragmentPair>, SdcError> {
        params.validate()?;
        if driver.len() != local.len() {
            return Err(SdcError::LengthMismatch {
                driver: driver.len(),
                local: local.len(),
            });
        }

        let n = driver.len();
        let w = params.fragment_size();
        if w > n {
            trace!(n, fragment_size = w, "series shorter than one fragment");
            return Ok(Vec::new());
        }

        let n_starts = n - w + 1;
        let mut rows = Vec::new();
        let mut scratch = vec![0.0; w];

        for start_1 in 0..n_starts {
            let frag_1 = &driver[start_1..start_1 + w];
            for start_2 in 0..n_starts {
                let lag = start_1 as i64 - start_2 as i64;
                if lag < params.min_lag() || lag > params.max_lag() {
                    continue;
                }
                let frag_2 = &local[start_2..start_2 + w];

                let (r, p_value) = match pearson_correlation(frag_1, frag_2) {
                    Some(r) => {
                        let p = if params.n_permutations() == 0 {
                            student_t_p_value(r, w, params.two_tailed())
                        } else {
                            let mut rng =
                                StdRng::seed_from_u64(pair_seed(params.seed(), start_1, start_2));
                            permutation_p_value(frag_1, frag_2, r, params, &mut scratch, &mut rng)
                        };
                        (r, p)
                    }
                    None => (f64::NAN, f64::NAN),
                };

                rows.push(FragmentPair {
                    start_1,
                    stop_1: start_1 + w,
                    start_2,
                    stop_2: start_2 + w,
                    lag,
                    r,
                    p_value,
                });
            }
        }

        trace!(n_rows = rows.len(), "fragment table computed");
        Ok(rows)
    }
}

/// `(1 + hits) / (1 + n_permutations)` where a hit is a shuffled
/// correlation at least as extreme as `r`.
fn permutation_p_value(
    frag_1: &[f64],
    frag_2: &[f64],
    r: f64,
    params: &SdcParams,
    scratch: &mut [f64],
    rng: &mut StdRng,
) -> f64 {
    scratch.copy_from_slice(frag_2);
    let mut hits = 0usize;
    for _ in 0..params.n_permutations() {
        scratch.shuffle(rng);
        let Some(r_perm) = pearson_correlation(frag_1, scratch) else {
            continue;
        };
        let extreme = if params.two_tailed() {
            r_perm.abs() >= r.abs()
        } else if r >= 0.0 {
            r_perm >= r
        } else {
            r_perm <= r
        };
        if extreme {
            hits += 1;
        }
    }
    (1 + hits) as f64 / (1 + params.n_permutations()) as f64
}

/// Parametric p-value of a Pearson coefficient on `w` pairs.
///
/// NaN when fewer than 3 pairs leave no degrees of freedom.
fn student_t_p_value(r: f64, w: usize, two_tailed: bool) -> f64 {
    if w < 3 {
        return f64::NAN;
    }
    let df = (w - 2) as f64;
    if r.abs() >= 1.0 {
        return 0.0;
    }
    let t = r * (df / (1.0 - r * r)).sqrt();
    let Ok(dist) = StudentsT::new(0.0, 1.0, df) else {
        return f64::NAN;
    };
    if two_tailed {
        2.0 * (1.0 - dist.cdf(t.abs()))
    } else if r >= 0.0 {
        1.0 - dist.cdf(t)
    } else {
        dist.cdf(t)
    }
}

/// SplitMix64 finaliser over the base seed and both start offsets.
fn pair_seed(seed: u64, start_1: usize, start_2: usize) -> u64 {
    let mut z = seed
        ^ (start_1 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (start_2 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
