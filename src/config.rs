//! Session configuration.

use crate::error::DelaunayError;
use num_traits::Float;

/// Options for a [`Delaunay`](crate::Delaunay) session.
///
/// The defaults match the classic sweep triangulator: up to `0.01` of random
/// jitter on the x coordinate of every inserted point, and a tolerance of
/// `1e-6` for circumcircle and collinearity tests.
///
/// # Example
///
/// ```
/// use sweepmesh::DelaunayConfig;
///
/// let config = DelaunayConfig::<f64>::default().jitter(0.0).seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelaunayConfig<F> {
    /// Upper bound (exclusive) of the uniform jitter added to `x` on insert.
    /// Zero disables jitter.
    pub jitter: F,
    /// Relative tolerance for the sweep's geometric tests. Circumcircle
    /// containment allows `d² - r²` up to `epsilon * r²`, capped at `epsilon`
    /// times the squared extent of the input; a triangle is degenerate when
    /// the sine of its angle at the first vertex is at most `epsilon`.
    pub epsilon: F,
    /// Seed for the jitter generator. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl<F: Float> Default for DelaunayConfig<F> {
    fn default() -> Self {
        Self {
            jitter: F::from(0.01).unwrap(),
            epsilon: F::from(1e-6).unwrap(),
            seed: None,
        }
    }
}

impl<F: Float> DelaunayConfig<F> {
    /// Sets the jitter magnitude.
    pub fn jitter(mut self, jitter: F) -> Self {
        self.jitter = jitter;
        self
    }

    /// Sets the numeric tolerance.
    pub fn epsilon(mut self, epsilon: F) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Makes the jitter sequence reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that jitter and epsilon are finite and non-negative.
    pub fn validate(&self) -> Result<(), DelaunayError> {
        if !self.jitter.is_finite() || self.jitter < F::zero() {
            return Err(DelaunayError::InvalidConfig(
                "jitter must be finite and non-negative",
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon < F::zero() {
            return Err(DelaunayError::InvalidConfig(
                "epsilon must be finite and non-negative",
            ));
        }
        Ok(())
    }
}
