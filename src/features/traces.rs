//! Eligibility traces.
//!
//! A trace keeps a decaying memory of which input entries were recently
//! nonzero. On every call the trace first decays (`trace *= decay`) and is
//! then bumped wherever the input is nonzero:
//!
//! - [`AccumulatingTrace`] adds 1, so repeated activity piles up
//! - [`ReplacingTrace`] sets the entry to 1

use crate::error::{FeatureError, Result};
use crate::features::Feature;
use crate::types::Real;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters shared by both trace kinds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceParams {
    /// Length of the input and the trace.
    pub n_input: usize,

    /// Per-step decay factor in `[0, 1]`.
    pub decay: Real,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            n_input: 1,
            decay: 0.9,
        }
    }
}

impl TraceParams {
    fn validate(&self) -> Result<()> {
        if self.n_input == 0 {
            return Err(FeatureError::invalid_config("n_input", "Must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.decay) {
            return Err(FeatureError::invalid_config(
                "decay",
                format!("Must be between 0.0 and 1.0, got {}", self.decay),
            ));
        }
        Ok(())
    }
}

macro_rules! trace_common {
    ($name:ident) => {
        impl $name {
            /// Returns the decay factor.
            pub fn decay(&self) -> Real {
                self.decay
            }

            /// Returns the current trace.
            pub fn trace(&self) -> &[Real] {
                &self.trace
            }

            /// Zeroes the trace, e.g. at the start of an episode.
            pub fn reset(&mut self) {
                self.trace.fill(0.0);
            }
        }

        impl Feature<[Real]> for $name {
            type Output = Real;

            fn n_input(&self) -> usize {
                self.trace.len()
            }

            fn n_output(&self) -> usize {
                self.trace.len()
            }

            fn apply(&mut self, input: &[Real]) -> Result<Vec<Real>> {
                Ok(self.update(input)?.to_vec())
            }
        }
    };
}

/// Trace that adds 1 wherever the input is nonzero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccumulatingTrace {
    decay: Real,
    trace: Vec<Real>,
}

impl AccumulatingTrace {
    /// Creates a zeroed accumulating trace.
    pub fn new(params: TraceParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            decay: params.decay,
            trace: vec![0.0; params.n_input],
        })
    }

    /// Decays the trace, accumulates the input's nonzero pattern and returns
    /// the updated trace.
    pub fn update(&mut self, input: &[Real]) -> Result<&[Real]> {
        FeatureError::check_len(self.trace.len(), input.len())?;
        for (t, &x) in self.trace.iter_mut().zip(input) {
            *t *= self.decay;
            if x != 0.0 {
                *t += 1.0;
            }
        }
        Ok(&self.trace)
    }
}

trace_common!(AccumulatingTrace);

/// Trace that resets to 1 wherever the input is nonzero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReplacingTrace {
    decay: Real,
    trace: Vec<Real>,
}

impl ReplacingTrace {
    /// Creates a zeroed replacing trace.
    pub fn new(params: TraceParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            decay: params.decay,
            trace: vec![0.0; params.n_input],
        })
    }

    /// Decays the trace, sets the input's nonzero entries to 1 and returns
    /// the updated trace.
    pub fn update(&mut self, input: &[Real]) -> Result<&[Real]> {
        FeatureError::check_len(self.trace.len(), input.len())?;
        for (t, &x) in self.trace.iter_mut().zip(input) {
            *t = if x != 0.0 { 1.0 } else { *t * self.decay };
        }
        Ok(&self.trace)
    }
}

trace_common!(ReplacingTrace);
