use std::collections::HashMap;
use std::fmt;

use super::spec::{SequenceMode, SequenceSpec};

/// Tunable per-channel attributes, each driven by its own sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Scale,
    Wavelength,
    Phase,
    Crop,
    StartPosition,
    Offset,
}

impl Attribute {
    /// Short name used in diagnostics and error messages
    pub fn key(&self) -> &'static str {
        match self {
            Attribute::Scale => "scale",
            Attribute::Wavelength => "wave",
            Attribute::Phase => "phase",
            Attribute::Crop => "crop",
            Attribute::StartPosition => "spos",
            Attribute::Offset => "offset",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct CyclerState {
    cursor: usize,
    last: f64,
}

/// Stateful iterator over one [`SequenceSpec`]
///
/// Repeat sequences return `steps[i % len]` on the i-th pull. Accumulate
/// sequences return their start value first (the lower bound, or 0 when
/// unbounded), then keep adding deltas to a running total. When the total
/// would leave `[lower, upper)` it snaps back to the lower bound instead.
/// The cursor does not move on a wrap.
#[derive(Clone, Debug)]
pub struct SequenceCycler {
    spec: SequenceSpec,
    // Created on the first pull
    state: Option<CyclerState>,
}

impl SequenceCycler {
    pub fn new(spec: SequenceSpec) -> Self {
        Self { spec, state: None }
    }

    pub fn spec(&self) -> &SequenceSpec {
        &self.spec
    }

    /// Whether any value has been pulled since creation or the last reset
    pub fn is_started(&self) -> bool {
        self.state.is_some()
    }

    /// Forget the cursor and running total
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Pull the next value and advance
    pub fn next_value(&mut self) -> f64 {
        match self.spec.mode() {
            SequenceMode::Repeat => self.next_repeat(),
            SequenceMode::Accumulate => self.next_accumulate(),
        }
    }

    fn next_repeat(&mut self) -> f64 {
        let steps = self.spec.steps();
        let state = self.state.get_or_insert_with(CyclerState::default);
        let value = steps[state.cursor % steps.len()].value;
        state.cursor += 1;
        value
    }

    fn next_accumulate(&mut self) -> f64 {
        let Some(state) = self.state.as_mut() else {
            let start = self.spec.start();
            self.state = Some(CyclerState {
                cursor: 0,
                last: start,
            });
            return start;
        };

        let steps = self.spec.steps();
        let mut index = state.cursor % steps.len();
        if steps[index].hold {
            state.cursor += 1;
            index = state.cursor % steps.len();
        }

        let candidate = state.last + steps[index].value;
        if let Some(bounds) = self.spec.bounds() {
            if !bounds.contains(candidate) {
                state.last = bounds.lower();
                return state.last;
            }
        }

        state.last = candidate;
        state.cursor += 1;
        candidate
    }
}

impl Iterator for SequenceCycler {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_value())
    }
}

/// One cycler per attribute, owned by a single engine
#[derive(Clone, Debug, Default)]
pub struct CyclerBank {
    cyclers: HashMap<Attribute, SequenceCycler>,
}

impl CyclerBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the sequence driving `attribute`
    pub fn insert(&mut self, attribute: Attribute, spec: SequenceSpec) {
        self.cyclers.insert(attribute, SequenceCycler::new(spec));
    }

    /// Pull the next raw value for `attribute`.
    /// Attributes without a registered sequence resolve to 0.
    pub fn next(&mut self, attribute: Attribute) -> f64 {
        self.cyclers
            .get_mut(&attribute)
            .map(SequenceCycler::next_value)
            .unwrap_or(0.0)
    }

    pub fn reset(&mut self) {
        for cycler in self.cyclers.values_mut() {
            cycler.reset();
        }
    }
}

/// Fold a raw scale value into a multiplier.
///
/// Exact integers become `1`. Anything else keeps only its fractional part
/// (taken towards negative infinity, so `-0.125` gives `0.875`), rounded to
/// three decimals, with exact ties going to the even digit.
pub fn normalize(value: f64) -> f64 {
    if value.fract() == 0.0 {
        return 1.0;
    }
    let fraction = value.rem_euclid(1.0);
    // Formatting rounds the exact binary value half to even
    format!("{:.3}", fraction).parse().unwrap_or(fraction)
}
