//! Parsing of comma-separated sequence tokens into a typed [`SequenceSpec`].
//!
//! Syntax:
//! ```text
//! 1,0.8,0.6        repeat: rotate through the listed values
//! +11.5            accumulate: 0, 11.5, 23, 34.5, ...
//! +0,40000         accumulate from 0 in steps of 40000
//! +-7:7,2          accumulate from -7 in steps of 2, wrapping back to -7
//!                  whenever the total leaves [-7, 7)
//! ```
//!
//! Bounds may be declared in either order; `+7:-7` covers the same range.
//!
//! In accumulate mode any later token that itself starts with `+` is a hold
//! marker: the cycler steps over it before reading the next delta.

use crate::error::ConfigError;

/// How a sequence turns its tokens into values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceMode {
    /// Rotate through the listed values
    Repeat,
    /// Treat the values as deltas summed into a running total
    Accumulate,
}

/// Range declared by the head token of an accumulate sequence (`+first:second`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub first: f64,
    pub second: f64,
}

impl Bounds {
    /// The running total starts here and wraps back here
    pub fn lower(&self) -> f64 {
        self.first.min(self.second)
    }

    pub fn upper(&self) -> f64 {
        self.first.max(self.second)
    }

    /// Half-open membership test: `lower <= value < upper`
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower() && value < self.upper()
    }
}

/// One token of a sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceStep {
    pub value: f64,
    /// Token was written with a leading `+`
    pub hold: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSpec {
    mode: SequenceMode,
    steps: Vec<SequenceStep>,
    start: f64,
    bounds: Option<Bounds>,
}

impl SequenceSpec {
    /// Parse a comma-separated token list such as `"+-7:7,2"`
    pub fn parse(attribute: &str, source: &str) -> Result<Self, ConfigError> {
        let tokens: Vec<&str> = source.split(',').collect();
        Self::from_tokens(attribute, &tokens)
    }

    /// Build a sequence from tokens that were already split on commas
    pub fn from_tokens<S: AsRef<str>>(attribute: &str, tokens: &[S]) -> Result<Self, ConfigError> {
        let tokens: Vec<&str> = tokens.iter().map(|t| t.as_ref().trim()).collect();
        if tokens.is_empty() || tokens.iter().all(|t| t.is_empty()) {
            return Err(ConfigError::EmptySequence(attribute.to_string()));
        }

        let head = tokens[0];
        if head.starts_with('+') {
            Self::parse_accumulate(attribute, &tokens)
        } else {
            let steps = tokens
                .iter()
                .map(|token| parse_step(attribute, token))
                .collect::<Result<Vec<_>, _>>()?;
            let start = steps[0].value;
            Ok(Self {
                mode: SequenceMode::Repeat,
                steps,
                start,
                bounds: None,
            })
        }
    }

    fn parse_accumulate(attribute: &str, tokens: &[&str]) -> Result<Self, ConfigError> {
        let head = tokens[0].trim_start_matches('+');
        let mut parts = head.split(':');
        // Tokens after the second ':' are ignored.
        let first = parse_number(attribute, parts.next().unwrap_or(""))?;
        let bounds = match parts.next() {
            Some(second) if !second.trim().is_empty() => Some(Bounds {
                first,
                second: parse_number(attribute, second)?,
            }),
            _ => None,
        };
        let start = bounds.map(|b| b.lower()).unwrap_or(0.0);

        let mut steps = Vec::with_capacity(tokens.len());
        steps.push(SequenceStep {
            value: first,
            hold: true,
        });
        for token in &tokens[1..] {
            steps.push(parse_step(attribute, token)?);
        }

        // A hold on the last token lands the cursor on the head, which only
        // carries a step value when it declares no bounds.
        let lands_on_head = steps.last().map(|s| s.hold).unwrap_or(false);
        if bounds.is_some() && lands_on_head {
            return Err(ConfigError::sequence(
                attribute,
                format!("'{}' needs a step value after its bounds", tokens.join(",")),
            ));
        }

        Ok(Self {
            mode: SequenceMode::Accumulate,
            steps,
            start,
            bounds,
        })
    }

    pub fn mode(&self) -> SequenceMode {
        self.mode
    }

    pub fn is_accumulate(&self) -> bool {
        self.mode == SequenceMode::Accumulate
    }

    pub fn steps(&self) -> &[SequenceStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// First value the sequence produces
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Numeric value of the first token. For an accumulate head this is
    /// the first declared bound.
    pub fn head_value(&self) -> f64 {
        self.steps[0].value
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

fn parse_step(attribute: &str, token: &str) -> Result<SequenceStep, ConfigError> {
    Ok(SequenceStep {
        value: parse_number(attribute, token)?,
        hold: token.starts_with('+'),
    })
}

fn parse_number(attribute: &str, token: &str) -> Result<f64, ConfigError> {
    let token = token.trim();
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConfigError::sequence(
            attribute,
            format!("'{}' is not a number", token),
        )),
    }
}
