use std::fmt;

/// Condition a measured value must satisfy for a tier to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Above(f64),
    AtLeast(f64),
    Below(f64),
    /// Strictly outside the inclusive band `[low, high]`
    Outside(f64, f64),
    Any,
}

impl Bound {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Bound::Above(n) => value > n,
            Bound::AtLeast(n) => value >= n,
            Bound::Below(n) => value < n,
            Bound::Outside(low, high) => value < low || value > high,
            Bound::Any => true,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Above(n) => write!(f, ">{}", n),
            Bound::AtLeast(n) => write!(f, ">={}", n),
            Bound::Below(n) => write!(f, "<{}", n),
            Bound::Outside(low, high) => write!(f, "<{} or >{}", low, high),
            Bound::Any => f.write_str("otherwise"),
        }
    }
}

/// What a matched tier does to the running score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Add(f64),
    Set(f64),
}

impl Effect {
    pub fn apply(&self, score: f64) -> f64 {
        match *self {
            Effect::Add(n) => score + n,
            Effect::Set(n) => n,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Add(n) => write!(f, "{:+}", n),
            Effect::Set(n) => write!(f, "={}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub bound: Bound,
    pub effect: Effect,
}

impl Tier {
    pub const fn new(bound: Bound, effect: Effect) -> Self {
        Self { bound, effect }
    }

    /// Shorthand for the common "above threshold, add adjustment" band.
    pub const fn above(threshold: f64, adjustment: f64) -> Self {
        Self::new(Bound::Above(threshold), Effect::Add(adjustment))
    }

    pub const fn below(threshold: f64, adjustment: f64) -> Self {
        Self::new(Bound::Below(threshold), Effect::Add(adjustment))
    }
}

/// Outcome of evaluating a tier table against one value.
#[derive(Debug, Clone, Copy)]
pub struct TierResult<'a> {
    pub score: f64,
    pub matched: Option<&'a Tier>,
}

/// Apply the first tier whose bound matches `value`. Tables are ordered from
/// the most to the least severe band, so later tiers never stack on earlier
/// ones. Returns the score unchanged when nothing matches.
pub fn apply_first_match(score: f64, value: f64, tiers: &[Tier]) -> TierResult<'_> {
    for tier in tiers {
        if tier.bound.matches(value) {
            return TierResult {
                score: tier.effect.apply(score),
                matched: Some(tier),
            };
        }
    }
    TierResult {
        score,
        matched: None,
    }
}
