//! Named-condition verdicts
//!
//! Legality checks and win detection both report *which* conditions held so
//! callers can explain a rejected move or announce who won.

use std::fmt;

use strum::{Display, IntoStaticStr};

/// Every condition label a verdict can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Condition {
    // Placement checks
    WithinBounds,
    HasSupport,
    SpaceAvailable,
    CardsLeft,
    // Recycling checks
    AllCardsPlaced,
    CardExists,
    CanRemove,
    DifferentThanLast,
    // Outcomes
    Red,
    White,
    Full,
    Open,
    Draw,
}

/// How condition values combine into the overall success flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Every condition must hold (legality)
    All,
    /// One condition is enough (win detection)
    Any,
}

/// Outcome of a rule evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    conditions: Vec<(Condition, bool)>,
    aggregation: Aggregation,
    detail: Option<&'static str>,
}

impl Verdict {
    pub fn new(conditions: Vec<(Condition, bool)>, aggregation: Aggregation) -> Self {
        Self {
            conditions,
            aggregation,
            detail: None,
        }
    }

    /// AND-aggregated verdict
    pub fn all(conditions: impl IntoIterator<Item = (Condition, bool)>) -> Self {
        Self::new(conditions.into_iter().collect(), Aggregation::All)
    }

    /// OR-aggregated verdict
    pub fn any(conditions: impl IntoIterator<Item = (Condition, bool)>) -> Self {
        Self::new(conditions.into_iter().collect(), Aggregation::Any)
    }

    /// Game ended without a winner
    pub fn draw(reason: &'static str) -> Self {
        Self {
            conditions: vec![(Condition::Draw, true)],
            aggregation: Aggregation::All,
            detail: Some(reason),
        }
    }

    pub fn success(&self) -> bool {
        match self.aggregation {
            Aggregation::All => self.conditions.iter().all(|&(_, ok)| ok),
            Aggregation::Any => self.conditions.iter().any(|&(_, ok)| ok),
        }
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    pub fn detail(&self) -> Option<&'static str> {
        self.detail
    }

    pub fn conditions(&self) -> &[(Condition, bool)] {
        &self.conditions
    }

    /// Value of a single condition, `None` if it was not evaluated
    pub fn get(&self, condition: Condition) -> Option<bool> {
        self.conditions
            .iter()
            .find(|(c, _)| *c == condition)
            .map(|&(_, ok)| ok)
    }

    /// Conditions that held
    pub fn held(&self) -> impl Iterator<Item = Condition> + '_ {
        self.conditions.iter().filter(|(_, ok)| *ok).map(|&(c, _)| c)
    }

    /// Conditions that failed
    pub fn failed(&self) -> impl Iterator<Item = Condition> + '_ {
        self.conditions.iter().filter(|(_, ok)| !*ok).map(|&(c, _)| c)
    }

    pub fn is_draw(&self) -> bool {
        self.get(Condition::Draw) == Some(true)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (condition, ok) in &self.conditions {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{condition}:{ok}")?;
        }
        if let Some(detail) = self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}
