/*!
Exhaustive truth-table search for a satisfying assignment.
*/

use std::fmt::Display;

use crate::formula::Formula;
use crate::prelude::*;
use crate::variables::Variables;

/// Width of the enumeration counter.
pub const MAX_VARIABLES: usize = u64::BITS as usize;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display(
        "Formula has {} distinct variables but at most {} can be enumerated",
        count,
        max
    ))]
    TooManyVariables { count: usize, max: usize },
}

/// Represents a satisfying assignment for a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Variable name -> value, in registry order
    assignment: Vec<(String, bool)>,
    /// Counter value that produced the assignment
    counter: u64,
}

impl Model {
    pub fn assignment(&self) -> &[(String, bool)] {
        &self.assignment
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;

        let mut iter = self.assignment.iter();
        if let Some((name, value)) = iter.next() {
            write!(f, "[{},{}]", name, truth_letter(*value))?;
        }
        for (name, value) in iter {
            write!(f, ",[{},{}]", name, truth_letter(*value))?;
        }

        write!(f, "]")?;

        Ok(())
    }
}

fn truth_letter(value: bool) -> char {
    if value {
        'V'
    } else {
        'F'
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Satisfiable(Model),
    Unsatisfiable,
}

impl Verdict {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, Verdict::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            Verdict::Satisfiable(model) => Some(model),
            Verdict::Unsatisfiable => None,
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Satisfiable(model) => write!(f, "SIM, {}", model),
            Verdict::Unsatisfiable => write!(f, "NAO, []"),
        }
    }
}

/// Tries every assignment of `variables` against `formula` and reports the first one that holds.
///
/// Assignments are visited by an increasing counter whose bit `j` is the value of variable `j`,
/// so among several models the one with the smallest counter is returned.
/// A missing formula is unsatisfiable.
pub fn check(formula: Option<&Formula>, variables: &mut Variables) -> Result<Verdict, Error> {
    let formula = match formula {
        Some(formula) => formula,
        None => return Ok(Verdict::Unsatisfiable),
    };

    let count = variables.len();
    ensure!(
        count <= MAX_VARIABLES,
        TooManyVariables {
            count,
            max: MAX_VARIABLES,
        }
    );

    let last = if count == MAX_VARIABLES {
        u64::MAX
    } else {
        (1u64 << count) - 1
    };

    for counter in 0..=last {
        variables.set_from_bits(counter);

        let value = formula.evaluate(variables);
        trace!("{:#b} -> {}", counter, value);

        if value {
            return Ok(Verdict::Satisfiable(Model {
                assignment: variables.assignment(),
                counter,
            }));
        }
    }

    Ok(Verdict::Unsatisfiable)
}
