/*!
A module to represent propositional formulas as trees.
*/

use std::fmt::Display;

use crate::variables::Variables;

/// Binary connectives, as written between the operands of a parenthesized group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    Conjunction,
    Disjunction,
    Implication,
    Biconditional,
}

impl Connective {
    /// Operator tokens in lookahead order.
    /// `<->` and `->` share a suffix, so the longest token has to be tried first.
    const TOKENS: [(&'static str, Connective); 4] = [
        ("<->", Connective::Biconditional),
        ("->", Connective::Implication),
        ("&", Connective::Conjunction),
        ("|", Connective::Disjunction),
    ];

    /// Matches an operator token at the start of `input`.
    /// Returns the connective and the length of its token.
    pub fn lex(input: &str) -> Option<(Connective, usize)> {
        Self::TOKENS
            .iter()
            .find(|(token, _)| input.starts_with(token))
            .map(|&(token, connective)| (connective, token.len()))
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Connective::Conjunction => "&",
            Connective::Disjunction => "|",
            Connective::Implication => "->",
            Connective::Biconditional => "<->",
        }
    }

    pub fn apply(&self, left: bool, right: bool) -> bool {
        match self {
            Connective::Conjunction => left && right,
            Connective::Disjunction => left || right,
            Connective::Implication => !left || right,
            Connective::Biconditional => left == right,
        }
    }
}

impl Display for Connective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Formula tree. Every inner node owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    Variable(String),
    Negation(Box<Formula>),
    Conjunction(Box<Formula>, Box<Formula>),
    Disjunction(Box<Formula>, Box<Formula>),
    Implication(Box<Formula>, Box<Formula>),
    Biconditional(Box<Formula>, Box<Formula>),
}

impl Formula {
    pub fn variable(name: impl Into<String>) -> Self {
        Formula::Variable(name.into())
    }

    pub fn negation(child: Formula) -> Self {
        Formula::Negation(Box::new(child))
    }

    pub fn binary(connective: Connective, left: Formula, right: Formula) -> Self {
        let (left, right) = (Box::new(left), Box::new(right));
        match connective {
            Connective::Conjunction => Formula::Conjunction(left, right),
            Connective::Disjunction => Formula::Disjunction(left, right),
            Connective::Implication => Formula::Implication(left, right),
            Connective::Biconditional => Formula::Biconditional(left, right),
        }
    }

    /// Evaluates the formula under the current values of `variables`.
    ///
    /// Children are evaluated before their parent and the left operand before the right one.
    /// A variable missing from `variables` reads as `false`.
    pub fn evaluate(&self, variables: &Variables) -> bool {
        match self {
            Formula::Variable(name) => variables.value_of(name),
            Formula::Negation(child) => !child.evaluate(variables),
            Formula::Conjunction(left, right) => {
                evaluate_binary(Connective::Conjunction, left, right, variables)
            }
            Formula::Disjunction(left, right) => {
                evaluate_binary(Connective::Disjunction, left, right, variables)
            }
            Formula::Implication(left, right) => {
                evaluate_binary(Connective::Implication, left, right, variables)
            }
            Formula::Biconditional(left, right) => {
                evaluate_binary(Connective::Biconditional, left, right, variables)
            }
        }
    }
}

fn evaluate_binary(
    connective: Connective,
    left: &Formula,
    right: &Formula,
    variables: &Variables,
) -> bool {
    let left = left.evaluate(variables);
    let right = right.evaluate(variables);
    connective.apply(left, right)
}

impl Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Variable(name) => write!(f, "{}", name),
            Formula::Negation(child) => write!(f, "~{}", child),
            Formula::Conjunction(left, right) => {
                write!(f, "({} {} {})", left, Connective::Conjunction, right)
            }
            Formula::Disjunction(left, right) => {
                write!(f, "({} {} {})", left, Connective::Disjunction, right)
            }
            Formula::Implication(left, right) => {
                write!(f, "({} {} {})", left, Connective::Implication, right)
            }
            Formula::Biconditional(left, right) => {
                write!(f, "({} {} {})", left, Connective::Biconditional, right)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Formula {
        Formula::variable(name)
    }

    #[test]
    fn lex_prefers_longest_token() {
        assert_eq!(
            Connective::lex("<->q)"),
            Some((Connective::Biconditional, 3))
        );
        assert_eq!(Connective::lex("->q)"), Some((Connective::Implication, 2)));
        assert_eq!(Connective::lex("&q"), Some((Connective::Conjunction, 1)));
        assert_eq!(Connective::lex("|q"), Some((Connective::Disjunction, 1)));
        assert_eq!(Connective::lex("<-q"), None);
        assert_eq!(Connective::lex("-q"), None);
        assert_eq!(Connective::lex(""), None);
    }

    #[test]
    fn connective_truth_tables() {
        let cases = [(false, false), (false, true), (true, false), (true, true)];
        let expected = [
            (Connective::Conjunction, [false, false, false, true]),
            (Connective::Disjunction, [false, true, true, true]),
            (Connective::Implication, [true, true, false, true]),
            (Connective::Biconditional, [true, false, false, true]),
        ];

        for (connective, column) in expected.iter() {
            for (&(left, right), &value) in cases.iter().zip(column.iter()) {
                assert_eq!(
                    connective.apply(left, right),
                    value,
                    "{} {} {}",
                    left,
                    connective,
                    right
                );
            }
        }
    }

    #[test]
    fn evaluate_reads_registry() {
        let formula = Formula::binary(
            Connective::Implication,
            var("p"),
            Formula::negation(var("q")),
        );

        let mut variables = Variables::new();
        variables.register("p");
        variables.register("q");

        variables.set_from_bits(0b11);
        assert!(!formula.evaluate(&variables));
        variables.set_from_bits(0b01);
        assert!(formula.evaluate(&variables));
    }

    #[test]
    fn unregistered_variable_is_false() {
        let variables = Variables::new();
        assert!(!var("ghost").evaluate(&variables));
        assert!(Formula::negation(var("ghost")).evaluate(&variables));
    }

    #[test]
    fn display_is_fully_parenthesized() {
        let formula = Formula::binary(
            Connective::Biconditional,
            Formula::negation(Formula::negation(var("p"))),
            Formula::binary(Connective::Disjunction, var("q1"), var("r")),
        );

        assert_eq!(formula.to_string(), "(~~p <-> (q1 | r))");
    }
}
