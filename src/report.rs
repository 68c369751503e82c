/*!
Error printer for `main`, showing the whole `source()` chain.
*/

use std::error::Error as StdError;

pub struct Report(Box<dyn StdError>);

impl Report {
    /// Errors that caused this one, outermost first.
    pub fn causes(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> + '_ {
        std::iter::successors(self.0.source(), |&e| e.source())
    }
}

impl std::fmt::Debug for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.0)?;

        let mut causes = self.causes().enumerate().peekable();
        if causes.peek().is_some() {
            writeln!(f, "\nCaused by:")?;
        }
        for (i, e) in causes {
            writeln!(f, "  {}: {}", i, e)?;
        }

        Ok(())
    }
}

impl<E: Into<Box<dyn StdError>>> From<E> for Report {
    fn from(e: E) -> Self {
        Report(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::check_line;

    #[test]
    fn prints_cause_chain() {
        let report = Report::from(check_line("(p q)").unwrap_err());

        assert_eq!(report.causes().count(), 1);
        assert_eq!(
            format!("{:?}", report),
            "Syntax error: Expected ')' or one of '<->', '->', '&', '|' at position 3, found 'q'\n\
             \n\
             Caused by:\n  \
             0: Expected ')' or one of '<->', '->', '&', '|' at position 3, found 'q'\n"
        );
    }
}
