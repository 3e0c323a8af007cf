//! Structural counters gathered during a check run

use std::fmt;

/// Counts accumulated over one traversal, reported only on success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metrics {
    /// Variable declarations
    pub declarations: usize,
    /// `while` and `do ... while` statements
    pub while_loops: usize,
    /// `if` statements and ternaries
    pub if_and_ternary: usize,
    /// Operator occurrences
    pub operators: usize,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_declaration(&mut self) {
        self.declarations += 1;
    }

    pub fn count_loop(&mut self) {
        self.while_loops += 1;
    }

    pub fn count_conditional(&mut self) {
        self.if_and_ternary += 1;
    }

    pub fn count_operators(&mut self, n: usize) {
        self.operators += n;
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{VAR:{}, WHILE:{}, IF:{}, OP:{}}}",
            self.declarations, self.while_loops, self.if_and_ternary, self.operators
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_line() {
        let mut metrics = Metrics::new();
        metrics.count_declaration();
        metrics.count_declaration();
        metrics.count_loop();
        metrics.count_conditional();
        metrics.count_operators(3);

        assert_eq!(metrics.to_string(), "{VAR:2, WHILE:1, IF:1, OP:3}");
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(Metrics::default().to_string(), "{VAR:0, WHILE:0, IF:0, OP:0}");
    }
}
