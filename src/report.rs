use num_format::{Locale, ToFormattedString};
use prettytable::{row, Table};
use std::io::{self, Write};

use crate::runner::RunResult;

/// One line per mismatched vector, in vector order.
pub fn write_diagnostics<W: Write>(result: &RunResult, mut out: W) -> io::Result<usize> {
    let mut n = 0;
    for o in result.scoreboard.mismatches() {
        writeln!(out, "{}", o.diagnostic())?;
        n += 1;
    }
    Ok(n)
}

pub fn summary_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["ix", "expected", "stretched", "result"]);
    for o in result.scoreboard.outcomes() {
        let verdict = if o.passed() { "passed" } else { "failed" };
        table.add_row(row![o.index, o.expected, o.observed, verdict]);
    }
    table
}

pub fn summary_lines(result: &RunResult) -> Vec<String> {
    vec![
        format!("SCENARIO {}: {}", result.scenario, result.scoreboard.result_str()),
        format!("Pulses: {}", result.pulses.to_formatted_string(&Locale::en)),
        format!("Half-cycle steps: {}", (result.pulses * 2).to_formatted_string(&Locale::en)),
    ]
}

pub fn print_summary(result: &RunResult) {
    if !result.scoreboard.outcomes().is_empty() {
        summary_table(result).printstd();
    }
    for line in summary_lines(result) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testbench::Scoreboard;

    fn result() -> RunResult {
        let mut scoreboard = Scoreboard::new();
        scoreboard.add(0, 0, 0);
        scoreboard.add(1, 9, 0);
        scoreboard.add(2, 3, 3);
        RunResult {
            scenario: "stretch".to_string(),
            scoreboard,
            pulses: 1234,
            time: 2469,
        }
    }

    #[test]
    fn one_diagnostic_per_mismatch() {
        let mut buf = Vec::new();
        assert_eq!(write_diagnostics(&result(), &mut buf).unwrap(), 1);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "ix 1 expected 9 stretched cycles, got 0\n"
        );
    }

    #[test]
    fn summary_formats_counts() {
        let lines = summary_lines(&result());
        assert_eq!(lines[1], "Pulses: 1,234");
        assert_eq!(lines[2], "Half-cycle steps: 2,468");
        assert_eq!(summary_table(&result()).len(), 3);
    }
}
