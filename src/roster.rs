use crate::lineage::{self, ConfigError, LineageConfig, Verdict};
use crate::strand::{InvalidBase, Strand};

/// A malformed line in a candidate roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct RosterError {
    /// 1-based line number in the roster text.
    pub line: usize,
    #[source]
    pub source: InvalidBase,
}

/// Parse a candidate roster: one strand per line, leading and trailing
/// whitespace ignored, blank lines and `#` comment lines skipped. The first
/// bad character fails the whole parse.
pub fn parse(text: &str) -> Result<Vec<Strand>, RosterError> {
    let mut strands = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let strand = line.parse().map_err(|source| RosterError {
            line: index + 1,
            source,
        })?;
        strands.push(strand);
    }
    Ok(strands)
}

/// One checked candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterOutcome {
    pub strand: Strand,
    pub verdict: Verdict,
}

impl RosterOutcome {
    pub fn verified(&self) -> bool {
        self.verdict.is_self_replicating()
    }
}

/// Run every candidate through the lineage driver, in roster order.
pub fn verify(
    candidates: &[Strand],
    config: &LineageConfig,
) -> Result<Vec<RosterOutcome>, ConfigError> {
    candidates
        .iter()
        .map(|strand| {
            let verdict = lineage::run(strand, config)?.verdict;
            Ok(RosterOutcome {
                strand: strand.clone(),
                verdict,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let text = "# known self-replicators\n\nAA\n  CG  \n\n# trailer\nATCG\n";
        let strands = parse(text).unwrap();
        let expected: Vec<Strand> = ["AA", "CG", "ATCG"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(strands, expected);
    }

    #[test]
    fn test_parse_of_an_empty_roster_is_empty() {
        assert_eq!(parse(""), Ok(Vec::new()));
        assert_eq!(parse("# nothing here\n\n"), Ok(Vec::new()));
    }

    #[test]
    fn test_parse_reports_the_offending_line() {
        let text = "AT\n\n# ok so far\nCAXG\n";
        let err = parse(text).unwrap_err();
        assert_eq!(err.line, 4);
        assert_eq!(err.source.found, 'X');
        assert_eq!(err.source.position, 2);
        assert_eq!(
            err.to_string(),
            "line 4: invalid base 'X' at position 2 (alphabet is A, C, G, T)"
        );
    }

    #[test]
    fn test_verify_reports_each_candidate_in_order() {
        let config = LineageConfig {
            max_generations: 3,
            ..Default::default()
        };
        let candidates = parse("AA\nATCGATCGATCG\nCACA\n").unwrap();
        let outcomes = verify(&candidates, &config).unwrap();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].verdict, Verdict::SelfReplicating { generation: 1 });
        assert_eq!(outcomes[1].verdict, Verdict::SelfReplicating { generation: 2 });
        assert_eq!(outcomes[2].verdict, Verdict::Stabilized { generation: 1 });
        assert!(outcomes[0].verified() && outcomes[1].verified());
        assert!(!outcomes[2].verified());
    }

    #[test]
    fn test_verify_rejects_a_degenerate_budget() {
        let config = LineageConfig {
            max_generations: 0,
            ..Default::default()
        };
        let candidates = parse("AA\n").unwrap();
        assert_eq!(verify(&candidates, &config), Err(ConfigError::ZeroGenerations));
    }

    #[test]
    fn test_shipped_roster_verifies() {
        // Every strand in the checked-in roster must replicate within the
        // same budget the verify command uses by default.
        let candidates = parse(include_str!("../selfreps.txt")).unwrap();
        assert!(!candidates.is_empty());
        let config = LineageConfig {
            max_generations: 3,
            ..Default::default()
        };
        for outcome in verify(&candidates, &config).unwrap() {
            assert!(
                outcome.verified(),
                "strand {} was {}",
                outcome.strand,
                outcome.verdict
            );
        }
    }
}
