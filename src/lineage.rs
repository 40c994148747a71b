use std::fmt;

use rayon::prelude::*;

use crate::enzyme::translate;
use crate::exec::execute;
use crate::strand::Strand;

/// Limits for a lineage run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineageConfig {
    /// Generations to run before giving up on a verdict.
    pub max_generations: usize,
    /// Pool size above which a run is declared saturated.
    pub max_population: usize,
}

impl Default for LineageConfig {
    fn default() -> Self {
        LineageConfig {
            max_generations: 10,
            max_population: 1024,
        }
    }
}

impl LineageConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.max_population == 0 {
            return Err(ConfigError::ZeroPopulation);
        }
        Ok(())
    }
}

/// A limit that would make the simulation trivially empty or unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max generations must be at least 1")]
    ZeroGenerations,
    #[error("max population must be at least 1")]
    ZeroPopulation,
    #[error("strand length must be at least 1")]
    ZeroStrandLength,
}

/// One generation of the pool. Index 0 is the starting strand by itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub index: usize,
    pub strands: Vec<Strand>,
}

/// How a lineage run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The pool reproduced the starting strand (see [`replicates`]).
    SelfReplicating { generation: usize },
    /// The pool emptied out.
    Extinct { generation: usize },
    /// The pool repeated the previous generation exactly (as a multiset),
    /// so every later generation would repeat it too.
    Stabilized { generation: usize },
    /// The pool outgrew `max_population`.
    Saturated { generation: usize },
    /// The generation budget ran out without a verdict.
    Exhausted,
}

impl Verdict {
    pub fn is_self_replicating(self) -> bool {
        matches!(self, Verdict::SelfReplicating { .. })
    }

    /// The generation the verdict was reached at, if it was reached at all.
    pub fn generation(self) -> Option<usize> {
        match self {
            Verdict::SelfReplicating { generation }
            | Verdict::Extinct { generation }
            | Verdict::Stabilized { generation }
            | Verdict::Saturated { generation } => Some(generation),
            Verdict::Exhausted => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::SelfReplicating { .. } => "self-replicating",
            Verdict::Extinct { .. } => "extinct",
            Verdict::Stabilized { .. } => "stabilized",
            Verdict::Saturated { .. } => "saturated",
            Verdict::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.generation() {
            Some(generation) => write!(f, "{} at generation {generation}", self.label()),
            None => f.write_str(self.label()),
        }
    }
}

/// A finished run: the verdict plus the full per-generation trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub verdict: Verdict,
    pub generations: Vec<Generation>,
}

/// Run a strand's lineage until a verdict or the generation budget.
///
/// Each generation, every strand in the pool is translated and each of its
/// enzymes is executed against that strand as it stood when the generation
/// began, so enzymes from one strand never see each other's edits; all
/// outputs, in order, form the next pool. After each generation the verdicts
/// are tried in a fixed order: an empty pool is extinct, a pool passing the
/// replication check is self-replicating, a pool larger than
/// `max_population` is saturated, and a pool matching the previous one is
/// stabilized.
pub fn run(strand: &Strand, config: &LineageConfig) -> Result<RunReport, ConfigError> {
    config.validate()?;
    Ok(run_validated(strand, config))
}

fn run_validated(strand: &Strand, config: &LineageConfig) -> RunReport {
    let mut pool = vec![strand.clone()];
    let mut generations = vec![Generation {
        index: 0,
        strands: pool.clone(),
    }];
    for index in 1..=config.max_generations {
        let mut next = Vec::new();
        for live in &pool {
            for enzyme in translate(live) {
                next.extend(execute(&enzyme, live));
            }
        }
        generations.push(Generation {
            index,
            strands: next.clone(),
        });
        let verdict = if next.is_empty() {
            Some(Verdict::Extinct { generation: index })
        } else if replicates(&next, strand) {
            Some(Verdict::SelfReplicating { generation: index })
        } else if next.len() > config.max_population {
            Some(Verdict::Saturated { generation: index })
        } else if multiset_eq(&next, &pool) {
            Some(Verdict::Stabilized { generation: index })
        } else {
            None
        };
        pool = next;
        if let Some(verdict) = verdict {
            return RunReport {
                verdict,
                generations,
            };
        }
    }
    RunReport {
        verdict: Verdict::Exhausted,
        generations,
    }
}

/// Whether a pool counts as having replicated the original strand: it holds
/// two copies of the original, or one copy plus any other strand. A pool
/// holding the original alone is mere survival.
pub fn replicates(pool: &[Strand], original: &Strand) -> bool {
    let copies = pool.iter().filter(|strand| *strand == original).count();
    copies >= 2 || (copies >= 1 && pool.len() >= 2)
}

/// Pools count as equal regardless of strand order.
fn multiset_eq(a: &[Strand], b: &[Strand]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a: Vec<&Strand> = a.iter().collect();
    let mut b: Vec<&Strand> = b.iter().collect();
    a.sort();
    b.sort();
    a == b
}

/// One surveyed strand and its verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyEntry {
    pub strand: Strand,
    pub verdict: Verdict,
}

/// Verdicts for every strand of one length, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyReport {
    pub strand_length: usize,
    pub entries: Vec<SurveyEntry>,
}

impl SurveyReport {
    pub fn self_replicating(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.verdict.is_self_replicating())
            .count()
    }
}

/// Run every strand of the given length through [`run`].
///
/// Runs are independent, so they execute in parallel; the report lists them
/// in enumeration order (`A < C < G < T`), identical to a sequential sweep.
pub fn survey(strand_length: usize, config: &LineageConfig) -> Result<SurveyReport, ConfigError> {
    if strand_length == 0 {
        return Err(ConfigError::ZeroStrandLength);
    }
    config.validate()?;
    let strands: Vec<Strand> = Strand::all_of_length(strand_length).collect();
    let entries = strands
        .into_par_iter()
        .map(|strand| {
            let verdict = run_validated(&strand, config).verdict;
            SurveyEntry { strand, verdict }
        })
        .collect();
    Ok(SurveyReport {
        strand_length,
        entries,
    })
}
