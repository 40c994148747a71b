use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use typolife::lineage::{self, LineageConfig};
use typolife::roster;
use typolife::strand::Strand;

#[derive(Parser)]
#[command(name = "typolife", about = "Typogenetics: strands, enzymes, and self-replication")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one strand's lineage and report how it ends.
    RunIterations(RunIterationsArgs),
    /// Sweep every strand of one length and print a verdict per strand.
    RunManyIterations(RunManyIterationsArgs),
    /// Check that every strand in a roster file self-replicates.
    Verify(VerifyArgs),
}

#[derive(Args)]
struct RunIterationsArgs {
    /// Starting strand; a random one is drawn when omitted.
    #[arg(long)]
    starting_string: Option<String>,

    /// Generations to run before giving up.
    #[arg(long, default_value_t = 10)]
    max_generations: usize,

    /// Random seed for reproducibility.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Shortest random starting strand.
    #[arg(long, default_value_t = 12)]
    min_length: usize,

    /// Longest random starting strand.
    #[arg(long, default_value_t = 36)]
    max_length: usize,

    /// Print the full per-generation trace.
    #[arg(long)]
    verbose: bool,
}

#[derive(Args)]
struct RunManyIterationsArgs {
    /// Length of the strands to sweep.
    #[arg(long)]
    strand_length: usize,

    /// Generations to run per strand.
    #[arg(long, default_value_t = 10)]
    max_generations: usize,

    /// Pool size above which a run is declared saturated.
    #[arg(long, default_value_t = 1024)]
    max_population: usize,
}

#[derive(Args)]
struct VerifyArgs {
    /// Roster file: one strand per line, `#` starts a comment.
    file: std::path::PathBuf,

    /// Generations allowed for each candidate to replicate.
    #[arg(long, default_value_t = 3)]
    max_generations: usize,
}

fn main() {
    match Cli::parse().command {
        Command::RunIterations(args) => run_iterations(args),
        Command::RunManyIterations(args) => run_many_iterations(args),
        Command::Verify(args) => verify_roster(args),
    }
}

fn or_exit<T>(result: Result<T, impl std::fmt::Display>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn run_iterations(args: RunIterationsArgs) {
    let strand = match args.starting_string {
        Some(ref text) => or_exit(text.parse::<Strand>()),
        None => {
            if args.min_length == 0 || args.min_length > args.max_length {
                eprintln!("Random strand lengths must satisfy 1 <= min <= max");
                std::process::exit(1);
            }
            let mut rng = SmallRng::seed_from_u64(args.seed);
            Strand::random(&mut rng, args.min_length, args.max_length)
        }
    };

    let config = LineageConfig {
        max_generations: args.max_generations,
        ..Default::default()
    };
    let report = or_exit(lineage::run(&strand, &config));

    println!("strand: {strand}");
    if args.verbose {
        for generation in &report.generations {
            if generation.strands.is_empty() {
                println!("generation {}: (empty)", generation.index);
            } else {
                let listed: Vec<String> =
                    generation.strands.iter().map(Strand::to_string).collect();
                println!("generation {}: {}", generation.index, listed.join(" "));
            }
        }
    }
    println!("verdict: {}", report.verdict);
}

fn run_many_iterations(args: RunManyIterationsArgs) {
    let config = LineageConfig {
        max_generations: args.max_generations,
        max_population: args.max_population,
    };
    let report = or_exit(lineage::survey(args.strand_length, &config));

    println!("strand,verdict,generation");
    for entry in &report.entries {
        let generation = entry
            .verdict
            .generation()
            .map_or(String::new(), |g| g.to_string());
        println!("{},{},{}", entry.strand, entry.verdict.label(), generation);
    }
    eprintln!(
        "{} strands of length {}: {} self-replicating",
        report.entries.len(),
        report.strand_length,
        report.self_replicating()
    );
}

fn verify_roster(args: VerifyArgs) {
    let text = or_exit(
        std::fs::read_to_string(&args.file)
            .map_err(|e| format!("{}: {e}", args.file.display())),
    );
    let candidates =
        or_exit(roster::parse(&text).map_err(|e| format!("{}: {e}", args.file.display())));
    let config = LineageConfig {
        max_generations: args.max_generations,
        ..Default::default()
    };
    let outcomes = or_exit(roster::verify(&candidates, &config));

    let mut failures = 0;
    for outcome in &outcomes {
        let mark = if outcome.verified() { "ok" } else { "FAILED" };
        println!("{}: {mark} ({})", outcome.strand, outcome.verdict);
        if !outcome.verified() {
            failures += 1;
        }
    }
    if failures > 0 {
        eprintln!(
            "{failures} of {} candidates failed to self-replicate",
            outcomes.len()
        );
        std::process::exit(1);
    }
    eprintln!("all {} candidates verified", outcomes.len());
}
