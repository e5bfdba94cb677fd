use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context as _, bail};
use clap::Parser;
use hyeval::prelude::*;
use hyeval::tests_utils::{random_context, random_expression};
use hyeval::walker::{depth, variables};
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Build a random boolean expression and evaluate it with every strategy.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed of the expression and context generator
    #[arg(long, default_value_t = 0x42)]
    seed: u64,

    /// Maximum nesting of the generated expression
    #[arg(short, long, default_value_t = 8)]
    size: usize,

    /// Number of distinct variables (0 for constants only)
    #[arg(long, default_value_t = 4)]
    vars: usize,

    /// Fork threshold for parallel evaluation (overrides the config file)
    #[arg(short, long)]
    bound: Option<usize>,

    /// Stack size in bytes of every forked thread (overrides the config file)
    #[arg(long)]
    stack_size: Option<usize>,

    /// Strategy used for the final, configured run (overrides the config file)
    #[arg(long)]
    strategy: Option<Strategy>,

    /// TOML file with `strategy`, `bound` and `stack_size` keys
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the Graphviz description of the expression to this file
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Leave the last variable out of the context
    #[arg(long)]
    unbound: bool,
}

fn describe(result: &EvalResult<bool>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(err) => format!("error: {err}"),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EvalConfig::load(path)?,
        None => EvalConfig::default(),
    };
    if let Some(bound) = args.bound {
        config.bound = bound;
    }
    if let Some(stack_size) = args.stack_size {
        config.stack_size = stack_size;
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let expr = random_expression(args.size, args.vars, &mut rng);
    let bound_vars = if args.unbound {
        args.vars.saturating_sub(1)
    } else {
        args.vars
    };
    let ctx = random_context(bound_vars, &mut rng);
    info!(
        "Generated {} nodes (depth {}) over variables {:?}",
        expr.node_count(),
        depth(&expr),
        variables(&expr)
    );

    println!("Expression ({} nodes):", expr.node_count());
    expr.pretty_print()?;
    println!();

    if let Some(path) = &args.dot {
        std::fs::write(path, expr.to_graphviz())
            .with_context(|| format!("writing Graphviz output to '{}'", path.display()))?;
        info!("Graphviz description written to '{}'", path.display());
    }

    let evaluator = Evaluator::new(config);
    let mut results = Vec::new();
    for strategy in [Strategy::Short, Strategy::Complete, Strategy::Parallel] {
        evaluator.reset();
        let start = Instant::now();
        let result = evaluator.evaluate_with(strategy, &expr, Some(&ctx));
        let elapsed = start.elapsed();
        let name = strategy.to_string();
        println!(
            "{name:>9}: {:<40} {:>5} forks  {elapsed:?}",
            describe(&result),
            evaluator.forks()
        );
        results.push(result);
    }

    evaluator.reset();
    let configured = evaluator.evaluate(&expr, Some(&ctx));
    println!(
        "configured {} strategy, bound {}: {} ({} forks)",
        evaluator.config().strategy,
        evaluator.config().bound,
        describe(&configured),
        evaluator.forks()
    );

    let [short, complete, parallel] = &results[..] else {
        unreachable!()
    };
    if complete != parallel {
        bail!(
            "parallel evaluation disagrees with exhaustive evaluation: {} vs {}",
            describe(parallel),
            describe(complete)
        );
    }
    match (short, complete) {
        (Ok(s), Ok(c)) if s != c => {
            bail!("short-circuit evaluation disagrees with exhaustive evaluation: {s} vs {c}")
        }
        (Err(err), Ok(_)) => {
            bail!("short-circuit evaluation failed where exhaustive evaluation succeeded: {err}")
        }
        (Ok(_), Err(err)) => warn!("only short-circuit evaluation avoided '{}'", err.name()),
        _ => {}
    }
    Ok(())
}
