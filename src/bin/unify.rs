//! Binary for exercising the Boolean unifier against a JSON-encoded
//! equation set.
//!
//! This binary:
//! 1. Loads a list of `(Term, Term)` equations from JSON
//! 2. Loads the set of rigid variable ids, if any
//! 3. Runs the staged solver
//! 4. Prints the resulting substitution (or the conflict) as JSON

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use verbum_effects::hooks::{Phase, SolverHooks};
use verbum_effects::{Equation, RigidSet, SolveConfig, Substitution, Term, unify_terms};

/// CLI arguments for running the unifier against a JSON equation set.
#[derive(Parser, Debug)]
#[command(author, version, about = "Run the Boolean unifier against a JSON-encoded equation set", long_about = None)]
struct Args {
    /// Path to a JSON file containing a list of `[lhs, rhs]` term pairs
    #[arg(short = 'e', long)]
    equations: PathBuf,

    /// Comma-separated rigid variable ids
    #[arg(short = 'r', long, value_delimiter = ',')]
    rigid: Vec<usize>,

    /// Print a one-line summary after every solver phase
    #[arg(long)]
    trace: bool,

    /// Output JSON file path; prints to stdout if omitted
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Debug)]
struct EquationInput {
    lhs: Term,
    rhs: Term,
}

#[derive(Serialize, Debug)]
#[serde(tag = "result")]
enum SolveOutput {
    #[serde(rename = "unified")]
    Unified { bindings: Vec<(usize, Term)> },
    #[serde(rename = "conflict")]
    Conflict { message: String },
}

/// Prints one line per phase boundary when `--trace` is passed.
struct PrintHooks;

impl SolverHooks for PrintHooks {
    fn on_phase_complete(&self, phase: Phase, equations: &[Equation], substitution: &Substitution) {
        println!(
            "[{phase}] {} equation(s) remaining, {} binding(s) so far",
            equations.len(),
            substitution.len()
        );
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("Loading equations from {:?}...", args.equations);
    let inputs: Vec<EquationInput> = verbum_effects::utils::json::load_json(&args.equations)
        .with_context(|| format!("failed to load equations from {:?}", args.equations))?;

    let equations: Vec<Equation> = inputs
        .into_iter()
        .map(|e| Equation::new(e.lhs, e.rhs))
        .collect();
    let rigid = RigidSet::new(args.rigid);

    println!("Running solver on {} equation(s)...", equations.len());
    let hooks: Box<dyn SolverHooks> = if args.trace {
        Box::new(PrintHooks)
    } else {
        Box::new(verbum_effects::NoopHooks)
    };

    let output = match unify_terms(equations, &rigid, hooks.as_ref(), &SolveConfig::default()) {
        Ok(substitution) => SolveOutput::Unified {
            bindings: substitution
                .iter()
                .map(|(id, term)| (id, term.clone()))
                .collect(),
        },
        Err(err) => SolveOutput::Conflict {
            message: err.to_string(),
        },
    };

    match &args.output {
        Some(path) => {
            verbum_effects::utils::json::save_json(&output, path)
                .with_context(|| format!("failed to write output to {path:?}"))?;
            println!("Wrote result to {path:?}");
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
