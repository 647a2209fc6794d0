use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use symbolic_planner::strips::{parser, Planner};

#[derive(Parser)]
#[command(about = "Forward-search planner for STRIPS-style problem files")]
struct Args {
    /// Problem file to solve
    #[arg(default_value = "example.txt")]
    problem: PathBuf,

    /// Skip printing the parsed environment
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let text = fs::read_to_string(&args.problem)
        .with_context(|| format!("reading {}", args.problem.display()))?;
    let env = parser::parse(&text)
        .with_context(|| format!("parsing {}", args.problem.display()))?;
    if !args.quiet {
        println!("{}", env);
    }

    let mut planner = Planner::new(&env);
    let plan = planner.plan();

    println!("Plan:");
    for action in &plan {
        println!("{}", action);
    }
    Ok(())
}
