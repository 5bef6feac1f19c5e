use anyhow::{anyhow, Result};
use clap::{arg, Command};
use knapsack_algorithms::knapsack as algorithm;
use knapsack_challenges::knapsack::{Challenge, Difficulty, Solution};
use knapsack_utils::{dejsonify, jsonify, read_json_arg, u8s_from_str};
use log::{debug, info};

fn cli() -> Command {
    Command::new("knapsack-verifier")
        .about("Generates, solves and verifies 0/1 knapsack instances")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("generate")
                .about("Generates a challenge instance")
                .arg(
                    arg!(<DIFFICULTY> "Difficulty json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SEED> "A string hashed into the instance seed")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("solve")
                .about("Solves a challenge with dynamic programming")
                .arg(
                    arg!(<CHALLENGE> "Challenge json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("verify_solution")
                .about("Verifies a solution is feasible and optimal")
                .arg(
                    arg!(<CHALLENGE> "Challenge json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
}

fn main() {
    env_logger::init();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("generate", sub_m)) => generate(
            sub_m.get_one::<String>("DIFFICULTY").unwrap(),
            sub_m.get_one::<String>("SEED").unwrap(),
        ),
        Some(("solve", sub_m)) => solve(sub_m.get_one::<String>("CHALLENGE").unwrap()),
        Some(("verify_solution", sub_m)) => verify_solution(
            sub_m.get_one::<String>("CHALLENGE").unwrap(),
            sub_m.get_one::<String>("SOLUTION").unwrap(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_challenge(challenge: &str) -> Result<Challenge> {
    dejsonify::<Challenge>(&read_json_arg(challenge)?)
        .map_err(|e| anyhow!("Failed to parse challenge: {}", e))
}

pub fn generate(difficulty: &str, seed: &str) -> Result<()> {
    let difficulty = dejsonify::<Difficulty>(&read_json_arg(difficulty)?)
        .map_err(|e| anyhow!("Failed to parse difficulty: {}", e))?;
    let challenge = Challenge::generate_instance(&u8s_from_str(seed), &difficulty)?;
    println!("{}", jsonify(&challenge)?);
    Ok(())
}

pub fn solve(challenge: &str) -> Result<()> {
    let challenge = load_challenge(challenge)?;
    debug!(
        "solving challenge: num_items={}, capacity={}",
        challenge.num_items(),
        challenge.capacity
    );
    match algorithm::solve_challenge(&challenge)? {
        Some(solution) => {
            println!("{}", jsonify(&solution)?);
            Ok(())
        }
        None => Err(anyhow!("No solution found")),
    }
}

pub fn verify_solution(challenge: &str, solution: &str) -> Result<()> {
    let challenge = load_challenge(challenge)?;
    let solution = dejsonify::<Solution>(&read_json_arg(solution)?)
        .map_err(|e| anyhow!("Failed to parse solution: {}", e))?;

    let optimal_value = algorithm::optimal_value(&challenge.items, challenge.capacity)?;
    info!("optimal value is {}", optimal_value);
    challenge
        .verify_solution(&solution, optimal_value)
        .map_err(|e| anyhow!("Invalid solution: {}", e))?;
    println!("Solution is valid");
    Ok(())
}
