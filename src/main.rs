use clap::Parser;
use colored::Colorize;
use stacked::cards::Deal;
use stacked::cards::Deck;
use stacked::config::Config;
use stacked::genetic::Genetic;
use stacked::problem::Problem;
use stacked::problem::Verdict;
use stacked::solver::Backtrack;
#[cfg(feature = "z3")]
use stacked::solver::Smt;
use std::time::Duration;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about = "Search for a deck that wins at every cut", long_about = None)]
enum Command {
    #[command(about = "Search for a deck under which player 0 wins every cut")]
    Solve {
        #[arg(long, default_value_t = stacked::DEFAULT_PLAYERS)]
        num_players: usize,
        /// seconds before the search gives up
        #[arg(long, default_value_t = stacked::DEFAULT_TIMEOUT)]
        timeout: u64,
        #[arg(long, default_value_t = stacked::DEFAULT_CUTS)]
        num_cuts: usize,
        /// parallel search workers, defaults to the core count capped at 8
        #[arg(long)]
        workers: Option<usize>,
        /// print the result as JSON
        #[arg(long)]
        json: bool,
        #[arg(long, value_enum, default_value_t = Backend::default())]
        engine: Backend,
    },
    #[command(about = "Evolve decks toward winning every cut, without a proof")]
    Search {
        #[arg(long, default_value_t = stacked::DEFAULT_PLAYERS)]
        num_players: usize,
        #[arg(long, default_value_t = stacked::DEFAULT_CUTS)]
        num_cuts: usize,
        /// seconds before the search returns its best deck
        #[arg(long, default_value_t = stacked::DEFAULT_TIMEOUT)]
        timeout: u64,
        #[arg(long, default_value_t = usize::MAX)]
        generations: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    #[command(about = "Report the cuts at which player 0 wins with a given deck")]
    Check {
        /// 52 ids or card strings, comma separated
        #[arg(long, required = true)]
        deck: String,
        #[arg(long, default_value_t = stacked::DEFAULT_PLAYERS)]
        num_players: usize,
        #[arg(long, default_value_t = stacked::DEFAULT_CUTS)]
        num_cuts: usize,
        /// print every deal, not just the summary
        #[arg(long)]
        verbose: bool,
    },
}

/// which Engine decides the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Backend {
    #[cfg(feature = "z3")]
    Z3,
    Backtrack,
}

impl Default for Backend {
    #[cfg(feature = "z3")]
    fn default() -> Self {
        Backend::Z3
    }
    #[cfg(not(feature = "z3"))]
    fn default() -> Self {
        Backend::Backtrack
    }
}

#[derive(serde::Serialize)]
struct Report {
    verdict: &'static str,
    num_players: usize,
    num_cuts: usize,
    seconds: f64,
    ids: Option<Vec<u8>>,
    cards: Option<Vec<String>>,
}

fn main() -> anyhow::Result<()> {
    let command = Command::parse();
    // the terminal logger shares stdout with the JSON report
    if !matches!(command, Command::Solve { json: true, .. }) {
        stacked::log();
    }
    match command {
        Command::Solve {
            num_players,
            timeout,
            num_cuts,
            workers,
            json,
            engine,
        } => solve(
            Config {
                num_players,
                num_cuts,
                timeout: Duration::from_secs(timeout),
                workers: workers.unwrap_or_else(|| num_cpus::get().min(stacked::DEFAULT_WORKERS)),
            },
            json,
            engine,
        ),
        Command::Search {
            num_players,
            num_cuts,
            timeout,
            generations,
            seed,
        } => search(
            Config {
                num_players,
                num_cuts,
                timeout: Duration::from_secs(timeout),
                ..Config::default()
            },
            generations,
            seed,
        ),
        Command::Check {
            deck,
            num_players,
            num_cuts,
            verbose,
        } => check(&deck, num_players, num_cuts, verbose),
    }
}

fn solve(config: Config, json: bool, engine: Backend) -> anyhow::Result<()> {
    let begin = Instant::now();
    let problem = Problem::build(config)?;
    log::info!("model built in {:.2?}", begin.elapsed());
    let params = problem.parameters();
    let verdict = match engine {
        #[cfg(feature = "z3")]
        Backend::Z3 => problem.solve(&Smt, &params)?,
        Backend::Backtrack => problem.solve(&Backtrack, &params)?,
    };
    let seconds = begin.elapsed().as_secs_f64();
    if json {
        let report = Report {
            verdict: match verdict {
                Verdict::Solved(_) => "solved",
                Verdict::Infeasible => "infeasible",
                Verdict::Unknown => "unknown",
            },
            num_players: config.num_players,
            num_cuts: config.num_cuts,
            seconds,
            ids: match &verdict {
                Verdict::Solved(deck) => Some(deck.ids()),
                _ => None,
            },
            cards: match &verdict {
                Verdict::Solved(deck) => Some(deck.cards().iter().map(|c| c.to_string()).collect()),
                _ => None,
            },
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    match verdict {
        Verdict::Solved(deck) => {
            println!("{} in {:.2}s", "SOLVED".green(), seconds);
            for (position, card) in deck.cards().iter().enumerate() {
                println!("{:>2}  {:>2}  {}", position, u8::from(*card), card);
            }
            println!("{}", deck);
        }
        Verdict::Infeasible => {
            println!(
                "{} no deck lets player 0 win all {} cuts against {} opponents",
                "INFEASIBLE".red(),
                config.num_cuts,
                config.num_players - 1
            );
        }
        Verdict::Unknown => {
            println!(
                "{} no answer within {:?}, try a longer --timeout",
                "UNKNOWN".yellow(),
                config.timeout
            );
        }
    }
    Ok(())
}

fn search(config: Config, generations: usize, seed: u64) -> anyhow::Result<()> {
    let begin = Instant::now();
    let evolved = Genetic::new(config, seed)?.run(generations);
    let summary = format!("{}/{}", evolved.wins, config.num_cuts);
    match evolved.is_perfect(&config) {
        true => println!(
            "{} wins {} cuts after {} generations in {:.2}s",
            "FOUND".green(),
            summary.green(),
            evolved.generations,
            begin.elapsed().as_secs_f64()
        ),
        false => println!(
            "{} best deck wins {} cuts after {} generations",
            "PARTIAL".yellow(),
            summary.yellow(),
            evolved.generations
        ),
    }
    println!("{}", evolved.deck);
    Ok(())
}

fn check(deck: &str, num_players: usize, num_cuts: usize, verbose: bool) -> anyhow::Result<()> {
    let config = Config {
        num_players,
        num_cuts,
        ..Config::default()
    };
    config.validate()?;
    let deck = Deck::try_from(deck)?;
    let wins = deck.wins(num_players, num_cuts);
    if verbose {
        for cut in 0..num_cuts {
            println!("cut {}\n{}\n", cut, Deal::new(&deck, cut, num_players));
        }
    }
    let summary = format!("{}/{}", wins.len(), num_cuts);
    if wins.len() == num_cuts {
        println!("player 0 wins {} cuts", summary.green());
    } else {
        println!("player 0 wins {} cuts: {:?}", summary.yellow(), wins);
    }
    Ok(())
}
