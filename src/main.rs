use anyhow::Context;
use clap::Parser;
use codebreaker::Error;
use codebreaker::codes::feedback::Feedback;
use codebreaker::codes::rules::Rules;
use codebreaker::engine::engine::Engine;
use codebreaker::filters::filter::Filter;
use codebreaker::play::breaker::CodeBreaker;
use codebreaker::solve::builder::build_strategy_tree;
use codebreaker::solve::cost::Constraints;
use codebreaker::solve::cost::Objective;
use codebreaker::solve::optimal::build_optimal_strategy_tree;
use codebreaker::solve::report;
use codebreaker::solve::report::TreeInfo;
use codebreaker::solve::strategy::Strategy;
use codebreaker::solve::tree::StrategyTree;
use colored::Colorize;

#[derive(Parser)]
#[command(name = "codebreaker", version, about = "Mastermind strategy solver")]
struct Args {
    /// number of pegs
    #[arg(short = 'p', long, default_value_t = 4)]
    pegs: usize,

    /// number of colors
    #[arg(short = 'c', long, default_value_t = 6)]
    colors: usize,

    /// allow repeated colors
    #[arg(short = 'r', long, conflicts_with = "norepeat")]
    repeat: bool,

    /// forbid repeated colors
    #[arg(short = 'n', long)]
    norepeat: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    #[command(about = "Play a game: the solver guesses, the secret answers")]
    Play {
        /// play against this secret instead of prompting for
        /// feedback every round
        #[arg(long)]
        secret: Option<String>,

        /// play against a randomly drawn secret
        #[arg(long, conflicts_with = "secret")]
        random: bool,

        /// guessing strategy
        #[arg(short = 's', long, default_value = "minavg")]
        strategy: String,
    },
    #[command(about = "Build a heuristic strategy tree", alias = "strat")]
    Strategy {
        /// strategy: simple, minmax, minavg, entropy or parts
        #[arg(short = 's', long, default_value = "minavg")]
        strategy: String,

        /// equivalence filter: dummy, color, constraint or standard
        #[arg(long, default_value = "standard")]
        filter: String,

        /// guess only from the remaining possibilities
        #[arg(long)]
        pos_only: bool,

        /// output format: text or xml
        #[arg(short = 'f', long, default_value = "text")]
        format: String,

        /// write the tree to a file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<std::path::PathBuf>,
    },
    #[command(about = "Search for a provably optimal strategy", alias = "opt")]
    Optimal {
        /// objective: steps, depth or worst
        #[arg(long, default_value = "steps")]
        objective: String,

        /// maximum guesses allowed per secret
        #[arg(long, default_value_t = 100)]
        max_depth: u32,

        /// output format: text or xml
        #[arg(short = 'f', long, default_value = "text")]
        format: String,

        /// write the tree to a file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<std::path::PathBuf>,
    },
}

fn main() {
    codebreaker::init();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };
    let rules = match Rules::new(args.pegs, args.colors, args.repeat || !args.norepeat) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    if let Err(e) = run(rules, args.command) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(rules: Rules, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Play {
            secret,
            random,
            strategy,
        } => play(rules, secret, random, &strategy),
        Command::Strategy {
            strategy,
            filter,
            pos_only,
            format,
            output,
        } => strategy_tree(rules, &strategy, &filter, pos_only, &format, output),
        Command::Optimal {
            objective,
            max_depth,
            format,
            output,
        } => optimal_tree(rules, &objective, max_depth, &format, output),
    }
}

fn play(rules: Rules, secret: Option<String>, random: bool, strategy: &str) -> anyhow::Result<()> {
    let engine = Engine::new(rules);
    let strategy = Strategy::try_from(strategy)?;
    let secret = match secret {
        Some(s) => Some(rules.codeword(&s).context("parsing --secret")?),
        None if random => Some(rules.random()),
        None => None,
    };
    let mut player = CodeBreaker::new(
        &engine,
        strategy,
        Filter::standard(&rules),
        Constraints::default(),
    );

    println!(
        "{} {} ({} possibilities)",
        "playing".bold(),
        rules,
        engine.universe().len()
    );
    for round in 1.. {
        let Some(guess) = player.guess() else {
            println!(
                "{}",
                "no possibilities remain; a response must have been wrong".red()
            );
            break;
        };
        let feedback = match &secret {
            Some(secret) => {
                let feedback = engine.compare(&guess, secret);
                println!(
                    "{:>2}. {}  {}",
                    round,
                    rules.format(&guess).bold().cyan(),
                    feedback
                );
                feedback
            }
            None => {
                let raw: String = dialoguer::Input::new()
                    .with_prompt(format!(
                        "{:>2}. {}  response",
                        round,
                        rules.format(&guess).bold().cyan()
                    ))
                    .validate_with(|s: &String| match Feedback::try_from(s.as_str()) {
                        Ok(fb) if (fb.exact() + fb.misplaced()) as usize <= rules.pegs() => Ok(()),
                        Ok(_) => Err("response exceeds the peg count".to_string()),
                        Err(e) => Err(e.to_string()),
                    })
                    .interact_text()?;
                Feedback::try_from(raw.as_str()).expect("validated")
            }
        };
        if feedback == engine.perfect() {
            println!(
                "{} {} in {} guesses",
                "revealed".green().bold(),
                rules.format(&guess).bold(),
                round
            );
            break;
        }
        player.push(&guess, feedback);
        log::info!("{} possibilities remain", player.possibilities().len());
    }
    Ok(())
}

fn strategy_tree(
    rules: Rules,
    strategy: &str,
    filter: &str,
    pos_only: bool,
    format: &str,
    output: Option<std::path::PathBuf>,
) -> anyhow::Result<()> {
    let engine = Engine::new(rules);
    let strategy = Strategy::try_from(strategy)?;
    let filter = Filter::named(filter, &rules)
        .ok_or_else(|| anyhow::anyhow!("unknown filter {}", filter))?;
    let constraints = Constraints {
        pos_only,
        ..Constraints::default()
    };
    let tree = build_strategy_tree(&engine, &strategy, &filter, &constraints);
    emit(&tree, &strategy.to_string(), format, output)
}

fn optimal_tree(
    rules: Rules,
    objective: &str,
    max_depth: u32,
    format: &str,
    output: Option<std::path::PathBuf>,
) -> anyhow::Result<()> {
    let engine = Engine::new(rules);
    let objective = Objective::try_from(objective)?;
    let constraints = Constraints {
        max_depth,
        ..Constraints::default()
    };
    let (tree, cost) = match build_optimal_strategy_tree(&engine, objective, constraints) {
        Ok(found) => found,
        Err(Error::SearchInfeasible) => {
            anyhow::bail!("no strategy reveals every secret within {} guesses", max_depth)
        }
        Err(e) => return Err(e.into()),
    };
    println!("{} {}", "optimal cost".bold(), cost);
    emit(&tree, "optimal", format, output)
}

fn emit(
    tree: &StrategyTree,
    name: &str,
    format: &str,
    output: Option<std::path::PathBuf>,
) -> anyhow::Result<()> {
    let rendered = match format {
        "text" => report::write_text(tree),
        "xml" => report::write_xml(tree),
        _ => anyhow::bail!("unknown format {}", format),
    };
    println!("{}", TreeInfo::header());
    println!("{}", TreeInfo::new(name, tree));
    match output {
        Some(path) => {
            std::fs::write(&path, rendered).with_context(|| format!("writing {}", path.display()))?
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
