use crate::error::{ErrorKind, ValveError};
use crate::graph::graph::Graph;
use crate::graph::loader::GraphLoader;
use crate::scenario::random::RandomNetwork;
use crate::scenario::sample::SampleNetwork;
use crate::scenario::scenario::Scenario;
use crate::search::config::{ExplorationOrder, SearchConfig};
use crate::search::engine::solve;
use crate::search::monitor::{LogMonitor, NoOpMonitor};
use crate::search::result::SearchOutcome;
use crate::simulation::engine::ReplayEngine;
use crate::tui::app::App;
use crate::tui::draw::draw_app;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

mod error;
mod graph;
mod scenario;
mod search;
mod simulation;
mod state;
mod tui;

#[derive(Parser)]
#[command(name = "valvegraph")]
#[command(about = "Plans which valves to open, and when, to release the most pressure")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the best total for a valve network
    Solve {
        /// Valve network, one valve per line
        file: PathBuf,

        #[command(flatten)]
        search: SearchArgs,

        /// Log search progress and the winning schedule to stderr
        #[arg(long, short)]
        verbose: bool,
    },
    /// Solve, then step through the best schedule in the terminal
    Replay {
        file: PathBuf,

        #[command(flatten)]
        search: SearchArgs,
    },
    /// Print a random connected valve network
    Generate {
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Number of valves
        #[arg(long, default_value = "60")]
        valves: usize,

        /// Number of valves with a positive rate
        #[arg(long, default_value = "15")]
        flowing: usize,
    },
    /// Print the built-in ten valve sample network
    Sample,
}

#[derive(clap::Args)]
struct SearchArgs {
    /// Valve to start from
    #[arg(long, default_value = SearchConfig::DEFAULT_ORIGIN)]
    origin: String,

    /// Minutes available
    #[arg(long, default_value_t = SearchConfig::DEFAULT_BUDGET)]
    budget: u32,

    /// Order in which open candidates are tried
    #[arg(long, value_enum, default_value = "index")]
    order: OrderType,

    /// Also explore moves that finish after the deadline
    #[arg(long)]
    no_prune: bool,

    /// Disable the optimistic bound
    #[arg(long)]
    no_bound: bool,
}

#[derive(Clone, Debug, ValueEnum)]
enum OrderType {
    #[value(name = "index")]
    Index,
    #[value(name = "rate")]
    Rate,
    #[value(name = "reverse")]
    Reverse,
}

impl From<OrderType> for ExplorationOrder {
    fn from(order: OrderType) -> Self {
        match order {
            OrderType::Index => ExplorationOrder::Index,
            OrderType::Rate => ExplorationOrder::Rate,
            OrderType::Reverse => ExplorationOrder::Reverse,
        }
    }
}

impl From<SearchArgs> for SearchConfig {
    fn from(args: SearchArgs) -> Self {
        SearchConfig {
            prune_late: !args.no_prune,
            bound: !args.no_bound,
            order: args.order.into(),
            ..SearchConfig::new(args.origin, args.budget)
        }
    }
}

fn load(path: &Path) -> anyhow::Result<Graph> {
    GraphLoader::new()
        .from_path(path)
        .with_context(|| format!("loading {}", path.display()))
}

fn run_solve(file: &Path, config: SearchConfig, verbose: bool) -> anyhow::Result<()> {
    let graph = load(file)?;
    let SearchOutcome { best, stats } = if verbose {
        solve(&graph, config, &mut LogMonitor::default())
    } else {
        solve(&graph, config, &mut NoOpMonitor)
    }
    .with_context(|| format!("searching {}", file.display()))?;

    if verbose {
        eprintln!("{}", best.display(&graph));
        eprintln!("{}", stats);
    }
    println!("{}", best.total());
    Ok(())
}

fn run_replay(file: &Path, config: SearchConfig) -> anyhow::Result<()> {
    let graph = load(file)?;
    let origin = graph.require(&config.origin)?;
    let budget = config.budget;
    let outcome = solve(&graph, config, &mut NoOpMonitor)
        .with_context(|| format!("searching {}", file.display()))?;

    let mut terminal = ratatui::init();
    let mut app = App::new(ReplayEngine::new(graph, origin, budget, outcome.best));

    while app.running {
        terminal.draw(|frame| draw_app(frame, &app))?;

        if crossterm::event::poll(Duration::from_millis(16))? {
            match crossterm::event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => app.running = false,
                    KeyCode::Char(' ') => {
                        app.engine.step();
                    }
                    KeyCode::Char('e') => app.engine.run_to_end(),
                    KeyCode::Char('r') => app.engine.reset(),
                    KeyCode::Char('s') => app.toggle_sort(),
                    _ => {}
                },
                _ => continue,
            }
        }
    }
    Ok(())
}

fn print_scenario(scenario: &dyn Scenario) {
    print!("{}", scenario.build());
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Solve {
            file,
            search,
            verbose,
        } => run_solve(&file, search.into(), verbose),
        Commands::Replay { file, search } => run_replay(&file, search.into()),
        Commands::Generate {
            seed,
            valves,
            flowing,
        } => {
            print_scenario(&RandomNetwork::new(seed, valves, flowing));
            Ok(())
        }
        Commands::Sample => {
            print_scenario(&SampleNetwork);
            Ok(())
        }
    }
}

fn error_kind(err: &anyhow::Error) -> Option<ErrorKind> {
    err.downcast_ref::<ValveError>().map(ValveError::kind)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match error_kind(&err) {
            Some(kind) => {
                eprintln!("{}: {:#}", kind, err);
                ExitCode::from(kind.exit_code())
            }
            None => {
                eprintln!("error: {:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}
