use std::env;
use std::process;

use clap::{App, Arg};
use prettytable::{Cell, Row, Table};
use separator::Separatable;

use sokoban_search::data::Dir;
use sokoban_search::fs;
use sokoban_search::level::Level;
use sokoban_search::solver::Strategy;
use sokoban_search::stats::Solution;

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-search")
        .version("0.1")
        .arg(Arg::with_name("strategy")
            .short("-s")
            .long("--strategy")
            .takes_value(true)
            .help("search strategy to run (default bfs)"))
        .arg(Arg::with_name("all")
            .short("-a")
            .long("--all")
            .help("run every strategy and print a comparison table"))
        .arg(Arg::with_name("print-path")
            .short("-p")
            .long("--print-path")
            .help("print every state along the returned path"))
        .arg(Arg::with_name("file")
            .required(true))
        .get_matches();

    let path = matches.value_of("file").unwrap();
    let text = fs::read_file(path).unwrap_or_else(|err| {
        let current_dir = env::current_dir().unwrap();
        println!("Can't read file {} in {}: {}", path, current_dir.display(), err);
        process::exit(1);
    });
    let level = Level::parse(&text);

    if matches.is_present("all") {
        run_all(&level);
        return;
    }

    let strategy: Strategy = matches
        .value_of("strategy")
        .unwrap_or("bfs")
        .parse()
        .unwrap_or_else(|err| {
            println!("{}", err);
            process::exit(1);
        });

    println!("{}", level);
    println!(
        "Solving with {} ({}; {})...",
        strategy,
        strategy.group(),
        strategy.attributes()
    );
    let solution = strategy.solve(&level);
    print!("{}", solution.stats);

    if solution.path.len() > 1 {
        println!("Moves: {}", move_string(&solution));
    } else if level.is_goal(&solution.end_state) {
        println!("Already solved");
    } else {
        println!("No solution found");
    }

    if matches.is_present("print-path") {
        for state in &solution.path {
            println!("{}", level.format_with_state(state));
        }
    }
}

fn run_all(level: &Level) {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("strategy"),
        Cell::new("group"),
        Cell::new("steps"),
        Cell::new("generated"),
        Cell::new("expanded"),
        Cell::new("runtime [ms]"),
    ]));
    for strategy in Strategy::ALL.iter() {
        let solution = strategy.solve(level);
        let steps = if solution.path.len() > 1 {
            solution.stats.steps_count.separated_string()
        } else {
            "-".to_string()
        };
        table.add_row(Row::new(vec![
            Cell::new(strategy.name()),
            Cell::new(strategy.group()),
            Cell::new(&steps),
            Cell::new(&solution.stats.generated.separated_string()),
            Cell::new(&solution.stats.expanded.separated_string()),
            Cell::new(&format!("{:.3}", solution.stats.runtime_ms)),
        ]));
    }
    table.printstd();
}

/// The path as a U/D/L/R move string. Transitions where the player does not
/// move exactly one cell (the CSP fallback paths) contribute nothing.
fn move_string(solution: &Solution) -> String {
    solution
        .path
        .windows(2)
        .filter_map(|pair| Dir::between(pair[0].player, pair[1].player))
        .map(|dir| dir.to_string())
        .collect()
}
