use assert_cmd::prelude::*;
use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    Command::main_binary().unwrap().args(args).output().unwrap()
}

#[test]
fn run_corridor_default_strategy() {
    let output = run(&["levels/01-corridor.txt"]);
    assert!(output.status.success());

    // runtime is nondeterministic, check the stable lines only
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Solving with bfs (uninformed; complete, shortest in edges)..."));
    assert!(stdout.contains("Depth: 1"));
    assert!(stdout.contains("Steps: 1"));
    assert!(stdout.contains("Moves: R"));
    assert!(output.stderr.is_empty());
}

#[test]
fn run_climb_a_star_with_path() {
    let output = run(&["-s", "astar", "-p", "levels/02-climb.txt"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Steps: 4"));
    // the final rendered state has the box on the goal
    assert!(stdout.contains("#*"));
}

#[test]
fn run_all_prints_the_comparison_table() {
    let output = run(&["--all", "levels/01-corridor.txt"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    for name in &[
        "bfs",
        "dfs",
        "greedy",
        "astar",
        "beam",
        "annealing",
        "andor",
        "explore",
        "backtracking",
        "forward-checking",
    ] {
        assert!(stdout.contains(name), "{} missing from table", name);
    }
    assert!(stdout.contains("uninformed"));
    assert!(stdout.contains("runtime [ms]"));
}

#[test]
fn run_unknown_strategy() {
    let output = run(&["-s", "simplex", "levels/01-corridor.txt"]);
    assert!(!output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("unknown strategy: simplex"));
}

#[test]
fn run_already_solved_level() {
    let output = run(&["-s", "greedy", "levels/05-empty.txt"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Steps: 0"));
    assert!(stdout.contains("Already solved"));
}

#[test]
fn run_unsolvable_level() {
    let output = run(&["-s", "greedy", "levels/07-stuck.txt"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Steps: 0"));
    assert!(stdout.contains("No solution found"));
}

#[test]
fn run_missing_file_argument() {
    let output = run(&[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
