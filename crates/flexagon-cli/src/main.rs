//! flexagon - build a printable hexaflexagon template from three images
//!
//! Usage:
//!   flexagon <img1> <img2> <img3> [output] [size]   Generate a template
//!   flexagon layout [--json]                        Show the placement table

use std::env;

mod cli;

use cli::{cmd_generate, cmd_layout};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("flexagon");

    if args.len() < 2 {
        print_usage(prog);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "layout" => cmd_layout(&args[2..]),
        "generate" => cmd_generate(&args[2..]),
        "-h" | "--help" | "help" => print_usage(prog),
        _ => cmd_generate(&args[1..]),
    }
}

fn print_usage(prog: &str) {
    eprintln!("flexagon - printable hexaflexagon templates from three images");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} <image1> <image2> <image3> [output] [size] [options]", prog);
    eprintln!("  {} layout [--json]", prog);
    eprintln!();
    cli::generate::print_options();
}
