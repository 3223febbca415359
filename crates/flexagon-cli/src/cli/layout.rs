//! Layout command: print the wedge placement table.

use serde::Serialize;

use flexagon::layout::rows;

#[derive(Serialize)]
struct JsonSlot {
    row: usize,
    slot: usize,
    face: u8,
    wedge: u8,
    rotation: f64,
}

/// Execute the layout command.
pub fn cmd_layout(args: &[String]) {
    let mut json = false;

    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
    }

    let slots: Vec<JsonSlot> = rows()
        .iter()
        .enumerate()
        .flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(s, p)| JsonSlot {
                row: r + 1,
                slot: s + 1,
                face: p.id.face,
                wedge: p.id.wedge,
                rotation: p.rotation,
            })
        })
        .collect();

    if json {
        match serde_json::to_string_pretty(&slots) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: failed to serialize layout: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("{:<4} {:<5} {:<14} {:>8}", "row", "slot", "wedge", "rotation");
    for s in &slots {
        println!(
            "{:<4} {:<5} face {} wedge {} {:>7}°",
            s.row, s.slot, s.face, s.wedge, s.rotation
        );
    }
}

fn print_usage() {
    eprintln!("Usage: flexagon layout [--json]");
    eprintln!();
    eprintln!("Prints which wedge fills each slot of the strip and how far it is turned.");
}
