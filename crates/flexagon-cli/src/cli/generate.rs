//! Generate command implementation.

use std::time::Instant;

use log::debug;
use serde::Serialize;

use flexagon::{generate, Template, TemplateConfig, DEFAULT_FACE_WIDTH};

/// Output file used when none is given.
pub const DEFAULT_OUTPUT: &str = "output.png";

/// One pasted wedge in JSON output format.
#[derive(Serialize)]
struct JsonPlacement {
    face: u8,
    wedge: u8,
    rotation: f64,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

/// JSON report of a generated template.
#[derive(Serialize)]
struct JsonReport {
    output: String,
    face_width: u32,
    canvas_width: u32,
    canvas_height: u32,
    elapsed_ms: f64,
    placements: Vec<JsonPlacement>,
}

/// Execute the generate command.
pub fn cmd_generate(args: &[String]) {
    let mut positional: Vec<&str> = Vec::new();
    let mut output_flag: Option<&str> = None;
    let mut width_flag: Option<&str> = None;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_flag = Some(args[i].as_str());
                }
            }
            "-w" | "--width" | "-s" | "--size" => {
                i += 1;
                if i < args.len() {
                    width_flag = Some(args[i].as_str());
                }
            }
            "--json" => {
                json = true;
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
            path => positional.push(path),
        }
        i += 1;
    }

    if positional.len() < 3 {
        eprintln!("Error: three images are required, got {}", positional.len());
        print_usage();
        std::process::exit(1);
    }
    if positional.len() > 5 {
        eprintln!("Error: too many arguments");
        print_usage();
        std::process::exit(1);
    }

    let images = &positional[..3];
    let output = output_flag
        .or_else(|| positional.get(3).copied())
        .unwrap_or(DEFAULT_OUTPUT);
    let face_width = match width_flag.or_else(|| positional.get(4).copied()) {
        Some(raw) => parse_face_width(raw).unwrap_or_else(|msg| {
            eprintln!("Error: {}", msg);
            std::process::exit(1);
        }),
        None => DEFAULT_FACE_WIDTH,
    };

    let config = TemplateConfig::default().with_face_width(face_width);
    debug!("faces {:?} -> {} at {}px", images, output, face_width);
    let start = Instant::now();

    let template = generate(images, &config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    if let Err(e) = template.save(output) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    if json {
        match serde_json::to_string_pretty(&report(&template, output, elapsed_ms)) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        let (w, h) = template.canvas().dimensions();
        println!("Wrote {} ({}x{}) in {:.1}ms", output, w, h, elapsed_ms);
    }
}

/// Parse a face width: a positive whole number of pixels.
fn parse_face_width(raw: &str) -> Result<u32, String> {
    match raw.parse::<u32>() {
        Ok(0) => Err("size must be greater than zero".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("size must be a positive integer, got '{}'", raw)),
    }
}

fn report(template: &Template, output: &str, elapsed_ms: f64) -> JsonReport {
    let (canvas_width, canvas_height) = template.canvas().dimensions();
    JsonReport {
        output: output.to_string(),
        face_width: template.face_width(),
        canvas_width,
        canvas_height,
        elapsed_ms,
        placements: template
            .placements()
            .iter()
            .map(|p| JsonPlacement {
                face: p.id.face,
                wedge: p.id.wedge,
                rotation: p.rotation,
                x: p.x,
                y: p.y,
                width: p.width,
                height: p.height,
            })
            .collect(),
    }
}

/// Option help shared with the top-level usage text.
pub fn print_options() {
    eprintln!("Options:");
    eprintln!("  -o, --output <file>    Output image (default: {})", DEFAULT_OUTPUT);
    eprintln!("  -w, --width <px>       Face edge length in pixels (default: {})", DEFAULT_FACE_WIDTH);
    eprintln!("  --json                 Print a JSON report of the layout");
    eprintln!();
    eprintln!("Positional [output] and [size] work too, as in:");
    eprintln!("  flexagon face1.jpg face2.png face3.jpg template.png 300");
    eprintln!();
    eprintln!("Set RUST_LOG=debug to trace every wedge placement.");
}

fn print_usage() {
    eprintln!("Usage: flexagon <image1> <image2> <image3> [output] [size] [options]");
    eprintln!();
    print_options();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_width_parsing() {
        assert_eq!(parse_face_width("300"), Ok(300));
        assert!(parse_face_width("0").is_err());
        assert!(parse_face_width("-5").is_err());
        assert!(parse_face_width("12.5").is_err());
        assert!(parse_face_width("wide").is_err());
    }
}
