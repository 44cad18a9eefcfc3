/*

    Frame a model for the viewer: compute its bounding box,
    propagate it through the model's world transform, and
    print the matrix that centers and scales it for display.

    @date: Nov, 2025
    @author: Bartu

*/

use std::{self, env, time::Instant};
use tracing::{info, warn, error, debug};
use tracing_subscriber;

use model_bounds::json_parser::load_framing_input;

fn main() -> Result<(), Box<dyn std::error::Error>> {

    // Logging on console
    tracing_subscriber::fmt::init();

    // Parse args
    let args: Vec<String> = env::args().collect();
    let json_path: &String = if args.len() == 1 {
        warn!("No arguments were provided, setting default input path...");
        &String::from("./inputs/framing.json")
    } else if args.len() == 2 {
        &args[1]
    } else {
        error!("Usage: {} <filename>.json", args[0]);
        std::process::exit(1);
    };

    info!("Loading framing input from {}...", json_path);
    let input = load_framing_input(json_path).map_err(|e| {
        error!("Failed to load framing input: {}", e);
        e
    })?;
    debug!("Framing settings {:?}", input.settings);

    let start = Instant::now();
    let report = input.frame();
    info!("Framing took: {:?}", start.elapsed());

    println!("bounding box:       {}", report.bbox);
    if let (Some(world), Some(tight)) = (report.world_bbox, report.world_bbox_tight) {
        println!("world box (2 corn): {}", world);
        println!("world box (8 corn): {}", tight);
        if world != tight {
            warn!("Two-corner world box differs from the eight-corner one, the transform is not axis aligned");
        }
    }
    println!("centering matrix (columns):");
    for col in report.centering.to_cols_array_2d() {
        println!("  {:?}", col);
    }

    info!("Finished execution.");
    Ok(())
}
