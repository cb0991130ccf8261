//! Physics bridge demo: a ball bouncing on a tilted slab.
//!
//! Run with: cargo run -p viz
//!
//! Examples:
//!   cargo run -p viz -- --units-per-meter 4 --reset-interval 300
//!   cargo run -p viz -- --config bridge.toml

use bevy::prelude::*;
use clap::Parser;
use viz::cli::Args;
use viz::{BridgeVizPlugin, Settings};

fn main() {
    let args = Args::parse();

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    App::new()
        .insert_resource(Settings {
            config,
            window_title: args.title.clone(),
        })
        .add_plugins(BridgeVizPlugin)
        .run();
}
