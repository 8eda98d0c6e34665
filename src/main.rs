//=========================================================================
// pixel-journey
//
// Opens the player window on the bundled story.
//
// Logging goes through env_logger; `RUST_LOG` overrides the default
// `info` filter (e.g. `RUST_LOG=playback=debug`).
//
//=========================================================================

use log::error;
use pixel_journey::{content, EngineBuilder};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scenes = match content::journey() {
        Ok(scenes) => scenes,
        Err(e) => {
            error!("Cannot load story: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = EngineBuilder::new().build(scenes).run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
