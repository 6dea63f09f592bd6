//! Demo window: walk and turn with the mouse, touch or arrow keys.
//!
//! Usage: `locomote [options.toml]`. Set `RUST_LOG=info` to see the
//! position log.

use std::path::Path;

use locomote::{LocomoteError, Options, Viewer};

fn load_options(arg: Option<&str>) -> Result<Options, LocomoteError> {
    let Some(path) = arg else {
        return Ok(Options::default());
    };
    let options = Options::load(Path::new(path))?;
    log::info!("loaded options from {path}");
    Ok(options)
}

fn main() {
    env_logger::init();

    let options = match load_options(std::env::args().nth(1).as_deref()) {
        Ok(options) => options,
        Err(e) => {
            log::error!("Usage: locomote [options.toml] ({e})");
            std::process::exit(1);
        }
    };

    let viewer = Viewer::builder()
        .with_options(options)
        .with_title("locomote")
        .build();
    if let Err(e) = viewer.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
