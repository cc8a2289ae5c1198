//! Replay an input event script against a synthetic buffer and print the
//! resulting camera state.
//!
//! Usage: `bufview <buffer-width> <buffer-height> [events.json]`
//!
//! The script is a JSON array of events, e.g.
//! `[{"type":"mouse_wheel","delta":1.0,"position":{"x":400.0,"y":300.0}}]`.
//! One frame tick runs after every event.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bufview::constants::DEFAULT_VIEWPORT_SIZE;
use bufview::config::ViewerConfig;
use bufview::keybindings::key_to_string;
use bufview::{BufferDescriptor, Event, Viewer};

struct Args {
    width: f32,
    height: f32,
    script: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let usage = "usage: bufview <buffer-width> <buffer-height> [events.json]";

    let width = args.next().ok_or(usage)?;
    let height = args.next().ok_or(usage)?;
    let width: f32 = width
        .parse()
        .map_err(|e| format!("invalid buffer width '{}': {}", width, e))?;
    let height: f32 = height
        .parse()
        .map_err(|e| format!("invalid buffer height '{}': {}", height, e))?;

    Ok(Args {
        width,
        height,
        script: args.next().map(PathBuf::from),
    })
}

fn load_script(path: &Path) -> Result<Vec<Event>, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {:?}: {}", path, e))?;
    serde_json::from_str(&json).map_err(|e| format!("failed to parse {:?}: {}", path, e))
}

fn run(args: Args, config: &ViewerConfig) -> Result<(), String> {
    let events = match &args.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };

    let (view_w, view_h) = DEFAULT_VIEWPORT_SIZE;
    let mut viewer = Viewer::new(
        BufferDescriptor::new(args.width, args.height),
        config.camera_settings(),
        view_w,
        view_h,
    )
    .map_err(|e| e.to_string())?;

    println!("initial: {}", viewer.status_text());
    for (index, event) in events.iter().enumerate() {
        let response = viewer.handle_event(event).map_err(|e| e.to_string())?;
        viewer.tick().map_err(|e| e.to_string())?;
        log::debug!("event {} {:?} -> {:?}", index, event, response);
        if viewer.take_render_request() {
            println!("[{}] {}", index, viewer.status_text());
        }
    }

    let camera = viewer.camera();
    println!(
        "final: zoom power {}, pan ({:.3}, {:.3}), {}",
        camera.zoom_power(),
        camera.pan().0,
        camera.pan().1,
        viewer.status_text()
    );
    let uniform = camera.view_uniform();
    println!("view transform ({} bytes):", uniform.as_bytes().len());
    for column in uniform.matrix {
        println!("  [{:9.5} {:9.5} {:9.5} {:9.5}]", column[0], column[1], column[2], column[3]);
    }
    Ok(())
}

fn main() -> ExitCode {
    let config = ViewerConfig::load_from_default_path().unwrap_or_default();

    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.into())
        .parse_default_env()
        .init();

    log::debug!("Frame interval {:?}", config.frame_interval());
    let bindings = &config.keybindings;
    log::debug!(
        "Bindings: {:?} + arrows pan, {} zoom in, {} zoom out, {} recenter",
        bindings.modifier,
        key_to_string(bindings.zoom_in),
        key_to_string(bindings.zoom_out),
        key_to_string(bindings.recenter)
    );

    let result = parse_args().and_then(|args| run(args, &config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("bufview: {}", e);
            ExitCode::FAILURE
        }
    }
}
