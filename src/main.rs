//!
//! lulzpad -- Lulz in the making
//!

             extern crate ansi_term;
#[macro_use] extern crate clap;
             extern crate conv;
#[macro_use] extern crate enum_derive;
             extern crate exitcode;
             extern crate image;
             extern crate isatty;
#[macro_use] extern crate lazy_static;
             extern crate lulzpad;
#[macro_use] extern crate macro_attr;
             extern crate serde_json;
             extern crate time;

// `slog` must precede `log` in declarations here, because we want to simultaneously:
// * use the standard `log` macros
// * be able to initialize the slog logger using slog macros like o!()
#[macro_use] extern crate slog;
             extern crate slog_envlogger;
             extern crate slog_stdlog;
             extern crate slog_stream;
#[macro_use] extern crate log;

#[cfg(test)] #[macro_use] extern crate spectral;


mod args;
mod logging;


use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::exit;

use image::GenericImage;

use lulzpad::{EditorConfig, FileShareSurface, MemeEditor, MemeSpec, ShareOutcome,
              SignalBus, Size, Slot, StreamShareSurface};
use args::ArgsError;


lazy_static! {
    /// Application / package name, as filled out by Cargo.
    static ref NAME: &'static str = option_env!("CARGO_PKG_NAME").unwrap_or("lulzpad");

    /// Application revision, as written out by the build script.
    static ref REVISION: Option<&'static str> = {
        let rev = include_str!(concat!(env!("OUT_DIR"), "/revision")).trim();
        if rev.is_empty() { None } else { Some(rev) }
    };

    /// Application version, as filled out by Cargo
    /// (and augmented with the Git revision, if known).
    static ref VERSION: String = {
        let semver = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown");
        match *REVISION {
            Some(rev) => format!("{}+{}", semver, rev),
            None => semver.to_owned(),
        }
    };
}


fn main() {
    let opts = args::parse().unwrap_or_else(|e| {
        print_args_error(e).unwrap();
        exit(exitcode::USAGE);
    });

    logging::init(opts.verbosity).unwrap();
    if cfg!(debug_assertions) {
        warn!("Debug mode! The program will likely be much slower.");
    }
    for (i, arg) in env::args().enumerate() {
        debug!("argv[{}] = {:?}", i, arg);
    }
    trace!("Options parsed from argv:\n{:#?}", opts);

    let exit_code = run(opts.spec, opts.output_path);
    exit(exit_code);
}

/// Print an error that may occur while parsing arguments.
fn print_args_error(e: ArgsError) -> io::Result<()> {
    match e {
        ArgsError::Parse(ref e) =>
            // In case of generic parse error,
            // message provided by the clap library will be the usage string.
            writeln!(&mut io::stderr(), "{}", e.message),
        e => {
            writeln!(&mut io::stderr(), "Failed to parse arguments: {}", e)
        },
    }
}


/// Drive the editor through the whole flow described by the meme spec
/// and share the result into the output. Returns the process exit code.
fn run(spec: MemeSpec, output_path: Option<PathBuf>) -> i32 {
    trace!("Opening photo {}...", spec.image.display());
    let photo = match image::open(&spec.image) {
        Ok(img) => img,
        Err(e) => {
            error!("Failed to open photo {}: {}", spec.image.display(), e);
            return exitcode::NOINPUT;
        }
    };
    let (photo_width, photo_height) = photo.dimensions();
    debug!("Photo {} opened successfully ({}x{})",
        spec.image.display(), photo_width, photo_height);

    let viewport = Size::new(
        spec.width.unwrap_or(photo_width),
        spec.height.unwrap_or(photo_height));
    let share_format = output_path.as_ref()
        .and_then(lulzpad::format_for_path)
        .unwrap_or(lulzpad::DEFAULT_SHARE_FORMAT);

    let mut editor = MemeEditor::new(EditorConfig{
        viewport: viewport,
        share_format: share_format,
        ..EditorConfig::default()
    });
    let mut bus = SignalBus::new();
    editor.activate(&mut bus);

    editor.state_mut().set_image(photo);
    if let Some(ref text) = spec.top_text {
        type_caption(&mut editor, Slot::Top, text);
    }
    if let Some(ref text) = spec.bottom_text {
        type_caption(&mut editor, Slot::Bottom, text);
    }

    let result = match output_path {
        Some(ref path) => {
            trace!("Sharing the meme into {}...", path.display());
            editor.share(&mut FileShareSurface::new(path))
        }
        None => {
            trace!("No --output given, sharing to standard output");
            if isatty::stdout_isatty() {
                warn!("Standard output is a terminal.");
                // TODO: ask for confirmation since this can screw user's terminal
            }
            editor.share(&mut StreamShareSurface::new(io::stdout()))
        }
    };
    editor.deactivate(&mut bus);

    match result {
        Ok(ShareOutcome::Completed) => exitcode::OK,
        Ok(ShareOutcome::Cancelled) => {
            // The bundled surfaces never cancel, but the contract says
            // cancellation is a silent no-op, so honor it here too.
            info!("Nothing was shared.");
            exitcode::OK
        }
        Err(e) => {
            error!("Error while composing the meme: {}", e);
            exitcode::UNAVAILABLE
        }
    }
}

/// Run given caption text through the regular editing flow of a field.
fn type_caption(editor: &mut MemeEditor, slot: Slot, text: &str) {
    editor.begin_editing(slot);
    editor.set_caption(slot, text);
    editor.end_editing(slot);
}
