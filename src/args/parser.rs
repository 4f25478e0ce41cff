//! Module defining the command line argument parser.

use std::io::{self, Read};
use std::path::PathBuf;

use conv::TryFrom;
use clap::{self, AppSettings, Arg, ArgMatches};
use serde_json;

use lulzpad::{MemeSpec, Size};
use super::{NAME, VERSION};
use super::model::{ArgsError, Options};


impl<'a> TryFrom<ArgMatches<'a>> for Options {
    type Err = ArgsError;

    fn try_from(matches: ArgMatches<'a>) -> Result<Self, Self::Err> {
        let verbose_count = matches.occurrences_of(OPT_VERBOSE) as isize;
        let quiet_count = matches.occurrences_of(OPT_QUIET) as isize;
        let verbosity = verbose_count - quiet_count;

        let spec = if matches.is_present(OPT_JSON) {
            let mut json = String::new();
            io::stdin().read_to_string(&mut json)?;
            serde_json::from_str(&json)?
        } else {
            let image = matches.value_of(ARG_IMAGE).unwrap().trim();
            let size = match matches.value_of(OPT_SIZE) {
                Some(s) => Some(parse_size(s)?),
                None => None,
            };
            MemeSpec{
                image: PathBuf::from(image),
                top_text: matches.value_of(OPT_TOP).map(|s| s.to_owned()),
                bottom_text: matches.value_of(OPT_BOTTOM).map(|s| s.to_owned()),
                width: size.map(|s| s.width),
                height: size.map(|s| s.height),
            }
        };

        // Output path can be set explicitly to stdout via `-`.
        let output_path = matches.value_of(OPT_OUTPUT)
            .map(|p| p.trim())
            .and_then(|p| if p == "-" { None } else { Some(p) })
            .map(|p| PathBuf::from(p));

        Ok(Options{verbosity: verbosity, spec: spec, output_path: output_path})
    }
}

/// Parse the WxH value of the --size flag.
fn parse_size(s: &str) -> Result<Size, ArgsError> {
    let normalized = s.trim().to_lowercase();
    let mut parts = normalized.splitn(2, 'x');
    let width = parts.next().and_then(|p| p.parse::<u32>().ok());
    let height = parts.next().and_then(|p| p.parse::<u32>().ok());
    match (width, height) {
        (Some(w), Some(h)) => Ok(Size::new(w, h)),
        _ => Err(ArgsError::from(s.to_owned())),
    }
}


// Parser definition

/// Type of the argument parser object
/// (which is called an "App" in clap's silly nomenclature).
pub type Parser<'p> = clap::App<'p, 'p>;


lazy_static! {
    static ref ABOUT: &'static str = option_env!("CARGO_PKG_DESCRIPTION").unwrap_or("");
}

const ARG_IMAGE: &'static str = "image";
const OPT_TOP: &'static str = "top";
const OPT_BOTTOM: &'static str = "bottom";
const OPT_SIZE: &'static str = "size";
const OPT_JSON: &'static str = "json";
const OPT_OUTPUT: &'static str = "output";
const OPT_VERBOSE: &'static str = "verbose";
const OPT_QUIET: &'static str = "quiet";


/// Create the parser for application's command line.
#[allow(dangerous_implicit_autorefs)]  // originates in clap's crate_authors! macro
pub fn create_parser<'p>() -> Parser<'p> {
    let parser = Parser::new(*NAME).version(&**VERSION);
    parser
        .about(*ABOUT)
        .author(crate_authors!(", "))

        .setting(AppSettings::StrictUtf8)

        .setting(AppSettings::UnifiedHelpMessage)
        .setting(AppSettings::DontCollapseArgsInUsage)
        .setting(AppSettings::DeriveDisplayOrder)

        // Meme specification.
        .arg(Arg::with_name(ARG_IMAGE)
            .value_name("IMAGE")
            .required_unless(OPT_JSON)
            .help("Photo to compose the meme from"))
        .arg(Arg::with_name(OPT_TOP)
            .long("top").short("t")
            .takes_value(true)
            .value_name("TEXT")
            .help("Top caption text")
            .long_help(concat!(
                "Text of the top caption.\n\n",
                "If not given, the TOP placeholder is rendered, exactly like ",
                "in an untouched editor.")))
        .arg(Arg::with_name(OPT_BOTTOM)
            .long("bottom").short("b")
            .takes_value(true)
            .value_name("TEXT")
            .help("Bottom caption text"))
        .arg(Arg::with_name(OPT_SIZE)
            .long("size").short("s")
            .takes_value(true)
            .value_name("WxH")
            .help("Dimensions of the composed meme")
            .long_help(concat!(
                "Dimensions of the viewport the meme is flattened within.\n\n",
                "By default, the dimensions of the photo itself are used.")))
        .arg(Arg::with_name(OPT_JSON)
            .long("json")
            .conflicts_with_all(&[ARG_IMAGE, OPT_TOP, OPT_BOTTOM, OPT_SIZE])
            .help("Read a JSON meme spec from standard input"))

        // Output flags.
        .arg(Arg::with_name(OPT_OUTPUT)
            .long("output").short("o")
            .takes_value(true)
            .value_name("FILE")
            .required(false)
            .help("File to write the composed meme to")
            .long_help(concat!(
                "What file should the final image be written to.\n\n",
                "By default, or when this flag is set to `-` (single dash), the image is written ",
                "to standard output so it can be e.g. piped to the ImageMagick `display` program.")))

        // Verbosity flags.
        .arg(Arg::with_name(OPT_VERBOSE)
            .long("verbose").short("v")
            .multiple(true)
            .conflicts_with(OPT_QUIET)
            .help("Increase logging verbosity"))
        .arg(Arg::with_name(OPT_QUIET)
            .long("quiet").short("q")
            .multiple(true)
            .conflicts_with(OPT_VERBOSE)
            .help("Decrease logging verbosity"))

        .help_short("H")
        .version_short("V")
}
