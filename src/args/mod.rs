//! Module for handling command line arguments.

mod model;
mod parser;


use std::env;
use std::ffi::OsString;

use conv::TryFrom;

use super::{NAME, VERSION};
pub use self::model::{ArgsError, Options};
use self::parser::create_parser;


/// Parse command line arguments and return `Options` object.
#[inline]
pub fn parse() -> Result<Options, ArgsError> {
    parse_from_argv(env::args_os())
}

/// Parse application options from given array of arguments
/// (*all* arguments, including binary name).
#[inline]
pub fn parse_from_argv<I, T>(argv: I) -> Result<Options, ArgsError>
    where I: IntoIterator<Item=T>, T: Clone + Into<OsString>
{
    let parser = create_parser();
    let matches = parser.get_matches_from_safe(argv)?;
    Options::try_from(matches)
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use spectral::prelude::*;
    use super::parse_from_argv;
    use ::NAME;

    #[test]
    fn no_args() {
        assert_that!(parse_from_argv(Vec::<&str>::new())).is_err();
        assert_that!(parse_from_argv(vec![*NAME])).is_err();
    }

    #[test]
    fn just_the_photo() {
        let opts = parse_from_argv(vec![*NAME, "cat.jpg"]).unwrap();
        assert_eq!(PathBuf::from("cat.jpg"), opts.spec.image);
        assert_eq!(None, opts.spec.top_text);
        assert_eq!(None, opts.spec.bottom_text);
        assert_eq!(None, opts.output_path);
    }

    #[test]
    fn caption_texts() {
        let opts = parse_from_argv(vec![
            *NAME, "cat.jpg", "--top", "HI", "-b", "BYE"]).unwrap();
        assert_eq!(Some("HI".to_owned()), opts.spec.top_text);
        assert_eq!(Some("BYE".to_owned()), opts.spec.bottom_text);
    }

    #[test]
    fn explicit_size() {
        let opts = parse_from_argv(vec![
            *NAME, "cat.jpg", "--size", "800x600"]).unwrap();
        assert_eq!(Some(800), opts.spec.width);
        assert_eq!(Some(600), opts.spec.height);
    }

    #[test]
    fn invalid_size() {
        assert_that!(parse_from_argv(vec![*NAME, "cat.jpg", "--size", "800"]))
            .is_err();
        assert_that!(parse_from_argv(vec![*NAME, "cat.jpg", "--size", "duck"]))
            .is_err();
    }

    #[test]
    fn output_path() {
        let opts = parse_from_argv(vec![
            *NAME, "cat.jpg", "-o", "meme.png"]).unwrap();
        assert_eq!(Some(PathBuf::from("meme.png")), opts.output_path);
    }

    #[test]
    fn output_dash_means_stdout() {
        let opts = parse_from_argv(vec![*NAME, "cat.jpg", "-o", "-"]).unwrap();
        assert_eq!(None, opts.output_path);
    }

    #[test]
    fn verbosity() {
        let opts = parse_from_argv(vec![*NAME, "cat.jpg"]).unwrap();
        assert_eq!(0, opts.verbosity);

        let opts = parse_from_argv(vec![*NAME, "-v", "cat.jpg"]).unwrap();
        assert_eq!(1, opts.verbosity);

        let opts = parse_from_argv(vec![*NAME, "-q", "-q", "cat.jpg"]).unwrap();
        assert_eq!(-2, opts.verbosity);
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert_that!(parse_from_argv(vec![*NAME, "-v", "-q", "cat.jpg"]))
            .is_err();
    }
}
