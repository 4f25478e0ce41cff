//!
//! lulzpad -- Lulz in the making
//!

             extern crate antidote;
             extern crate glob;
             extern crate image;
             extern crate itertools;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;
             extern crate lru_cache;
#[macro_use] extern crate macro_attr;
#[macro_use] extern crate maplit;
             extern crate mime;
#[macro_use] extern crate newtype_derive;
             extern crate num;
             extern crate regex;
             extern crate rusttype;
             extern crate serde;
#[macro_use] extern crate serde_derive;
#[macro_use] extern crate try_opt;
             extern crate unicode_normalization;
             extern crate unreachable;


#[cfg(test)] extern crate serde_json;
#[cfg(test)] extern crate time;


mod compose;
mod editor;
mod model;
mod resources;
mod share;
mod source;
mod util;


pub use compose::*;
pub use editor::*;
pub use model::*;
pub use resources::*;
pub use share::*;
pub use source::*;
pub use util::cache::*;
