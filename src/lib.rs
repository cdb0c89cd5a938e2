//! Parser for inline tag-argument markup: the text following a
//! template-tag name, e.g. `@cover 'alt text' width=10px title={{ page.title }}`.
//!
//! [`Params::parse`] splits the markup into ordered positional and named
//! entries, classifying each token into a typed [`Value`]. Variable
//! references stay unresolved until a render context is attached with
//! [`Params::attach`].

mod error;
mod escape;
mod lookup;
mod params;
mod parser;
mod value;

pub use error::Error;
pub use escape::{descape, escape};
pub use lookup::lookup;
pub use params::{Entry, Params};
pub use value::{Color, Hex, Kind, Measure, Number, Path, Quoted, Quotes, UNITS, Value, Variable};

/// Render context values come straight from the host engine as JSON data.
pub type Context = serde_json::Value;
