//! Text primitives shared by the iCalendar and vCard codecs.
//!
//! - `escape`: TEXT value escaping and parameter quoting
//! - `fold`: 75-octet line folding and unfolding
//! - `datetime` / `duration`: packed date, date-time and duration values
//! - `geo`: latitude/longitude pairs
//! - `content_line`: `name;params:value` representation used by both lexers
//! - `writer`: folded CRLF output used by both generators

pub mod content_line;
pub mod datetime;
pub mod duration;
pub mod escape;
pub mod fold;
pub mod geo;
pub mod writer;

pub use content_line::{ContentLine, Parameter};
pub use datetime::{
    DateValue, LenientDate, format_date_only, format_date_utc, format_date_value,
    parse_date_lenient, parse_date_value,
};
pub use duration::{format_duration, parse_duration};
pub use escape::{escape_param_value, escape_text, split_unescaped, unescape_text};
pub use fold::{fold_line, logical_lines, unfold_lines};
pub use geo::{GeoPoint, parse_geo};
pub use writer::LineWriter;
