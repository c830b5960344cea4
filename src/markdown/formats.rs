//! Output formats
//!
//!     A parsed tree can be rendered as mdast-shaped JSON ([json]) or as a compact
//!     one-line-per-node tree view ([treeviz]). Formats are looked up by name through
//!     the [FormatRegistry].

pub mod json;
pub mod registry;
pub mod treeviz;

pub use json::{to_json_string, JsonFormatter};
pub use registry::{FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
