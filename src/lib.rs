//! Package implement an in-memory ordered-set index using
//! [left-leaning-red-black][llrb] tree, augmented with per-node
//! subtree-size for order-statistic queries.
//!
//! Keys are kept in sort order defined by a [Comparator] supplied at
//! construction time, natural order being the default. Along with the
//! usual create/get/delete operations the index answers rank and select
//! queries, floor and ceiling lookups, and range scans in either
//! direction, all in logarithmic time.
//!
//! The index is a *set*, keys only and every key unique. Inserting a key
//! that compares equal to a resident key is a no-op that hands back the
//! resident key.
//!
//! [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree

/// Short form to compose Error values.
///
/// Here are few possible ways:
///
/// ```ignore
/// err_at!(InvalidInput, msg: "bad argument");
/// ```
///
/// ```ignore
/// err_at!(Fatal, std::io::read(buf));
/// ```
#[macro_export]
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err($crate::Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err($crate::Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
}

mod error;
mod llrb;
mod order;

pub use crate::error::Error;
pub use crate::llrb::{Depth, Iter, Oset, Range, Reverse, Stats};
pub use crate::order::{Comparator, Natural};

/// Type alias for Result return type, used by this package.
pub type Result<T> = std::result::Result<T, Error>;
