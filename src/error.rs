use std::{error, fmt, result};

/// Error variants that can be returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the failing
/// call site, and a message.
#[derive(Clone)]
pub enum Error {
    /// Invalid argument to an API call, like an out-of-bounds select
    /// index or an inverted range. Raised before any structural change
    /// is made to the tree.
    InvalidInput(String, String),
    /// Fatal case, breaking one of the two red-black rules: two
    /// consecutive red links found on a path.
    ConsecutiveReds(String, String),
    /// Fatal case, breaking one of the two red-black rules: number of
    /// black links differ between the left arm and the right arm.
    UnbalancedBlacks(String, String),
    /// Fatal case, index entries are not in sort-order.
    SortError(String, String),
    /// Everything else that marks an implementation defect, like a red
    /// link leaning right or a stale subtree-size.
    Fatal(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::{ConsecutiveReds, Fatal, InvalidInput, SortError, UnbalancedBlacks};

        match self {
            InvalidInput(p, m) => write!(f, "InvalidInput:{} {}", p, m),
            ConsecutiveReds(p, m) => write!(f, "ConsecutiveReds:{} {}", p, m),
            UnbalancedBlacks(p, m) => write!(f, "UnbalancedBlacks:{} {}", p, m),
            SortError(p, m) => write!(f, "SortError:{} {}", p, m),
            Fatal(p, m) => write!(f, "Fatal:{} {}", p, m),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        fmt::Display::fmt(self, f)
    }
}

impl error::Error for Error {}

impl PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        use Error::{ConsecutiveReds, Fatal, InvalidInput, SortError, UnbalancedBlacks};

        matches!(
            (self, other),
            (InvalidInput(_, _), InvalidInput(_, _))
                | (ConsecutiveReds(_, _), ConsecutiveReds(_, _))
                | (UnbalancedBlacks(_, _), UnbalancedBlacks(_, _))
                | (SortError(_, _), SortError(_, _))
                | (Fatal(_, _), Fatal(_, _))
        )
    }
}
