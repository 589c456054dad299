use std::{fmt, result};

use crate::llrb::Depth;

/// Statistic type, for [Oset][crate::Oset] instance.
///
/// `blacks` and `depths` are populated only by the
/// [validate][crate::Oset::validate] call, the cheap
/// [stats][crate::Oset::stats] call leaves them `None`.
pub struct Stats {
    pub name: String,
    pub n_count: usize,
    pub node_size: usize,
    pub blacks: Option<usize>,
    pub depths: Option<Depth>,
}

impl Stats {
    pub(crate) fn new(name: &str, n_count: usize, node_size: usize) -> Stats {
        Stats {
            name: name.to_string(),
            n_count,
            node_size,
            blacks: None,
            depths: None,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        let none = "none".to_string();
        let b = self.blacks.as_ref().map_or(none.clone(), |x| x.to_string());
        let d = self.depths.as_ref().map_or(none, |x| x.to_string());
        writeln!(f, "oset.name = {}", self.name)?;
        writeln!(
            f,
            "oset = {{ n_count={}, node_size={}, blacks={} }}",
            self.n_count, self.node_size, b,
        )?;
        writeln!(f, "oset.depths = {}", d)
    }
}
