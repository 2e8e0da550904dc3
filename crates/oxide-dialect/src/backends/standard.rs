//! Generic ANSI SQL.

use crate::config::{DialectConfig, ResolutionInfo};
use crate::dialect::{Dialect, DialectBuilder};

pub fn dialect(info: &ResolutionInfo) -> Dialect {
    let mut builder = DialectBuilder::standard(DialectConfig::STANDARD);
    builder.resolution_info(info);
    builder.build()
}
