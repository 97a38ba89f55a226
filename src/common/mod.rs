mod fs;
mod io;
mod polygon;

pub(crate) use fs::*;
pub(crate) use io::*;
pub(crate) use polygon::*;
