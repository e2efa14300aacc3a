mod maths_utils;
mod perf;

pub use maths_utils::mean_and_stddev;
pub(crate) use maths_utils::min_max;
