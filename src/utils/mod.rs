//! Various unsorted geometrical and logical operators.

pub use self::wops::{orthogonal_vector, WSign};

mod wops;
