pub mod convert;
pub mod key;
pub mod mt19937;
pub mod xxhash;

pub use convert::*;
pub use key::*;
pub use mt19937::*;
pub use xxhash::*;
