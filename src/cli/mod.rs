pub mod batch;
pub mod convert;
pub mod hash;
pub mod key;

pub use batch::*;
pub use convert::*;
pub use hash::*;
pub use key::*;
