pub mod cipher;
pub mod encode;
pub mod exchange;
pub mod hash;
pub mod input;

pub use cipher::*;
pub use encode::*;
pub use exchange::*;
pub use hash::*;
pub use input::Input;
