pub mod factory;
pub mod fund;
pub mod hard_work;
pub mod proxy;

pub use factory::*;
pub use fund::*;
pub use hard_work::*;
pub use proxy::*;
