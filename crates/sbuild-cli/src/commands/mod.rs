mod create;
mod inspect;
mod sections;

pub use create::{CreateArgs, create};
pub use inspect::{resolve, rootfs};
pub use sections::{plan, should_run};
