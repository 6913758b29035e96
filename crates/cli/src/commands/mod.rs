mod install;

pub use install::*;
