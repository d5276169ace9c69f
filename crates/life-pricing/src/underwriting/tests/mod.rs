pub(crate) mod common;

mod factors;
mod retention;
