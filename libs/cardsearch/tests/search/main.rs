#[path = "../support/mod.rs"]
mod support;

mod describe;
mod examples;
mod fields;
mod paging;
mod printing;
mod sorting;
mod store;
