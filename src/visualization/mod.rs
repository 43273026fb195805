pub mod console;

#[cfg(feature = "viewer")]
pub mod viewer;
