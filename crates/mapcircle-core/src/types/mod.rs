//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: The `Rc<RefCell<T>>` alias used for host maps.

pub mod aliases;

pub use aliases::*;
