//! Type aliases for shared single-threaded state.
//!
//! Circles, their host map, and the broadcast coordinator all live on the
//! UI thread, so sharing is `Rc<RefCell<T>>` rather than `Arc<Mutex<T>>`.

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
pub type Shared<T> = Rc<RefCell<T>>;

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_creation() {
        let value: Shared<i32> = shared(42);
        assert_eq!(*value.borrow(), 42);

        *value.borrow_mut() = 100;
        assert_eq!(*value.borrow(), 100);
    }

    #[test]
    fn test_shared_unsizes_to_trait_object() {
        let value: Shared<dyn std::fmt::Debug> = shared(7u8);
        assert_eq!(format!("{:?}", value.borrow()), "7");
    }
}
