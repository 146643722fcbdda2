//! Enforced reference-counted wrapper for heap values.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Shared, immutable heap payload of a `Value`.
///
/// The constructor is `pub(super)`, so outside the value module heap values
/// can only be created through `Value::string`, `Value::list` and
/// `Value::tuple`.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T: ?Sized> Heap<T> {
    #[inline]
    pub(super) fn new(value: Rc<T>) -> Self {
        Heap(value)
    }

    /// Returns true if both handles share one allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (*self.0).fmt(f)
    }
}
