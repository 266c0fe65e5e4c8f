// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-erased property values.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

/// Bound shared by every value that can live in a property slot.
///
/// Equality is required so writes can tell whether the effective value
/// actually changed.
pub trait PropertyValue: Any + Clone + PartialEq + fmt::Debug {}

impl<T: Any + Clone + PartialEq + fmt::Debug> PropertyValue for T {}

/// A boxed property value with its [`TypeId`].
///
/// ```rust
/// use trellis_property::ErasedValue;
///
/// let a = ErasedValue::new(4.0_f64);
/// let b = a.clone();
/// assert!(a.value_eq(&b));
/// assert_eq!(a.downcast_ref::<f64>(), Some(&4.0));
/// assert!(!a.value_eq(&ErasedValue::new(4_i32)));
/// ```
pub struct ErasedValue {
    inner: Box<dyn DynValue>,
    type_id: TypeId,
}

impl ErasedValue {
    /// Boxes `value`.
    #[must_use]
    pub fn new<T: PropertyValue>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            inner: Box::new(value),
        }
    }

    /// Type of the boxed value.
    #[must_use]
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Whether the boxed value is a `T`.
    #[must_use]
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Borrows the value as `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        if self.is::<T>() {
            self.inner.as_any().downcast_ref()
        } else {
            None
        }
    }

    /// Unboxes the value as `T`, handing it back unchanged on a type mismatch.
    pub fn downcast<T: 'static>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        let type_id = self.type_id;
        match self.inner.into_any().downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type id {type_id:?} was checked before downcasting"),
        }
    }

    /// Compares two erased values; values of different types are never equal.
    #[must_use]
    pub fn value_eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.inner.dyn_eq(other.inner.as_any())
    }
}

impl Clone for ErasedValue {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_boxed(),
            type_id: self.type_id,
        }
    }
}

impl PartialEq for ErasedValue {
    fn eq(&self, other: &Self) -> bool {
        self.value_eq(other)
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.dyn_fmt(f)
    }
}

trait DynValue: Any {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn clone_boxed(&self) -> Box<dyn DynValue>;
    fn dyn_eq(&self, other: &dyn Any) -> bool;
    fn dyn_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Values such as NaN that compare unequal to themselves. Two of them count
/// as the same value, so rewriting one is not a change.
#[allow(clippy::eq_op, reason = "self-comparison detects NaN-like values")]
fn self_unequal<T: PartialEq>(value: &T) -> bool {
    value != value
}

impl<T: PropertyValue> DynValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_boxed(&self) -> Box<dyn DynValue> {
        Box::new(self.clone())
    }

    fn dyn_eq(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<T>()
            .is_some_and(|other| self == other || (self_unequal(self) && self_unequal(other)))
    }

    fn dyn_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
