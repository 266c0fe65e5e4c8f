// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::id::PropertyId;

/// Failures raised by the registry and by erased writes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    /// A property with this name (or style alias) is already registered.
    #[error("property `{name}` is already registered")]
    DuplicateName {
        /// The clashing name.
        name: &'static str,
    },
    /// The registry ran out of `u16` ids.
    #[error("too many properties registered (max {})", u16::MAX)]
    TooManyProperties,
    /// The id does not belong to this registry.
    #[error("{0} is not registered")]
    Unregistered(PropertyId),
    /// An erased value did not have the property's value type.
    #[error("property `{property}` expects a value of type `{expected}`")]
    TypeMismatch {
        /// Registered property name.
        property: &'static str,
        /// Registered value type name.
        expected: &'static str,
    },
    /// Style text could not be converted to the property's value type.
    #[error("cannot parse `{text}` as a value of property `{property}`")]
    Unparseable {
        /// Registered property name.
        property: &'static str,
        /// The offending text.
        text: String,
    },
}
