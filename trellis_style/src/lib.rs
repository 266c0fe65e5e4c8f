// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Style: selectors, rules and stylesheets.
//!
//! A [`StyleSheet`] is an ordered list of [`StyleRule`]s plus named
//! storyboards. Each rule carries one or more [`Selector`]s and a body of
//! [`Declaration`]s: property setters and visual state transitions.
//!
//! Selectors match against a host tree through [`MatchContext`], so this crate
//! never sees the element arena. Compound parts test type, name, classes and
//! current visual states; parts are chained with descendant or child
//! combinators over logical parents.
//!
//! ## Cascade order
//!
//! [`StyleSheet::resolve`] visits rules in stylesheet order and later rules
//! override earlier ones per property. Specificity only decides which of a
//! rule's own selectors is reported as the match: the highest wins, and on a
//! tie the first declared one does.
//!
//! ```rust
//! use trellis_style::{
//!     Declaration, DeclaredValue, MatchContext, Selector, SelectorPart, StyleRule,
//!     StyleSheetBuilder,
//! };
//!
//! struct One;
//!
//! impl MatchContext for One {
//!     type Element = ();
//!     fn element_type(&self, _: ()) -> &str { "Button" }
//!     fn element_name(&self, _: ()) -> Option<&str> { None }
//!     fn has_class(&self, _: (), class: &str) -> bool { class == "primary" }
//!     fn is_in_state(&self, _: (), _: &str) -> bool { false }
//!     fn logical_parent(&self, _: ()) -> Option<()> { None }
//! }
//!
//! let sheet = StyleSheetBuilder::new()
//!     .rule(StyleRule::new(
//!         [Selector::new(SelectorPart::universal().class("primary"))],
//!         [Declaration::text("color", "blue")],
//!     ))
//!     .rule(StyleRule::new(
//!         [Selector::new(SelectorPart::of_type("Button"))],
//!         [Declaration::text("color", "red")],
//!     ))
//!     .build();
//!
//! let style = sheet.resolve(&One, ());
//! assert_eq!(
//!     style.setter("color").map(|s| s.value),
//!     Some(&DeclaredValue::Text("red".into()))
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod resources;
mod rule;
mod selector;
mod stylesheet;

pub use error::StyleError;
pub use resources::{ResourceDictionary, ResourceDictionaryBuilder};
pub use rule::{Declaration, DeclaredValue, StyleRule};
pub use selector::{Combinator, MatchContext, Selector, SelectorPart, Specificity, VIEW_RESOURCE_TYPE};
pub use stylesheet::{ResolvedSetter, ResolvedStyle, ResolvedTransition, StyleSheet, StyleSheetBuilder};
