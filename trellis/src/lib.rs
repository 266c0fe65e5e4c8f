// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis: a retained-mode UI core.
//!
//! A [`View`] owns a tree of elements and everything attached to them:
//!
//! - layered property values with inheritance ([`trellis_property`]);
//! - the logical and visual trees with namescopes ([`trellis_tree`]);
//! - measure, arrange and position passes ([`trellis_layout`]);
//! - the style cascade ([`trellis_style`]);
//! - storyboards driven by per-frame clocks ([`trellis_animation`]);
//! - visual state groups and focus ([`trellis_visual_state`]).
//!
//! The host drives the view once per frame with [`View::update`] and then
//! [`View::draw`], handing it a [`DrawingContext`]. Elements customize
//! layout, drawing, focus and per-frame work through a [`Behavior`].
//!
//! ```rust
//! use kurbo::Size;
//! use peniko::color::palette::css;
//! use trellis::{ElementBuilder, FrameTime, View};
//! use trellis_style::{Declaration, Selector, SelectorPart, StyleRule, StyleSheetBuilder};
//!
//! let sheet = StyleSheetBuilder::new()
//!     .rule(StyleRule::new(
//!         [Selector::new(SelectorPart::of_type("Button"))],
//!         [Declaration::text("color", "red"), Declaration::text("width", "80")],
//!     ))
//!     .build();
//! let mut view = View::builder()
//!     .viewport(Size::new(320.0, 200.0))
//!     .stylesheet(sheet)
//!     .build()
//!     .unwrap();
//!
//! let button = view.create(ElementBuilder::new("Button").named("ok")).unwrap();
//! view.add_child(view.root(), button).unwrap();
//! view.update(FrameTime::default()).unwrap();
//!
//! let props = *view.properties();
//! assert_eq!(
//!     view.get_value(button, props.foreground).to_rgba8(),
//!     css::RED.to_rgba8()
//! );
//! assert_eq!(view.absolute_bounds(button).width(), 80.0);
//! assert_eq!(view.find_name(view.root(), "ok"), Some(button));
//! ```
//!
//! ## Features
//!
//! - `serde`: forwarded to [`trellis_animation`].

mod animation;
mod behavior;
mod cascade;
mod content;
mod element;
mod error;
mod layout;
mod properties;
mod render;
mod states;
mod view;

pub use peniko;
pub use trellis_animation;
pub use trellis_layout;
pub use trellis_property;
pub use trellis_style;
pub use trellis_tree;
pub use trellis_visual_state;

pub use behavior::{
    ArrangeCx, Arrangeable, Behavior, DrawCx, Drawable, Focusable, MeasureCx, Measurable,
    UpdateCx, Updatable,
};
pub use peniko::Color;
pub use content::{ContentHandle, ContentLoader, SourcedResource};
pub use element::ElementBuilder;
pub use error::ViewError;
pub use properties::StandardProperties;
pub use render::{DrawingContext, FrameTime};
pub use trellis_tree::ElementId;
pub use view::{View, ViewBuilder};
