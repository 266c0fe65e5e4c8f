// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The framework properties every element understands.

use kurbo::Insets;
use peniko::Color;
use peniko::color::{Srgb, parse_color};
use trellis_layout::{
    HorizontalAlignment, LayoutParams, VerticalAlignment, Visibility, parse_insets, parse_length,
};
use trellis_property::{
    Property, PropertyError, PropertyFlags, PropertyMetadataBuilder, PropertyRegistry,
    PropertyStore,
};

use crate::content::SourcedResource;

const OWNER: &str = "FrameworkElement";

fn non_negative_or_auto(value: f64) -> f64 {
    if value.is_nan() { value } else { value.max(0.0) }
}

fn min_bound(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn max_bound(value: f64) -> f64 {
    if value.is_nan() {
        f64::INFINITY
    } else {
        value.max(0.0)
    }
}

fn unit_interval(value: f64) -> f64 {
    if value.is_nan() { 1.0 } else { value.clamp(0.0, 1.0) }
}

fn length(default_value: f64, coerce: fn(f64) -> f64) -> PropertyMetadataBuilder<f64> {
    PropertyMetadataBuilder::new(default_value)
        .owner(OWNER)
        .flags(PropertyFlags::AFFECTS_MEASURE)
        .parse_with(parse_length)
        .coerce(coerce)
}

fn insets() -> PropertyMetadataBuilder<Insets> {
    PropertyMetadataBuilder::new(Insets::ZERO)
        .owner(OWNER)
        .flags(PropertyFlags::AFFECTS_MEASURE)
        .parse_with(parse_insets)
}

/// CSS color syntax: hex, named colors and the color functions.
fn parse_srgb(text: &str) -> Option<Color> {
    parse_color(text.trim())
        .ok()
        .map(|color| color.to_alpha_color::<Srgb>())
}

fn color(default_value: Color) -> PropertyMetadataBuilder<Color> {
    PropertyMetadataBuilder::new(default_value)
        .owner(OWNER)
        .flags(PropertyFlags::AFFECTS_RENDER)
        .parse_with(parse_srgb)
}

/// Handles to the built-in framework properties.
///
/// Style names are the kebab-case property names (`min-width`, `font-size`)
/// plus the aliases `halign`, `valign` and `color`.
#[derive(Copy, Clone, Debug)]
pub struct StandardProperties {
    /// Explicit width; `NaN` sizes to content.
    pub width: Property<f64>,
    /// Explicit height; `NaN` sizes to content.
    pub height: Property<f64>,
    /// Lower width bound.
    pub min_width: Property<f64>,
    /// Upper width bound.
    pub max_width: Property<f64>,
    /// Lower height bound.
    pub min_height: Property<f64>,
    /// Upper height bound.
    pub max_height: Property<f64>,
    /// Outer spacing.
    pub margin: Property<Insets>,
    /// Inner spacing around content.
    pub padding: Property<Insets>,
    /// Horizontal placement within the slot (`halign`).
    pub horizontal_alignment: Property<HorizontalAlignment>,
    /// Vertical placement within the slot (`valign`).
    pub vertical_alignment: Property<VerticalAlignment>,
    /// Drawn, hidden or collapsed.
    pub visibility: Property<Visibility>,
    /// Opacity multiplier in `0.0..=1.0`.
    pub opacity: Property<f64>,
    /// Content color (`color`). Inherits.
    pub foreground: Property<Color>,
    /// Fill behind the element's bounds.
    pub background: Property<Color>,
    /// Font size in logical pixels. Inherits.
    pub font_size: Property<f64>,
    /// Font asset. Inherits.
    pub font: Property<SourcedResource>,
}

impl StandardProperties {
    /// Registers every framework property into `registry`.
    pub fn register(registry: &mut PropertyRegistry) -> Result<Self, PropertyError> {
        Ok(Self {
            width: registry.try_register("Width", length(f64::NAN, non_negative_or_auto).build())?,
            height: registry.try_register("Height", length(f64::NAN, non_negative_or_auto).build())?,
            min_width: registry.try_register("MinWidth", length(0.0, min_bound).build())?,
            max_width: registry.try_register("MaxWidth", length(f64::INFINITY, max_bound).build())?,
            min_height: registry.try_register("MinHeight", length(0.0, min_bound).build())?,
            max_height: registry.try_register("MaxHeight", length(f64::INFINITY, max_bound).build())?,
            margin: registry.try_register("Margin", insets().build())?,
            padding: registry.try_register("Padding", insets().build())?,
            horizontal_alignment: registry.try_register(
                "HorizontalAlignment",
                PropertyMetadataBuilder::new(HorizontalAlignment::Stretch)
                    .owner(OWNER)
                    .style_name("halign")
                    .flags(PropertyFlags::AFFECTS_ARRANGE)
                    .parse_with(|text| text.parse().ok())
                    .build(),
            )?,
            vertical_alignment: registry.try_register(
                "VerticalAlignment",
                PropertyMetadataBuilder::new(VerticalAlignment::Stretch)
                    .owner(OWNER)
                    .style_name("valign")
                    .flags(PropertyFlags::AFFECTS_ARRANGE)
                    .parse_with(|text| text.parse().ok())
                    .build(),
            )?,
            visibility: registry.try_register(
                "Visibility",
                PropertyMetadataBuilder::new(Visibility::Visible)
                    .owner(OWNER)
                    .flags(PropertyFlags::AFFECTS_MEASURE | PropertyFlags::AFFECTS_RENDER)
                    .parse_with(|text| text.parse().ok())
                    .build(),
            )?,
            opacity: registry.try_register(
                "Opacity",
                PropertyMetadataBuilder::new(1.0)
                    .owner(OWNER)
                    .flags(PropertyFlags::AFFECTS_RENDER)
                    .parse_with(parse_length)
                    .coerce(unit_interval)
                    .build(),
            )?,
            foreground: registry.try_register(
                "Foreground",
                color(Color::BLACK).style_name("color").inherits(true).build(),
            )?,
            background: registry.try_register("Background", color(Color::TRANSPARENT).build())?,
            font_size: registry.try_register(
                "FontSize",
                length(14.0, min_bound).inherits(true).build(),
            )?,
            font: registry.try_register(
                "Font",
                PropertyMetadataBuilder::new(SourcedResource::default())
                    .owner(OWNER)
                    .flags(PropertyFlags::AFFECTS_MEASURE | PropertyFlags::INHERITS)
                    .parse_with(|text| text.parse().ok())
                    .build(),
            )?,
        })
    }

    /// Snapshot of the layout properties stored on one element.
    ///
    /// Layout properties do not inherit, so only the element's own store and
    /// the registry defaults are consulted.
    #[must_use]
    pub fn layout_params<K: Copy + Eq>(
        &self,
        store: &PropertyStore<K>,
        registry: &PropertyRegistry,
    ) -> LayoutParams {
        LayoutParams {
            width: *store.get_own_or_default(self.width, registry),
            height: *store.get_own_or_default(self.height, registry),
            min_width: *store.get_own_or_default(self.min_width, registry),
            max_width: *store.get_own_or_default(self.max_width, registry),
            min_height: *store.get_own_or_default(self.min_height, registry),
            max_height: *store.get_own_or_default(self.max_height, registry),
            margin: *store.get_own_or_default(self.margin, registry),
            padding: *store.get_own_or_default(self.padding, registry),
            horizontal_alignment: *store.get_own_or_default(self.horizontal_alignment, registry),
            vertical_alignment: *store.get_own_or_default(self.vertical_alignment, registry),
            visibility: *store.get_own_or_default(self.visibility, registry),
        }
    }
}
