// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alignment, visibility and arrange options.

use alloc::string::{String, ToString};
use core::str::FromStr;

use bitflags::bitflags;

/// Keyword that is not a member of the expected enumeration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{keyword}`")]
pub struct UnknownKeyword {
    /// Enumeration being parsed.
    pub kind: &'static str,
    /// The offending text.
    pub keyword: String,
}

/// Placement of an element within a wider slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    /// Flush with the slot's left edge.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush with the slot's right edge.
    Right,
    /// Fills the slot when no explicit width is set.
    Stretch,
}

/// Placement of an element within a taller slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    /// Flush with the slot's top edge.
    #[default]
    Top,
    /// Centered.
    Center,
    /// Flush with the slot's bottom edge.
    Bottom,
    /// Fills the slot when no explicit height is set.
    Stretch,
}

/// Whether an element is drawn and whether it occupies space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Drawn and laid out.
    #[default]
    Visible,
    /// Laid out but not drawn or hit tested.
    Hidden,
    /// Neither drawn nor given any space.
    Collapsed,
}

impl Visibility {
    /// Whether the element is drawn.
    #[must_use]
    pub fn is_drawn(self) -> bool {
        self == Self::Visible
    }
}

bitflags! {
    /// Flags passed from a parent to a child's arrange.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ArrangeOptions: u8 {
        /// Fill the whole slot, ignoring the child's own alignment.
        const FILL = 1 << 0;
    }
}

fn keyword(text: &str) -> String {
    text.trim().to_ascii_lowercase()
}

impl FromStr for HorizontalAlignment {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match keyword(s).as_str() {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            "stretch" => Ok(Self::Stretch),
            _ => Err(UnknownKeyword {
                kind: "horizontal alignment",
                keyword: s.to_string(),
            }),
        }
    }
}

impl FromStr for VerticalAlignment {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match keyword(s).as_str() {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            "stretch" => Ok(Self::Stretch),
            _ => Err(UnknownKeyword {
                kind: "vertical alignment",
                keyword: s.to_string(),
            }),
        }
    }
}

impl FromStr for Visibility {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match keyword(s).as_str() {
            "visible" => Ok(Self::Visible),
            "hidden" => Ok(Self::Hidden),
            "collapsed" => Ok(Self::Collapsed),
            _ => Err(UnknownKeyword {
                kind: "visibility",
                keyword: s.to_string(),
            }),
        }
    }
}

/// Offset of `used` within `space` along x.
#[must_use]
pub fn horizontal_offset(space: f64, used: f64, alignment: HorizontalAlignment) -> f64 {
    match alignment {
        HorizontalAlignment::Left | HorizontalAlignment::Stretch => 0.0,
        HorizontalAlignment::Center => (space - used) / 2.0,
        HorizontalAlignment::Right => space - used,
    }
}

/// Offset of `used` within `space` along y.
#[must_use]
pub fn vertical_offset(space: f64, used: f64, alignment: VerticalAlignment) -> f64 {
    match alignment {
        VerticalAlignment::Top | VerticalAlignment::Stretch => 0.0,
        VerticalAlignment::Center => (space - used) / 2.0,
        VerticalAlignment::Bottom => space - used,
    }
}
