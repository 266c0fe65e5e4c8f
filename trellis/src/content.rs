// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named external assets such as fonts and images.
//!
//! The view never loads anything itself. It asks a [`ContentLoader`] once per
//! asset name and keeps only the handle it gets back.

use core::fmt;
use core::str::FromStr;

use hashbrown::HashMap;

/// Opaque handle issued by a [`ContentLoader`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentHandle(pub u64);

/// Loads assets by name.
pub trait ContentLoader {
    /// Loads `asset`, or returns `None` if it does not exist.
    fn load(&mut self, asset: &str) -> Option<ContentHandle>;
}

impl<F: FnMut(&str) -> Option<ContentHandle>> ContentLoader for F {
    fn load(&mut self, asset: &str) -> Option<ContentHandle> {
        self(asset)
    }
}

/// A property value that names an asset, such as a font.
///
/// ```rust
/// use trellis::SourcedResource;
///
/// let font: SourcedResource = "fonts/body".parse().unwrap();
/// assert_eq!(font.asset(), Some("fonts/body"));
/// assert!(SourcedResource::default().asset().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SourcedResource {
    asset: Option<String>,
}

impl SourcedResource {
    /// Refers to `asset`.
    #[must_use]
    pub fn new(asset: impl Into<String>) -> Self {
        let asset = asset.into();
        Self {
            asset: (!asset.is_empty()).then_some(asset),
        }
    }

    /// The asset name, if any.
    #[must_use]
    pub fn asset(&self) -> Option<&str> {
        self.asset.as_deref()
    }
}

impl FromStr for SourcedResource {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim()))
    }
}

impl fmt::Display for SourcedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.asset().unwrap_or(""))
    }
}

/// Handles already obtained from the loader, by asset name.
///
/// Missing assets are remembered as well, so a failed load is not retried
/// every frame.
#[derive(Debug, Default)]
pub(crate) struct ContentCache {
    handles: HashMap<String, Option<ContentHandle>>,
}

impl ContentCache {
    pub(crate) fn resolve(
        &mut self,
        loader: Option<&mut dyn ContentLoader>,
        asset: &str,
    ) -> Option<ContentHandle> {
        if let Some(handle) = self.handles.get(asset) {
            return *handle;
        }
        let loader = loader?;
        let handle = loader.load(asset);
        if handle.is_none() {
            tracing::debug!(asset, "content not found");
        }
        self.handles.insert(asset.to_owned(), handle);
        handle
    }

    pub(crate) fn len(&self) -> usize {
        self.handles.len()
    }

    pub(crate) fn clear(&mut self) {
        self.handles.clear();
    }
}
