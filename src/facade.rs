//! Query handle for one property.
//!
//! `PropertySet` is what a binding layer holds: construct it from a property
//! (or its name), ask membership and range questions, drop or `release` it.
//! The handle is a clone of the directory's cached set, so creating one costs a
//! reference count bump after the first load and releasing it never frees data
//! another handle still sees.

use crate::directory::PropertyDirectory;
use crate::error::Result;
use crate::property::BinaryProperty;
use crate::set::{InversionList, Ranges};

/// Read-only view of one binary property's code points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySet {
    property: BinaryProperty,
    set: InversionList,
}

impl PropertySet {
    pub fn new(directory: &PropertyDirectory, property: BinaryProperty) -> Result<Self> {
        let set = directory.get(property)?;
        Ok(Self { property, set })
    }

    pub fn from_name(directory: &PropertyDirectory, name: &str) -> Result<Self> {
        let property = BinaryProperty::from_name(name)?;
        Self::new(directory, property)
    }

    /// Load through the process-wide directory.
    pub fn load(property: BinaryProperty) -> Result<Self> {
        Self::new(PropertyDirectory::global(), property)
    }

    pub fn property(&self) -> BinaryProperty {
        self.property
    }

    #[inline]
    pub fn contains(&self, code_point: u32) -> bool {
        self.set.contains(code_point)
    }

    #[inline]
    pub fn contains_char(&self, c: char) -> bool {
        self.set.contains_char(c)
    }

    pub fn iter_ranges(&self) -> Ranges<'_> {
        self.set.iter_ranges()
    }

    pub fn range_count(&self) -> usize {
        self.set.range_count()
    }

    /// Number of code points with the property.
    pub fn size(&self) -> usize {
        self.set.size()
    }

    pub fn as_set(&self) -> &InversionList {
        &self.set
    }

    /// Give the handle back. Shared data stays alive for other handles.
    pub fn release(self) {}
}
