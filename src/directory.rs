//! Property set directory: property → realized, cached set.
//!
//! Stored properties go through the loader. Derived properties run a small
//! pipeline over other properties' sets with the builder. Either way the
//! result is cached per property, so repeated `get` calls return the same
//! shared allocation and never touch the data source again.
//!
//! ```text
//! get(Blank)
//!   └── derive
//!         └── get(WhiteSpace) ──▶ loader.load("WSpace", version) ──▶ DataSource
//!         builder: WhiteSpace − {LF, VT, FF, CR, NEL, LS, PS}
//! ```

use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::cache::OnceMap;
use crate::config::Config;
use crate::error::{PropsError, Result};
use crate::loader::PropertyLoader;
use crate::property::{BinaryProperty, Source};
use crate::provider::{DataSource, DirectorySource};
use crate::set::{InversionList, InversionListBuilder};

/// White_Space members that are vertical, hence not Blank.
const VERTICAL_SPACE: [(u32, u32); 3] = [(0x0A, 0x0E), (0x85, 0x86), (0x2028, 0x202A)];

static GLOBAL: OnceLock<PropertyDirectory> = OnceLock::new();

/// Resolves properties to cached inversion lists.
#[derive(Debug)]
pub struct PropertyDirectory {
    loader: PropertyLoader,
    version: String,
    sets: OnceMap<BinaryProperty, InversionList>,
}

impl PropertyDirectory {
    pub fn new(source: impl DataSource + 'static, version: impl Into<String>) -> Self {
        Self {
            loader: PropertyLoader::new(source),
            version: version.into(),
            sets: OnceMap::new(),
        }
    }

    /// Directory over the on-disk data named by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            DirectorySource::new(config.data_dir.clone()),
            config.data_version.clone(),
        )
    }

    /// Process-wide directory, configured from the environment on first use.
    pub fn global() -> &'static PropertyDirectory {
        GLOBAL.get_or_init(|| {
            let config = Config::from_env();
            debug!(
                data_dir = %config.data_dir.display(),
                version = %config.data_version,
                "initializing global property directory"
            );
            Self::from_config(&config)
        })
    }

    /// The set for `property`, loading or deriving it on first use.
    pub fn get(&self, property: BinaryProperty) -> Result<InversionList> {
        self.sets
            .get_or_try_insert(&property, || self.realize(property))
            .map(|(set, _)| set)
    }

    /// Like [`get`](Self::get), resolving the property by name first.
    ///
    /// Unknown names fail before anything is cached or fetched.
    pub fn get_by_name(&self, name: &str) -> Result<InversionList> {
        let property = BinaryProperty::from_name(name)?;
        self.get(property)
    }

    pub fn is_cached(&self, property: BinaryProperty) -> bool {
        self.sets.contains(&property)
    }

    /// Number of realized properties.
    pub fn cached_len(&self) -> usize {
        self.sets.len()
    }

    pub fn loader(&self) -> &PropertyLoader {
        &self.loader
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Realize every property in `properties` on the rayon pool.
    ///
    /// Returns the number realized; the first error aborts the rest.
    #[cfg(feature = "parallel")]
    pub fn preload(&self, properties: &[BinaryProperty]) -> Result<usize> {
        use rayon::prelude::*;

        properties
            .par_iter()
            .map(|&p| self.get(p).map(|_| 1))
            .try_reduce(|| 0, |a, b| Ok(a + b))
    }

    /// Realize every property in `properties`.
    #[cfg(not(feature = "parallel"))]
    pub fn preload(&self, properties: &[BinaryProperty]) -> Result<usize> {
        for &p in properties {
            self.get(p)?;
        }
        Ok(properties.len())
    }

    fn realize(&self, property: BinaryProperty) -> Result<InversionList> {
        match property.source() {
            Source::Stored => {
                let record: Arc<_> = self.loader.load(property.key(), &self.version)?;
                Ok(record.to_set())
            }
            Source::Derived => self.derive(property),
        }
    }

    fn derive(&self, property: BinaryProperty) -> Result<InversionList> {
        debug!(property = %property, "deriving property set");
        let mut builder = InversionListBuilder::new();
        match property {
            BinaryProperty::ChangesWhenCasemapped => {
                for part in [
                    BinaryProperty::ChangesWhenLowercased,
                    BinaryProperty::ChangesWhenUppercased,
                    BinaryProperty::ChangesWhenTitlecased,
                ] {
                    builder.add_set(&self.get(part)?)?;
                }
            }
            BinaryProperty::Blank => {
                builder.add_set(&self.get(BinaryProperty::WhiteSpace)?)?;
                for (start, end) in VERTICAL_SPACE {
                    builder.remove_range(start, end)?;
                }
            }
            other => {
                debug!(property = %other, "no derivation pipeline");
                return Err(PropsError::InvalidState {
                    reason: "no derivation pipeline for property",
                });
            }
        }
        builder.build()
    }
}
