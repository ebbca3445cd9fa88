use crate::config::Config;
use crate::sites::{Extractor, Site};
use crate::{Result, SiftError};

/// Ordered list of the site instances a query runs against
///
/// Several mirrors of the same variant may be registered side by side; they
/// are searched in registration order.
pub struct SiteRegistry {
    sites: Vec<Box<dyn Extractor>>,
}

impl SiteRegistry {
    /// Creates a registry from already-built extractors
    ///
    /// # Arguments
    ///
    /// * `sites` - Extractors in search order
    ///
    /// # Returns
    ///
    /// * `Ok(SiteRegistry)` - At least one site was given
    /// * `Err(SiftError::NoSites)` - The list is empty
    pub fn new(sites: Vec<Box<dyn Extractor>>) -> Result<Self> {
        if sites.is_empty() {
            return Err(SiftError::NoSites);
        }
        Ok(Self { sites })
    }

    /// Builds one [`Site`] per `[[site]]` entry of the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(SiteRegistry)` - Every entry built
    /// * `Err(SiftError)` - An entry failed to build, or there are none
    pub fn from_config(config: &Config) -> Result<Self> {
        let sites = config
            .sites
            .iter()
            .map(|entry| Site::new(entry).map(|site| Box::new(site) as Box<dyn Extractor>))
            .collect::<Result<Vec<_>>>()?;

        Self::new(sites)
    }

    /// Registered sites in search order
    pub fn sites(&self) -> &[Box<dyn Extractor>] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
