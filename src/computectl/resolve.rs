//! # Image and Flavor Name Resolution
//!
//! Users may name an image or flavor instead of giving its ID. Where that name
//! becomes an ID is a policy choice, captured by [`ReferenceResolver`]:
//!
//! - [`PassThrough`] leaves `Reference::ByName` in the request and lets the
//!   compute client deal with it while submitting.
//! - [`LocalLookup`] lists images/flavors first and swaps names for IDs, so a
//!   bad name fails with `NotFound` / `AmbiguousName` before anything is sent.
//!
//! The request builder does not care which one is in use.

use crate::commands::helpers::single_match;
use crate::compute::ComputeClient;
use crate::error::{ResourceKind, Result};
use crate::model::Reference;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub trait ReferenceResolver {
    fn resolve_image(&self, reference: Reference) -> Result<Reference>;
    fn resolve_flavor(&self, reference: Reference) -> Result<Reference>;
}

/// Selects a resolver; stored in the config file as `"pass-through"` or `"local"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameResolution {
    #[default]
    PassThrough,
    Local,
}

pub struct PassThrough;

impl ReferenceResolver for PassThrough {
    fn resolve_image(&self, reference: Reference) -> Result<Reference> {
        Ok(reference)
    }

    fn resolve_flavor(&self, reference: Reference) -> Result<Reference> {
        Ok(reference)
    }
}

pub struct LocalLookup<'a, C: ComputeClient> {
    client: &'a C,
}

impl<'a, C: ComputeClient> LocalLookup<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }
}

impl<C: ComputeClient> ReferenceResolver for LocalLookup<'_, C> {
    fn resolve_image(&self, reference: Reference) -> Result<Reference> {
        match reference {
            Reference::ByName(name) => {
                let images = self.client.list_images()?;
                let id = single_match(
                    ResourceKind::Image,
                    &name,
                    images.iter().map(|i| (i.id.as_str(), i.name.as_str())),
                )?;
                debug!(image = %name, id = %id, "resolved image name locally");
                Ok(Reference::Explicit(id))
            }
            other => Ok(other),
        }
    }

    fn resolve_flavor(&self, reference: Reference) -> Result<Reference> {
        match reference {
            Reference::ByName(name) => {
                let flavors = self.client.list_flavors()?;
                let id = single_match(
                    ResourceKind::Flavor,
                    &name,
                    flavors.iter().map(|f| (f.id.as_str(), f.name.as_str())),
                )?;
                debug!(flavor = %name, id = %id, "resolved flavor name locally");
                Ok(Reference::Explicit(id))
            }
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::memory::fixtures::ComputeFixture;
    use crate::error::ComputectlError;

    #[test]
    fn pass_through_keeps_names() {
        let reference = Reference::ByName("Ubuntu".into());
        assert_eq!(
            PassThrough.resolve_image(reference.clone()).unwrap(),
            reference
        );
    }

    #[test]
    fn local_lookup_replaces_name_with_id() {
        let compute = ComputeFixture::new()
            .with_image("img-1", "Ubuntu")
            .with_image("img-2", "Debian")
            .with_flavor("flav-1", "m1.small")
            .compute;
        let resolver = LocalLookup::new(&compute);

        assert_eq!(
            resolver
                .resolve_image(Reference::ByName("Debian".into()))
                .unwrap(),
            Reference::Explicit("img-2".into())
        );
        assert_eq!(
            resolver
                .resolve_flavor(Reference::ByName("m1.small".into()))
                .unwrap(),
            Reference::Explicit("flav-1".into())
        );
    }

    #[test]
    fn local_lookup_skips_listing_for_ids() {
        let compute = ComputeFixture::new().compute;
        let resolver = LocalLookup::new(&compute);

        resolver
            .resolve_image(Reference::Explicit("img-9".into()))
            .unwrap();
        resolver.resolve_flavor(Reference::Omitted).unwrap();
        assert_eq!(compute.list_calls(), 0);
    }

    #[test]
    fn local_lookup_reports_unknown_and_duplicate_names() {
        let compute = ComputeFixture::new()
            .with_flavor("f1", "large")
            .with_flavor("f2", "large")
            .compute;
        let resolver = LocalLookup::new(&compute);

        assert!(matches!(
            resolver.resolve_image(Reference::ByName("Nope".into())),
            Err(ComputectlError::NotFound {
                kind: ResourceKind::Image,
                ..
            })
        ));
        assert!(matches!(
            resolver.resolve_flavor(Reference::ByName("large".into())),
            Err(ComputectlError::AmbiguousName {
                kind: ResourceKind::Flavor,
                count: 2,
                ..
            })
        ));
    }

    #[test]
    fn name_resolution_config_values() {
        assert_eq!(
            serde_json::from_str::<NameResolution>("\"local\"").unwrap(),
            NameResolution::Local
        );
        assert_eq!(
            serde_json::to_string(&NameResolution::PassThrough).unwrap(),
            "\"pass-through\""
        );
    }
}
