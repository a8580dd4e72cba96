//! Server creation: raw flags in, a validated [`ServerCreateRequest`] out,
//! then one call to the compute API.
//!
//! Rules applied by [`build`], first failure wins:
//!
//! 1. the name must be non-empty;
//! 2. image: `imageRef`, else `imageName`, else omitted (boot-from-volume, or
//!    left for the API to reject);
//! 3. flavor: `flavorRef`, else `flavorName`, else omitted;
//! 4. security groups: comma list, an empty flag is an empty list;
//! 5. networks: unset means the API picks, set means exactly that list;
//! 6. metadata: unset means omitted, set means `k=v` pairs;
//! 7. user data: read according to its [`UserDataSource`].

use crate::commands::{CmdMessage, CmdResult};
use crate::compute::ComputeClient;
use crate::error::{ComputectlError, Result};
use crate::model::{Reference, ServerCreateRequest};
use crate::params::{
    load_user_data, parse_comma_list, parse_metadata, parse_networks, UserDataSource,
};
use crate::resolve::{LocalLookup, NameResolution, PassThrough, ReferenceResolver};

/// Create flags exactly as given on the command line. `None` means the flag
/// was not passed at all.
#[derive(Debug, Clone, Default)]
pub struct CreateServerFlags {
    pub name: String,
    pub image_ref: Option<String>,
    pub image_name: Option<String>,
    pub flavor_ref: Option<String>,
    pub flavor_name: Option<String>,
    pub boot_volume: Option<String>,
    pub security_groups: Option<String>,
    pub user_data: Option<UserDataSource>,
    pub networks: Option<String>,
    pub metadata: Option<String>,
    pub admin_pass: Option<String>,
    pub key_pair: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

pub fn build(flags: &CreateServerFlags) -> Result<ServerCreateRequest> {
    if flags.name.is_empty() {
        return Err(ComputectlError::MalformedInput(
            "server name must not be empty".to_string(),
        ));
    }

    let image = Reference::from_flags(flags.image_ref.as_deref(), flags.image_name.as_deref());
    let flavor = Reference::from_flags(flags.flavor_ref.as_deref(), flags.flavor_name.as_deref());
    let security_groups = parse_comma_list(flags.security_groups.as_deref().unwrap_or_default());
    let networks = flags
        .networks
        .as_deref()
        .map(|s| parse_networks(&parse_comma_list(s)));
    let metadata = flags.metadata.as_deref().map(parse_metadata).transpose()?;
    let user_data = flags.user_data.as_ref().map(load_user_data).transpose()?;

    Ok(ServerCreateRequest {
        name: flags.name.clone(),
        image,
        flavor,
        boot_volume: non_empty(&flags.boot_volume),
        security_groups,
        admin_pass: non_empty(&flags.admin_pass),
        key_pair: non_empty(&flags.key_pair),
        user_data,
        networks,
        metadata,
    })
}

pub fn resolve_references<R: ReferenceResolver>(
    mut request: ServerCreateRequest,
    resolver: &R,
) -> Result<ServerCreateRequest> {
    request.image = resolver.resolve_image(std::mem::take(&mut request.image))?;
    request.flavor = resolver.resolve_flavor(std::mem::take(&mut request.flavor))?;
    Ok(request)
}

/// Resolves names per `resolution` and submits an already built request.
pub fn run<C: ComputeClient>(
    client: &mut C,
    resolution: NameResolution,
    request: ServerCreateRequest,
) -> Result<CmdResult> {
    let request = match resolution {
        NameResolution::PassThrough => resolve_references(request, &PassThrough)?,
        NameResolution::Local => resolve_references(request, &LocalLookup::new(&*client))?,
    };

    let server = client.create_server(&request)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Server created: {} ({})",
        server.name, server.id
    )));
    if request.admin_pass.is_none() && server.admin_pass.is_some() {
        result.add_message(CmdMessage::warning(
            "An admin password was generated; it is shown only once.",
        ));
    }
    Ok(result.with_server(server))
}
