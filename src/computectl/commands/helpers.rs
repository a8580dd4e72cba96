use crate::compute::ComputeClient;
use crate::error::{ComputectlError, ResourceKind, Result};
use crate::model::{ServerFilter, ServerIdentity};
use tracing::debug;

/// Picks the one `(id, name)` pair whose name equals `name` exactly.
pub fn single_match<'a, I>(kind: ResourceKind, name: &str, candidates: I) -> Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let ids: Vec<&str> = candidates
        .into_iter()
        .filter(|(_, candidate)| *candidate == name)
        .map(|(id, _)| id)
        .collect();

    match ids.as_slice() {
        [id] => Ok(id.to_string()),
        [] => Err(ComputectlError::NotFound {
            kind,
            name: name.to_string(),
        }),
        _ => Err(ComputectlError::AmbiguousName {
            kind,
            name: name.to_string(),
            count: ids.len(),
        }),
    }
}

/// Turns a [`ServerIdentity`] into a canonical server ID.
///
/// IDs come back untouched without calling the API. Names are looked up with
/// one listing call; the API's name filter is not exact, so results are
/// compared again here.
pub fn resolve_server<C: ComputeClient>(identity: &ServerIdentity, client: &C) -> Result<String> {
    let name = match identity {
        ServerIdentity::ById(id) => return Ok(id.clone()),
        ServerIdentity::ByName(name) => name,
    };

    let servers = client
        .list_servers(&ServerFilter::by_name(name))
        .map_err(|e| match e {
            e @ ComputectlError::Upstream(_) => e,
            other => ComputectlError::Upstream(other.to_string()),
        })?;

    let id = single_match(
        ResourceKind::Server,
        name,
        servers.iter().map(|s| (s.id.as_str(), s.name.as_str())),
    )?;
    debug!(name = %name, id = %id, "resolved server name");
    Ok(id)
}
