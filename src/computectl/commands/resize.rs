use crate::commands::helpers::resolve_server;
use crate::commands::{CmdMessage, CmdResult};
use crate::compute::ComputeClient;
use crate::error::{ComputectlError, Result};
use crate::model::{ServerIdentity, ServerResizeRequest};

/// The target flavor is always an ID here; names are not accepted for resize.
pub fn build(server_id: String, flavor_id: Option<&str>) -> Result<ServerResizeRequest> {
    let flavor_id = required_flavor(flavor_id)?;
    Ok(ServerResizeRequest {
        server_id,
        flavor_id,
    })
}

/// `--flavorID` must be present and non-empty.
pub fn required_flavor(flavor_id: Option<&str>) -> Result<String> {
    match flavor_id {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(ComputectlError::MalformedInput(
            "Required flag [flavorID] for resize not set".to_string(),
        )),
    }
}

pub fn run<C: ComputeClient>(
    client: &mut C,
    identity: &ServerIdentity,
    flavor_id: Option<&str>,
) -> Result<CmdResult> {
    // Checked before the name lookup so a missing flag costs no round trip.
    required_flavor(flavor_id)?;

    let server_id = resolve_server(identity, client)?;
    let request = build(server_id, flavor_id)?;
    client.resize_server(&request)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Resize of server {} to flavor {} requested",
        request.server_id, request.flavor_id
    )));
    result.add_message(CmdMessage::info(
        "The server reports VERIFY_RESIZE once the new flavor is ready to confirm.",
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::memory::fixtures::ComputeFixture;

    #[test]
    fn missing_flavor_fails_before_lookup() {
        let mut compute = ComputeFixture::new().with_server("abc", "web-1").compute;
        let err = run(
            &mut compute,
            &ServerIdentity::ByName("web-1".into()),
            None,
        )
        .unwrap_err();

        assert!(matches!(err, ComputectlError::MalformedInput(_)));
        assert_eq!(compute.list_calls(), 0);
        assert!(compute.resized.is_empty());
    }

    #[test]
    fn empty_flavor_is_rejected() {
        assert!(build("abc".into(), Some("")).is_err());
    }

    #[test]
    fn resize_by_name_uses_resolved_id() {
        let mut compute = ComputeFixture::new()
            .with_server("abc-123", "web-1")
            .with_server("def-456", "db-1")
            .compute;

        let result = run(
            &mut compute,
            &ServerIdentity::ByName("web-1".into()),
            Some("flav2"),
        )
        .unwrap();

        assert_eq!(
            compute.resized,
            vec![ServerResizeRequest {
                server_id: "abc-123".into(),
                flavor_id: "flav2".into(),
            }]
        );
        assert!(result.server.is_none());
        assert_eq!(result.messages.len(), 2);
    }

    #[test]
    fn resize_by_id_skips_listing() {
        let mut compute = ComputeFixture::new().with_server("abc-123", "web-1").compute;
        run(
            &mut compute,
            &ServerIdentity::ById("abc-123".into()),
            Some("flav3"),
        )
        .unwrap();

        assert_eq!(compute.list_calls(), 0);
        assert_eq!(compute.resized[0].flavor_id, "flav3");
    }

    #[test]
    fn ambiguous_name_submits_nothing() {
        let mut compute = ComputeFixture::new()
            .with_server("a", "web-1")
            .with_server("b", "web-1")
            .compute;
        let err = run(
            &mut compute,
            &ServerIdentity::ByName("web-1".into()),
            Some("flav2"),
        )
        .unwrap_err();

        assert!(matches!(err, ComputectlError::AmbiguousName { .. }));
        assert!(compute.resized.is_empty());
    }
}
