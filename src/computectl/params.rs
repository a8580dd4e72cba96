//! # Parameter Parsing
//!
//! Turns raw flag strings into typed values. Everything here is pure except
//! [`parse_user_data`] and [`load_user_data`], which may read one local file.
//!
//! ## Comma lists
//!
//! `--securityGroups`, `--networks` and `--metadata` all take comma-separated
//! values. Splitting `""` naively yields `[""]`, which the API would read as a
//! group or network with an empty name, so [`parse_comma_list`] maps the empty
//! string to an empty list. Tokens are not trimmed: joining the result with `,`
//! reproduces the input.
//!
//! ## User data
//!
//! `--userData` accepts either a path or the payload itself. The value is tried
//! as a file first; if the read fails for any reason the string itself is sent.
//! That conflates "file missing" with "meant literally", so the branch taken is
//! logged, and `--userDataFile` / `--userDataLiteral` exist for callers who want
//! to say which one they mean.

use crate::error::{ComputectlError, Result};
use crate::model::NetworkAttachment;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

pub fn parse_comma_list(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(',').map(str::to_string).collect()
}

/// Parses `k1=v1,k2=v2`. Each token needs exactly one `=` with text on both
/// sides; a repeated key is rejected rather than overwritten.
pub fn parse_metadata(s: &str) -> Result<BTreeMap<String, String>> {
    let mut metadata = BTreeMap::new();

    for token in parse_comma_list(s) {
        let mut parts = token.split('=');
        let (key, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(k), Some(v), None) if !k.is_empty() && !v.is_empty() => (k, v),
            _ => return Err(ComputectlError::MalformedMetadata(token)),
        };

        if metadata.contains_key(key) {
            return Err(ComputectlError::DuplicateMetadataKey(key.to_string()));
        }
        metadata.insert(key.to_string(), value.to_string());
    }

    Ok(metadata)
}

/// File contents if `s` names a readable file, otherwise the bytes of `s`.
/// Never fails.
pub fn parse_user_data(s: &str) -> Vec<u8> {
    match fs::read(s) {
        Ok(contents) => {
            debug!(path = s, bytes = contents.len(), "user data read from file");
            contents
        }
        Err(e) => {
            warn!(
                "user data '{}' is not a readable file ({}); sending it as a literal value",
                s, e
            );
            s.as_bytes().to_vec()
        }
    }
}

pub fn parse_networks<S: AsRef<str>>(ids: &[S]) -> Vec<NetworkAttachment> {
    ids.iter()
        .map(|id| NetworkAttachment::new(id.as_ref()))
        .collect()
}

/// Where the user-data payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserDataSource {
    /// `--userData`: a file if one exists at that path, else the literal text.
    Auto(String),
    /// `--userDataFile`: must be readable.
    File(PathBuf),
    /// `--userDataLiteral`: never touches the filesystem.
    Literal(String),
}

pub fn load_user_data(source: &UserDataSource) -> Result<Vec<u8>> {
    match source {
        UserDataSource::Auto(value) => Ok(parse_user_data(value)),
        UserDataSource::File(path) => {
            let contents = fs::read(path)?;
            debug!(path = %path.display(), bytes = contents.len(), "user data read from file");
            Ok(contents)
        }
        UserDataSource::Literal(value) => Ok(value.as_bytes().to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    #[test]
    fn empty_string_is_empty_list() {
        assert!(parse_comma_list("").is_empty());
    }

    #[test]
    fn splits_in_order() {
        assert_eq!(parse_comma_list("web,db,ssh"), vec!["web", "db", "ssh"]);
    }

    #[test]
    fn keeps_inner_empty_tokens() {
        assert_eq!(parse_comma_list("a,,b"), vec!["a", "", "b"]);
    }

    proptest! {
        #[test]
        fn comma_list_round_trips(items in prop::collection::vec("[a-z0-9=-]{0,8}", 1..6)) {
            let joined = items.join(",");
            let reparsed = parse_comma_list(&joined);
            if joined.is_empty() {
                prop_assert!(reparsed.is_empty());
            } else {
                prop_assert_eq!(reparsed, items);
            }
        }
    }

    #[test]
    fn metadata_pairs() {
        let md = parse_metadata("k1=v1,k2=v2").unwrap();
        assert_eq!(md.len(), 2);
        assert_eq!(md["k1"], "v1");
        assert_eq!(md["k2"], "v2");
    }

    #[test]
    fn metadata_bad_token_is_reported() {
        match parse_metadata("k1=v1,bad") {
            Err(ComputectlError::MalformedMetadata(token)) => assert_eq!(token, "bad"),
            other => panic!("expected MalformedMetadata, got {:?}", other),
        }
    }

    #[test]
    fn metadata_rejects_empty_sides_and_extra_separators() {
        for input in ["=v", "k=", "a=b=c", "k1=v1,", "="] {
            assert!(
                matches!(
                    parse_metadata(input),
                    Err(ComputectlError::MalformedMetadata(_))
                ),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn metadata_rejects_duplicate_keys() {
        match parse_metadata("env=prod,env=dev") {
            Err(ComputectlError::DuplicateMetadataKey(key)) => assert_eq!(key, "env"),
            other => panic!("expected DuplicateMetadataKey, got {:?}", other),
        }
    }

    #[test]
    fn empty_metadata_is_empty_map() {
        assert!(parse_metadata("").unwrap().is_empty());
    }

    #[test]
    fn user_data_reads_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"#cloud-config\npackages: [nginx]\n").unwrap();

        let payload = parse_user_data(file.path().to_str().unwrap());
        assert_eq!(payload, b"#cloud-config\npackages: [nginx]\n");
    }

    #[test]
    fn user_data_falls_back_to_literal_when_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-script.sh");
        let missing = missing.to_str().unwrap();

        assert_eq!(parse_user_data(missing), missing.as_bytes());
        assert_eq!(parse_user_data("echo hello"), b"echo hello");
    }

    #[test]
    fn explicit_file_source_fails_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let source = UserDataSource::File(dir.path().join("missing"));
        assert!(matches!(
            load_user_data(&source),
            Err(ComputectlError::Io(_))
        ));
    }

    #[test]
    fn literal_source_ignores_filesystem() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"file contents").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let payload = load_user_data(&UserDataSource::Literal(path.clone())).unwrap();
        assert_eq!(payload, path.as_bytes());
    }

    #[test]
    fn networks_preserve_order() {
        let nets = parse_networks(&["net-b", "net-a"]);
        assert_eq!(
            nets,
            vec![NetworkAttachment::new("net-b"), NetworkAttachment::new("net-a")]
        );
    }
}
