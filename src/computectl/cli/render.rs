//! # Rendering
//!
//! Server records come out either as a two-column `property | value` table or
//! as pretty-printed JSON. Column widths are measured on the unstyled text so
//! alignment holds whether or not the terminal gets colors.

use super::setup::OutputFormat;
use super::styles::STYLES;
use chrono::{DateTime, Utc};
use computectl::api::{CmdMessage, MessageLevel};
use computectl::model::Server;
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const PROPERTY_HEADER: &str = "PROPERTY";
const VALUE_HEADER: &str = "VALUE";

pub(super) fn print_messages(messages: &[CmdMessage], output: OutputFormat) {
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => STYLES.info.apply_to(&message.content),
            MessageLevel::Success => STYLES.success.apply_to(&message.content),
            MessageLevel::Warning => STYLES.warning.apply_to(&message.content),
        };
        // Keep stdout machine-readable in JSON mode.
        match output {
            OutputFormat::Table => println!("{}", line),
            OutputFormat::Json => eprintln!("{}", line),
        }
    }
}

pub(super) fn render_server(server: &Server, output: OutputFormat, now: DateTime<Utc>) -> String {
    match output {
        OutputFormat::Json => serde_json::to_string_pretty(server).unwrap_or_default(),
        OutputFormat::Table => render_table(&server_properties(server, now)),
    }
}

fn server_properties(server: &Server, now: DateTime<Utc>) -> Vec<(&'static str, String)> {
    let mut rows = vec![("id", server.id.clone()), ("name", server.name.clone())];

    let optional = [
        ("status", server.status.clone()),
        ("adminPass", server.admin_pass.clone()),
        (
            "created",
            server
                .created
                .map(|created| format!("{} ({})", created.to_rfc3339(), format_age(created, now))),
        ),
        ("flavor", server.flavor.as_ref().map(|f| f.id.clone())),
        ("image", server.image.as_ref().map(|i| i.id.clone())),
        ("keypair", server.key_pair.clone()),
        ("accessIPv4", server.access_ipv4.clone()),
        ("accessIPv6", server.access_ipv6.clone()),
    ];
    rows.extend(
        optional
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v))),
    );

    if !server.metadata.is_empty() {
        let metadata = server
            .metadata
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        rows.push(("metadata", metadata));
    }

    rows
}

fn render_table(rows: &[(&str, String)]) -> String {
    let key_width = rows
        .iter()
        .map(|(key, _)| key.width())
        .chain(std::iter::once(PROPERTY_HEADER.width()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let header_pad = " ".repeat(key_width - PROPERTY_HEADER.width());
    out.push_str(&format!(
        "{}{}  {}\n",
        STYLES.header.apply_to(PROPERTY_HEADER),
        header_pad,
        STYLES.header.apply_to(VALUE_HEADER)
    ));

    for (key, value) in rows {
        let pad = " ".repeat(key_width - key.width());
        out.push_str(&format!(
            "{}{}  {}\n",
            STYLES.property.apply_to(key),
            pad,
            value
        ));
    }
    out
}

fn format_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
