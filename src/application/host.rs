//! Board resolution from the request host
//!
//! Boards other than the root board are served on `{board}.{server_name}`.

use crate::shared::validations::is_valid_slug;

/// Name of the board addressed by `host`.
///
/// `host` may carry a port. Anything that is not a single-label subdomain of
/// `server_name` resolves to the root board.
pub fn board_name_from_host(host: &str, server_name: &str, root: &str) -> String {
    let host = host.trim().to_ascii_lowercase();
    let host = host.split(':').next().unwrap_or_default();
    let server_name = server_name.trim().to_ascii_lowercase();

    match host.strip_suffix(server_name.as_str()) {
        Some(prefix) => match prefix.strip_suffix('.') {
            Some(label) if is_valid_slug(label) && !label.contains('.') => label.to_string(),
            _ => root.to_string(),
        },
        None => root.to_string(),
    }
}
