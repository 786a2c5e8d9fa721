// SPDX-License-Identifier: MIT

//! Bundle identifier detection for the running process.
//!
//! Tries the `Info.plist` next to the executable first, then falls back to
//! the `XPC_SERVICE_NAME` environment variable, which app extensions set to
//! `UIKitApplication:<bundle-id>[<hex>]`.

/// Reverse-DNS identifier of the running application, if one can be found.
pub(crate) fn bundle_id() -> Option<String> {
    info_plist_identifier().or_else(xpc_service_identifier)
}

fn info_plist_identifier() -> Option<String> {
    let exe = std::env::current_exe().ok()?;
    let info = exe.parent()?.join("Info.plist");
    let root = plist::Value::from_file(info).ok()?;
    root.as_dictionary()?
        .get("CFBundleIdentifier")?
        .as_string()
        .map(str::to_string)
}

fn xpc_service_identifier() -> Option<String> {
    parse_xpc_service_name(&std::env::var("XPC_SERVICE_NAME").ok()?)
}

/// Extract the bundle id from an XPC service name of the form
/// `UIKitApplication:com.example.app[f00d]`.
pub(crate) fn parse_xpc_service_name(name: &str) -> Option<String> {
    let rest = name.strip_prefix("UIKitApplication:")?;
    let (bundle, tail) = rest.split_once('[')?;
    let (hex, _) = tail.split_once(']')?;

    let bundle_ok = !bundle.is_empty()
        && bundle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let hex_ok = !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());

    if bundle_ok && hex_ok {
        Some(bundle.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_service_names() {
        assert_eq!(
            parse_xpc_service_name("UIKitApplication:com.example.app[ab12]"),
            Some("com.example.app".to_string())
        );
        assert_eq!(
            parse_xpc_service_name("UIKitApplication:com.omz-software.Pythonista3[F00D]"),
            Some("com.omz-software.Pythonista3".to_string())
        );
    }

    #[test]
    fn rejects_malformed_service_names() {
        assert_eq!(parse_xpc_service_name(""), None);
        assert_eq!(parse_xpc_service_name("com.example.app"), None);
        assert_eq!(parse_xpc_service_name("UIKitApplication:com.example.app"), None);
        assert_eq!(
            parse_xpc_service_name("UIKitApplication:com.example.app[not-hex]"),
            None
        );
        assert_eq!(parse_xpc_service_name("UIKitApplication:[ab12]"), None);
    }
}
