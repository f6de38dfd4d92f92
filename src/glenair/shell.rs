//! Known Series 80 shell styles
//!
//! Shell style codes are not validated against this list; it only supplies
//! labels for prompts and the `catalog shell-styles` listing.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShellStyle {
    pub code: &'static str,
    pub label: &'static str,
}

pub const SHELL_STYLES: &[ShellStyle] = &[
    ShellStyle { code: "0", label: "Square Flange Receptacle" },
    ShellStyle { code: "1", label: "In-Line Receptacle" },
    ShellStyle { code: "2", label: "Front Mount Jam Nut" },
    ShellStyle { code: "5", label: "Plug with Ratchet Mechanism" },
    ShellStyle { code: "7", label: "Rear Mount Jam Nut" },
];

/// Label for a shell style code, if it is a known one
pub fn shell_style_label(code: &str) -> Option<&'static str> {
    SHELL_STYLES
        .iter()
        .find(|s| s.code == code.trim())
        .map(|s| s.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_codes() {
        assert_eq!(shell_style_label("7"), Some("Rear Mount Jam Nut"));
        assert_eq!(shell_style_label("6"), None);
    }
}
