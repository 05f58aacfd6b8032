//! Hook categories this tool knows how to install

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A lifecycle slot under the settings `hooks` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookCategory {
    Notification,
    Stop,
    SubagentStop,
    PreToolUse,
    PostToolUse,
}

impl HookCategory {
    pub const ALL: [HookCategory; 5] = [
        HookCategory::Notification,
        HookCategory::Stop,
        HookCategory::SubagentStop,
        HookCategory::PreToolUse,
        HookCategory::PostToolUse,
    ];

    /// Categories installed when the user selects nothing.
    pub fn defaults() -> Vec<HookCategory> {
        vec![HookCategory::Notification, HookCategory::Stop]
    }

    /// Key under `hooks` in the settings document.
    pub fn settings_key(self) -> &'static str {
        match self {
            HookCategory::Notification => "notification",
            HookCategory::Stop => "stop",
            HookCategory::SubagentStop => "subagentStop",
            HookCategory::PreToolUse => "preToolUse",
            HookCategory::PostToolUse => "postToolUse",
        }
    }

    /// Kebab-case stem used in the script flag.
    pub fn flag_stem(self) -> &'static str {
        match self {
            HookCategory::Notification => "notification",
            HookCategory::Stop => "stop",
            HookCategory::SubagentStop => "subagent-stop",
            HookCategory::PreToolUse => "pre-tool-use",
            HookCategory::PostToolUse => "post-tool-use",
        }
    }

    /// Flag passed to the notification script, e.g. `--stop-hook`.
    pub fn flag(self) -> String {
        format!("--{}-hook", self.flag_stem())
    }

    /// Look up a category by settings key or flag stem, ignoring case.
    pub fn from_settings_key(key: &str) -> Option<HookCategory> {
        let wanted = normalize(key);
        Self::ALL
            .into_iter()
            .find(|c| normalize(c.settings_key()) == wanted)
    }

    /// Comma-separated list of valid names, for error messages.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|c| c.settings_key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// `preToolUse`, `pre-tool-use` and `PRE_TOOL_USE` all normalize alike.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for HookCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.settings_key())
    }
}

impl FromStr for HookCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_settings_key(s.trim()).ok_or_else(|| Error::UnknownCategory {
            name: s.to_string(),
            valid: Self::valid_names(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("notification", HookCategory::Notification)]
    #[case("Stop", HookCategory::Stop)]
    #[case("subagentStop", HookCategory::SubagentStop)]
    #[case("subagent-stop", HookCategory::SubagentStop)]
    #[case("pre-tool-use", HookCategory::PreToolUse)]
    #[case("PRETOOLUSE", HookCategory::PreToolUse)]
    #[case(" postToolUse ", HookCategory::PostToolUse)]
    fn test_parse_accepts_key_and_stem(#[case] input: &str, #[case] expected: HookCategory) {
        assert_eq!(input.parse::<HookCategory>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_lists_valid_names() {
        let err = "bogus".parse::<HookCategory>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'bogus'"));
        assert!(msg.contains("subagentStop"));
    }

    #[test]
    fn test_flags() {
        assert_eq!(HookCategory::Notification.flag(), "--notification-hook");
        assert_eq!(HookCategory::PostToolUse.flag(), "--post-tool-use-hook");
    }

    #[test]
    fn test_serde_uses_settings_key() {
        let json = serde_json::to_string(&HookCategory::SubagentStop).unwrap();
        assert_eq!(json, "\"subagentStop\"");
        for category in HookCategory::ALL {
            assert_eq!(
                serde_json::to_value(category).unwrap(),
                serde_json::Value::String(category.settings_key().to_string())
            );
        }
    }
}
