//! Parsing of `configure -s` output and per-field reconciliation decisions.
//!
//! The CLI prints its configuration as `Label ... value` lines. Everything
//! that depends on that textual layout lives here so it can be replaced if
//! the CLI grows a structured output mode.

use crate::core::types::{ConfigField, LocalConfig, ReconcilePlan, RemoteConfig, UpdateDecision};

/// Parse the configuration listing printed by the CLI.
///
/// A line starting with `Token` or `Workspace` contributes its value column:
/// the last whitespace-separated token after the label and the optional
/// `(-t, --token)` flag column. An empty value column counts as unset.
/// Later lines win over earlier ones.
pub fn parse_show_configuration(output: &str) -> RemoteConfig {
    let mut remote = RemoteConfig::default();
    for line in output.lines() {
        let line = line.trim();
        if line.starts_with(ConfigField::Token.label()) {
            remote.token = value_column(line);
        } else if line.starts_with(ConfigField::Workspace.label()) {
            remote.workspace = value_column(line);
        }
    }
    remote
}

fn value_column(line: &str) -> Option<String> {
    // Drop the label (`Token:` / `Token`).
    let (_, rest) = line.split_once(char::is_whitespace)?;
    let rest = rest.trim_start();
    let rest = match rest.strip_prefix('(') {
        Some(flags) => flags.split_once(')').map_or("", |(_, after)| after),
        None => rest,
    };
    rest.split_whitespace().last().map(str::to_string)
}

/// Decide how a single cached field relates to what the CLI reports.
pub fn decide(remote: Option<&str>, local: Option<&str>) -> UpdateDecision {
    match remote {
        None => UpdateDecision::PromptUser,
        Some(value) if local == Some(value) => UpdateDecision::NoChange,
        Some(value) => UpdateDecision::UpdateTo(value.to_string()),
    }
}

/// Build the reconciliation plan for both fields independently.
pub fn plan(remote: &RemoteConfig, local: &LocalConfig) -> ReconcilePlan {
    ReconcilePlan {
        token: decide(remote.token.as_deref(), local.token.as_deref()),
        workspace: decide(remote.workspace.as_deref(), local.workspace.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW_OUTPUT: &str = "\nConfig dir:                       /home/u/.config/exercism\nToken:         (-t, --token)     abc123\nWorkspace:     (-w, --workspace) /home/u/ex\nAPI Base URL:  (-a, --api)       https://api.exercism.io/v1\n";

    #[test]
    fn parses_token_and_workspace_lines() {
        let remote = parse_show_configuration(SHOW_OUTPUT);
        assert_eq!(remote.token.as_deref(), Some("abc123"));
        assert_eq!(remote.workspace.as_deref(), Some("/home/u/ex"));
    }

    #[test]
    fn empty_value_column_is_unset() {
        let output = "\nConfig dir:                       /home/u/.config/exercism\nToken:         (-t, --token)     \nWorkspace:     (-w, --workspace) \nAPI Base URL:  (-a, --api)       https://api.exercism.io/v1\n";
        let remote = parse_show_configuration(output);
        assert_eq!(remote, RemoteConfig::default());
        assert_eq!(
            plan(&remote, &LocalConfig::default()),
            ReconcilePlan {
                token: UpdateDecision::PromptUser,
                workspace: UpdateDecision::PromptUser,
            }
        );
    }

    #[test]
    fn flag_column_without_trailing_padding_is_unset() {
        let remote =
            parse_show_configuration("Workspace:     (-w, --workspace) /ws\nToken:         (-t, --token)");
        assert_eq!(remote.token, None);
        assert_eq!(remote.workspace.as_deref(), Some("/ws"));
    }

    #[test]
    fn parses_plain_key_value_lines() {
        let remote = parse_show_configuration("Token abc123\r\nWorkspace /home/u/ex\r\n");
        assert_eq!(remote.token.as_deref(), Some("abc123"));
        assert_eq!(remote.workspace.as_deref(), Some("/home/u/ex"));
    }

    #[test]
    fn missing_lines_are_unset() {
        let remote = parse_show_configuration("Config dir: /tmp\nAPI Base URL: x\n");
        assert_eq!(remote, RemoteConfig::default());
    }

    #[test]
    fn bare_label_is_unset() {
        let remote = parse_show_configuration("Token\nWorkspace /ws\n");
        assert_eq!(remote.token, None);
        assert_eq!(remote.workspace.as_deref(), Some("/ws"));
    }

    #[test]
    fn remote_value_wins_over_missing_cache() {
        let remote = parse_show_configuration("Token abc123\nWorkspace /home/u/ex\n");
        let local = LocalConfig {
            token: None,
            workspace: Some("/home/u/ex".to_string()),
        };
        assert_eq!(
            plan(&remote, &local),
            ReconcilePlan {
                token: UpdateDecision::UpdateTo("abc123".to_string()),
                workspace: UpdateDecision::NoChange,
            }
        );
    }

    #[test]
    fn absent_token_prompts_regardless_of_cache() {
        let remote = parse_show_configuration("Workspace /ws\n");
        for cached in [None, Some("old".to_string())] {
            let local = LocalConfig {
                token: cached,
                workspace: Some("/ws".to_string()),
            };
            assert_eq!(plan(&remote, &local).token, UpdateDecision::PromptUser);
        }
    }

    #[test]
    fn differing_cache_is_overwritten() {
        assert_eq!(
            decide(Some("/new"), Some("/old")),
            UpdateDecision::UpdateTo("/new".to_string())
        );
    }
}
