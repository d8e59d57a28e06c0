use std::sync::OnceLock;

use regex::Regex;

/// Matches `{{ env.VAR }}` and `{{ env.VAR | default("fallback") }}`
fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("must be valid regex")
    })
}

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// Expansion happens on the raw text before deserialization, so config
/// structs hold plain `String`/`SecretString` values. TOML comment lines
/// are passed through unchanged, which lets commented-out keys reference
/// unset variables.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut output = String::with_capacity(input.len());

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
        } else {
            output.push_str(&expand_line(line)?);
        }
    }

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

/// Expand placeholders within a single line
fn expand_line(line: &str) -> Result<String, String> {
    let mut result = String::with_capacity(line.len());
    let mut last_end = 0;

    for captures in placeholder_re().captures_iter(line) {
        let overall = captures.get(0).expect("capture 0 always present");
        let var_name = &captures[1];
        let fallback = captures.get(2).map(|m| m.as_str());

        result.push_str(&line[last_end..overall.start()]);

        match std::env::var(var_name) {
            Ok(value) => result.push_str(&value),
            Err(_) => match fallback {
                Some(default) => result.push_str(default),
                None => return Err(format!("environment variable not found: `{var_name}`")),
            },
        }

        last_end = overall.end();
    }

    result.push_str(&line[last_end..]);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_placeholders() {
        let input = "key = \"value\"";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn expands_set_variable() {
        temp_env::with_var("STRIDE_TEST_KEY", Some("sk-123"), || {
            let result = expand_env("api_key = \"{{ env.STRIDE_TEST_KEY }}\"").unwrap();
            assert_eq!(result, "api_key = \"sk-123\"");
        });
    }

    #[test]
    fn missing_variable_errors() {
        temp_env::with_var_unset("STRIDE_MISSING", || {
            let err = expand_env("api_key = \"{{ env.STRIDE_MISSING }}\"").unwrap_err();
            assert!(err.contains("STRIDE_MISSING"));
        });
    }

    #[test]
    fn default_used_when_unset() {
        temp_env::with_var_unset("STRIDE_OPTIONAL", || {
            let result = expand_env("api_key = \"{{ env.STRIDE_OPTIONAL | default(\"\") }}\"").unwrap();
            assert_eq!(result, "api_key = \"\"");
        });
    }

    #[test]
    fn default_ignored_when_set() {
        temp_env::with_var("STRIDE_OPTIONAL2", Some("actual"), || {
            let result = expand_env("key = \"{{ env.STRIDE_OPTIONAL2 | default(\"fallback\") }}\"").unwrap();
            assert_eq!(result, "key = \"actual\"");
        });
    }

    #[test]
    fn comment_lines_skip_expansion() {
        temp_env::with_var_unset("STRIDE_MISSING", || {
            let input = "  # api_key = \"{{ env.STRIDE_MISSING }}\"";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }
}
