/// Replace `${ENV_VAR}` placeholders in config string values.
///
/// Unresolvable variables are left as-is.
pub fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

/// Implementation of [`substitute_env`] with a pluggable lookup, so tests do
/// not have to mutate the process environment.
fn substitute_env_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if end > 0 => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => result.push_str(&value),
                    None => {
                        // Leave unresolved placeholder as-is.
                        result.push_str("${");
                        result.push_str(name);
                        result.push('}');
                    },
                }
                rest = &after[end + 1..];
            },
            _ => {
                // Malformed (no closing brace or empty name) — emit literal.
                result.push_str("${");
                rest = after;
            },
        }
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_var() {
        let lookup = |name: &str| (name == "NIMBRIDGE_TEST_VAR").then(|| "nimUi".to_owned());
        assert_eq!(
            substitute_env_with("binding=${NIMBRIDGE_TEST_VAR}", lookup),
            "binding=nimUi"
        );
    }

    #[test]
    fn leaves_unknown_var() {
        let lookup = |_: &str| None;
        assert_eq!(
            substitute_env_with("${NIMBRIDGE_NONEXISTENT_XYZ}", lookup),
            "${NIMBRIDGE_NONEXISTENT_XYZ}"
        );
    }

    #[test]
    fn handles_multiple_placeholders() {
        let lookup = |name: &str| Some(name.to_lowercase());
        assert_eq!(substitute_env_with("${A}-${B}", lookup), "a-b");
    }

    #[test]
    fn no_placeholders() {
        assert_eq!(substitute_env("plain text"), "plain text");
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        let lookup = |_: &str| Some("x".to_owned());
        assert_eq!(substitute_env_with("tail ${OPEN", lookup), "tail ${OPEN");
    }
}
