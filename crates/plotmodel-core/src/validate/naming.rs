use crate::{MAX_FIELD_NAME_LEN, MAX_MODEL_NAME_LEN};

/// Model names: non-empty ASCII identifiers starting with a letter.
pub(crate) fn validate_model_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("model name is empty".to_string());
    }
    if name.len() > MAX_MODEL_NAME_LEN {
        return Err(format!(
            "model name '{name}' exceeds max length {MAX_MODEL_NAME_LEN}"
        ));
    }
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(format!("model name '{name}' must start with an ASCII letter"));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!(
            "model name '{name}' may only contain ASCII letters, digits and '_'"
        ));
    }

    Ok(())
}

/// Field names: lower snake_case, within the maximum length.
pub(crate) fn validate_field_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("field name is empty".to_string());
    }
    if name.len() > MAX_FIELD_NAME_LEN {
        return Err(format!(
            "field name '{name}' exceeds max length {MAX_FIELD_NAME_LEN}"
        ));
    }
    validate_snake(name).map_err(|e| format!("field name '{name}' {e}"))
}

/// Include prefixes: empty (no prefix) or lower snake_case.
pub(crate) fn validate_prefix(prefix: &str) -> Result<(), String> {
    if prefix.is_empty() {
        return Ok(());
    }

    validate_snake(prefix).map_err(|e| format!("include prefix '{prefix}' {e}"))
}

fn validate_snake(ident: &str) -> Result<(), &'static str> {
    if !ident.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err("must start with a lowercase ASCII letter");
    }
    if !ident
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err("may only contain lowercase ASCII letters, digits and '_'");
    }
    if ident.ends_with('_') || ident.contains("__") {
        return Err("must not end with '_' or contain '__'");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plot_style_identifiers() {
        assert!(validate_model_name("GuideRenderer").is_ok());
        assert!(validate_field_name("x_range_name").is_ok());
        assert!(validate_field_name("line_dash_offset").is_ok());
        assert!(validate_prefix("").is_ok());
        assert!(validate_prefix("band").is_ok());
    }

    #[test]
    fn rejects_malformed_identifiers() {
        assert!(validate_model_name("").is_err(), "empty model names should fail");
        assert!(validate_model_name("9Grid").is_err());
        assert!(validate_model_name("Grid-Lines").is_err());
        assert!(validate_field_name("Dimension").is_err());
        assert!(validate_field_name("grid__color").is_err());
        assert!(validate_field_name("color_").is_err());
        assert!(validate_prefix("Grid").is_err());
    }

    #[test]
    fn rejects_overlong_identifiers() {
        let long = "a".repeat(MAX_FIELD_NAME_LEN + 1);
        assert!(validate_field_name(&long).is_err());
        assert!(validate_field_name(&long[..MAX_FIELD_NAME_LEN]).is_ok());
    }
}
