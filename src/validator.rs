use validator::{Validate, ValidationErrors};

fn format_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .collect()
}

/// Validates a submitted form, returning the message to flash on failure.
///
/// Forms declare one user-facing message per rule; when several fields fail, the
/// first by field name is reported.
pub fn check_form<T: Validate>(form: &T) -> Result<(), String> {
    form.validate().map_err(|errors| {
        format_errors(&errors)
            .into_iter()
            .next()
            .unwrap_or_else(|| "Invalid form".to_string())
    })
}
