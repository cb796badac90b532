use faultline_core::{FieldViolation, Locale, RawViolation};
use faultline_i18n::{MessageResolver, format_template};

/// Field errors for the envelope plus the raw fields that had to be dropped
#[derive(Debug, Default)]
pub struct Aggregation {
    pub field_errors: Vec<FieldViolation>,
    /// Raw field names whose label or message resolved to blank text
    pub dropped: Vec<String>,
}

/// Fold raw structural violations into localized field errors
///
/// The field label is looked up as `field.<name>` and falls back to the raw
/// name; the message is looked up from the violation's template and falls
/// back to the template rendered with its own arguments. Input order is
/// kept. Entries whose label or message resolve to blank text are left out
/// of `field_errors` and named in `dropped`; nothing is logged here, the
/// classifier reports them with its single record.
pub fn aggregate_field_errors(resolver: &MessageResolver, violations: &[RawViolation], locale: &Locale) -> Aggregation {
    let mut aggregation = Aggregation {
        field_errors: Vec::with_capacity(violations.len()),
        dropped: Vec::new(),
    };

    for violation in violations {
        let label_key = format!("field.{}", violation.field);
        let label = resolver.resolve_or(&label_key, None, &violation.field, locale);

        let args = violation.arguments.as_deref();
        let fallback = format_template(&violation.template, args.unwrap_or_default())
            .unwrap_or_else(|_| violation.template.clone());
        let message = resolver.resolve_or(&violation.template, args, &fallback, locale);

        match FieldViolation::new(label, violation.rejected_value.clone(), message) {
            Ok(field_error) => aggregation.field_errors.push(field_error),
            Err(_) => aggregation.dropped.push(violation.field.clone()),
        }
    }

    aggregation
}

#[cfg(test)]
mod tests {
    use faultline_i18n::BundleCatalog;
    use serde_json::{Value, json};

    use super::*;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    fn resolver() -> MessageResolver {
        let catalog = BundleCatalog::new(locale("en"))
            .with_messages(
                locale("en"),
                [
                    ("field.email", "Email"),
                    ("error.validation.email.invalid", "Email address is invalid"),
                    ("error.validation.age.invalid", "Age must be between {0} and {1}"),
                ],
            )
            .with_messages(
                locale("de"),
                [
                    ("field.email", "E-Mail"),
                    ("error.validation.email.invalid", "E-Mail-Adresse ist ungültig"),
                ],
            );
        MessageResolver::new(catalog)
    }

    #[test]
    fn preserves_input_order() {
        let violations = [
            RawViolation::new("email", "nope", "error.validation.email.invalid"),
            RawViolation::new("age", 12, "error.validation.age.invalid").with_arguments([18, 100]),
        ];

        let errors = aggregate_field_errors(&resolver(), &violations, &locale("en")).field_errors;

        let fields: Vec<_> = errors.iter().map(FieldViolation::field).collect();
        assert_eq!(fields, ["Email", "age"]);
        assert_eq!(errors[1].message(), "Age must be between 18 and 100");
        assert_eq!(errors[1].rejected_value(), &json!(12));
    }

    #[test]
    fn localizes_label_and_message() {
        let violations = [RawViolation::new("email", "nope", "error.validation.email.invalid")];

        let errors = aggregate_field_errors(&resolver(), &violations, &locale("de-DE")).field_errors;

        assert_eq!(errors[0].field(), "E-Mail");
        assert_eq!(errors[0].message(), "E-Mail-Adresse ist ungültig");
    }

    #[test]
    fn unknown_template_is_rendered_literally() {
        let violations =
            [RawViolation::new("name", Value::Null, "size must be between {0} and {1}").with_arguments([2, 40])];

        let errors = aggregate_field_errors(&resolver(), &violations, &locale("en")).field_errors;

        assert_eq!(errors[0].field(), "name");
        assert_eq!(errors[0].message(), "size must be between 2 and 40");
        assert_eq!(errors[0].rejected_value(), &Value::Null);
    }

    #[test]
    fn blank_entries_are_dropped() {
        let violations = [
            RawViolation::new("", "x", "error.validation.email.invalid"),
            RawViolation::new("phone", "x", "  "),
            RawViolation::new("email", "x", "error.validation.email.invalid"),
        ];

        let aggregation = aggregate_field_errors(&resolver(), &violations, &locale("en"));

        assert_eq!(aggregation.field_errors.len(), 1);
        assert_eq!(aggregation.field_errors[0].field(), "Email");
        assert_eq!(aggregation.dropped, ["", "phone"]);
    }
}
