//! Form payloads and field-level validation.
//!
//! Each form deserializes from an urlencoded POST body and validates into a
//! list of field errors. Handlers re-render the page with the errors and the
//! submitted values when the list is non-empty.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn require(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    max_len: usize,
) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError::new(field, "This field is required"));
    } else if value.chars().count() > max_len {
        errors.push(FieldError::new(
            field,
            format!("Must be at most {max_len} characters"),
        ));
    }
}

fn check_email(errors: &mut Vec<FieldError>, email: &str) {
    require(errors, "email", email, 254);
    let trimmed = email.trim();
    if !trimmed.is_empty() && (!trimmed.contains('@') || trimmed.starts_with('@')) {
        errors.push(FieldError::new("email", "Enter a valid email address"));
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
}

impl SignupForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_email(&mut errors, &self.email);
        if self.password.chars().count() < 8 {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 8 characters",
            ));
        }
        if self.password != self.password_confirm {
            errors.push(FieldError::new(
                "password_confirm",
                "Passwords do not match",
            ));
        }
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "email", &self.email, 254);
        require(&mut errors, "password", &self.password, 128);
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserEditForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl UserEditForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_email(&mut errors, &self.email);
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressForm {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub name_for_engraving: String,
    #[serde(default)]
    pub phone: String,
}

impl AddressForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "city", &self.city, 50);
        require(&mut errors, "street", &self.street, 100);
        require(&mut errors, "first_name", &self.first_name, 30);
        require(&mut errors, "last_name", &self.last_name, 30);
        require(&mut errors, "name_for_engraving", &self.name_for_engraving, 30);
        require(&mut errors, "phone", &self.phone, 20);

        let phone = self.phone.trim();
        let valid_phone = !phone.is_empty()
            && phone
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' '));
        if !phone.is_empty() && !valid_phone {
            errors.push(FieldError::new("phone", "Enter a valid phone number"));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn signup_rejects_bad_email_and_short_password() {
        let form = SignupForm {
            email: "not-an-email".into(),
            password: "short".into(),
            password_confirm: "short".into(),
            ..Default::default()
        };
        let errors = form.validate();
        assert!(fields(&errors).contains(&"email"));
        assert!(fields(&errors).contains(&"password"));
    }

    #[test]
    fn signup_rejects_password_mismatch() {
        let form = SignupForm {
            email: "rider@example.com".into(),
            password: "correct-horse".into(),
            password_confirm: "battery-staple".into(),
            ..Default::default()
        };
        assert_eq!(fields(&form.validate()), vec!["password_confirm"]);
    }

    #[test]
    fn signup_accepts_valid_input() {
        let form = SignupForm {
            email: "rider@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Rider".into(),
            password: "correct-horse".into(),
            password_confirm: "correct-horse".into(),
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn address_requires_every_field() {
        let errors = AddressForm::default().validate();
        let got = fields(&errors);
        for field in [
            "city",
            "street",
            "first_name",
            "last_name",
            "name_for_engraving",
            "phone",
        ] {
            assert!(got.contains(&field), "missing error for {field}");
        }
    }

    #[test]
    fn address_rejects_non_numeric_phone() {
        let form = AddressForm {
            city: "Sofia".into(),
            street: "1 Vitosha Blvd".into(),
            first_name: "Ada".into(),
            last_name: "Rider".into(),
            name_for_engraving: "Ada".into(),
            phone: "call me".into(),
        };
        assert_eq!(fields(&form.validate()), vec!["phone"]);
    }

    #[test]
    fn address_rejects_overlong_city() {
        let form = AddressForm {
            city: "x".repeat(51),
            street: "1 Vitosha Blvd".into(),
            first_name: "Ada".into(),
            last_name: "Rider".into(),
            name_for_engraving: "Ada".into(),
            phone: "+359 888 123".into(),
        };
        assert_eq!(fields(&form.validate()), vec!["city"]);
    }
}
