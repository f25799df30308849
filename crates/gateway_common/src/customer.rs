//! Customer details passed along with a payment.

use error_stack::report;

use crate::{
    errors::{CustomResult, ValidationError},
    parameters::{string_value, Field, ParameterBag, Parameterized, Parameters},
};

const FIRST_NAME: &str = "firstName";
const LAST_NAME: &str = "lastName";
const EMAIL: &str = "email";
const GATEWAY_ID: &str = "gatewayId";

/// Customer details.
///
/// Recognised parameters are `firstName`, `lastName`, `email` and `gatewayId`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Customer {
    parameters: ParameterBag,
}

impl Customer {
    /// Creates a customer from the given parameters, ignoring unknown keys.
    pub fn new(parameters: Option<Parameters>) -> Self {
        let mut customer = Self::default();
        customer.initialize(parameters);
        customer
    }

    /// Checks that both first and last name are present.
    pub fn validate(&self) -> CustomResult<(), ValidationError> {
        let required = [
            (FIRST_NAME, "customer first name"),
            (LAST_NAME, "customer last name"),
        ];

        match required
            .iter()
            .find(|(key, _)| self.parameters.is_missing(key))
        {
            Some((_, label)) => Err(report!(ValidationError::InvalidCustomer {
                message: format!("The {label} is required"),
            })),
            None => Ok(()),
        }
    }

    pub fn get_first_name(&self) -> Option<&str> {
        self.parameters.get_str(FIRST_NAME)
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_parameter(FIRST_NAME, value.into())
    }

    pub fn get_last_name(&self) -> Option<&str> {
        self.parameters.get_str(LAST_NAME)
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_parameter(LAST_NAME, value.into())
    }

    pub fn get_email(&self) -> Option<&str> {
        self.parameters.get_str(EMAIL)
    }

    pub fn set_email(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_parameter(EMAIL, value.into())
    }

    /// Identifier the gateway assigned to this customer.
    pub fn get_gateway_id(&self) -> Option<&str> {
        self.parameters.get_str(GATEWAY_ID)
    }

    pub fn set_gateway_id(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_parameter(GATEWAY_ID, value.into())
    }
}

impl Parameterized for Customer {
    const FIELDS: &'static [Field<Self>] = &[
        Field {
            key: FIRST_NAME,
            apply: |customer, value| {
                customer.set_first_name(string_value(value));
            },
        },
        Field {
            key: LAST_NAME,
            apply: |customer, value| {
                customer.set_last_name(string_value(value));
            },
        },
        Field {
            key: EMAIL,
            apply: |customer, value| {
                customer.set_email(string_value(value));
            },
        },
        Field {
            key: GATEWAY_ID,
            apply: |customer, value| {
                customer.set_gateway_id(string_value(value));
            },
        },
    ];

    fn parameters(&self) -> &ParameterBag {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut ParameterBag {
        &mut self.parameters
    }
}

impl From<Parameters> for Customer {
    fn from(parameters: Parameters) -> Self {
        Self::new(Some(parameters))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn construct_with_parameters() {
        let parameters: Parameters = serde_json::from_value(json!({
            "firstName": "Bobby",
            "lastName": "Tables",
            "email": "bobbytables@test.com",
            "gatewayId": "cus_123",
            "phone": "ignored",
        }))
        .unwrap();
        let customer = Customer::new(Some(parameters));

        assert_eq!(customer.get_first_name(), Some("Bobby"));
        assert_eq!(customer.get_last_name(), Some("Tables"));
        assert_eq!(customer.get_email(), Some("bobbytables@test.com"));
        assert_eq!(customer.get_gateway_id(), Some("cus_123"));
        assert_eq!(customer.get_parameter("phone"), None);
    }

    #[test]
    fn validate_requires_first_name() {
        let mut customer = Customer::default();
        customer.set_last_name("Tables");
        assert_eq!(
            customer.validate().unwrap_err().current_context().to_string(),
            "The customer first name is required"
        );
    }

    #[test]
    fn validate_requires_last_name() {
        let mut customer = Customer::default();
        customer.set_first_name("Bobby");
        assert_eq!(
            customer.validate().unwrap_err().current_context().to_string(),
            "The customer last name is required"
        );
    }

    #[test]
    fn validate_ignores_email_format() {
        let mut customer = Customer::default();
        customer
            .set_first_name("Bobby")
            .set_last_name("Tables")
            .set_email("not an email");
        assert!(customer.validate().is_ok());
    }
}
