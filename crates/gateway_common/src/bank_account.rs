//! Bank account details used for ACH style payments.

use std::{fmt, str::FromStr};

use error_stack::report;
use serde_json::Value;

use crate::{
    errors::{CustomResult, ValidationError},
    parameters::{string_value, Field, ParameterBag, Parameterized, Parameters},
};

const ACCOUNT_NUMBER: &str = "accountNumber";
const ROUTING_NUMBER: &str = "routingNumber";
const ACCOUNT_TYPE: &str = "type";

/// Character used by [`BankAccount::get_account_number_masked`].
pub const DEFAULT_MASK: char = 'X';

/// Supported bank account types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BankAccountType {
    /// Checking account
    Checking,
    /// Savings account
    Savings,
}

/// Bank account details.
///
/// Recognised parameters are `accountNumber`, `routingNumber` and `type`; anything else
/// passed at construction is ignored.
///
/// ```
/// use gateway_common::{BankAccount, Parameters};
///
/// let parameters: Parameters = serde_json::from_value(serde_json::json!({
///     "accountNumber": "112233",
///     "routingNumber": "44556666",
///     "type": "checking",
/// }))
/// .unwrap();
///
/// let bank = BankAccount::new(Some(parameters));
/// assert!(bank.validate().is_ok());
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct BankAccount {
    parameters: ParameterBag,
}

impl BankAccount {
    /// Creates a bank account from the given parameters.
    pub fn new(parameters: Option<Parameters>) -> Self {
        let mut bank_account = Self::default();
        bank_account.initialize(parameters);
        bank_account
    }

    /// Checks the required fields, in order, then the account type.
    pub fn validate(&self) -> CustomResult<(), ValidationError> {
        let required = [
            (ACCOUNT_NUMBER, "bank account number"),
            (ROUTING_NUMBER, "bank routing number"),
            (ACCOUNT_TYPE, "bank account type"),
        ];

        if let Some((_, label)) = required
            .iter()
            .find(|(key, _)| self.parameters.is_missing(key))
        {
            return Err(report!(ValidationError::InvalidBankAccount {
                message: format!("The {label} is required"),
            }));
        }

        if self.account_type().is_none() {
            let provided = self
                .get_parameter(ACCOUNT_TYPE)
                .cloned()
                .map(string_value)
                .unwrap_or_default();
            return Err(report!(ValidationError::InvalidBankAccount {
                message: format!(
                    "Account type must be savings or checking, provided type: {provided}"
                ),
            }));
        }

        Ok(())
    }

    /// Stored account number, digits only.
    pub fn get_account_number(&self) -> Option<&str> {
        self.parameters.get_str(ACCOUNT_NUMBER)
    }

    /// Stores the account number with every non-digit character removed, so values such
    /// as `"4444-3333 2222 1111"` are safe to pass in.
    pub fn set_account_number(&mut self, value: impl AsRef<str>) -> &mut Self {
        let digits: String = value
            .as_ref()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        self.set_parameter(ACCOUNT_NUMBER, digits)
    }

    /// Last four digits of the account number, or `None` when fewer than four are stored.
    pub fn get_account_number_last_four(&self) -> Option<&str> {
        let number = self.get_account_number()?;
        let start = number.len().checked_sub(4)?;
        number.get(start..)
    }

    /// Account number with everything but the last four digits replaced by `X`.
    pub fn get_account_number_masked(&self) -> String {
        self.get_account_number_masked_with(DEFAULT_MASK)
    }

    /// Account number with everything but the last four digits replaced by `mask`.
    ///
    /// Numbers of four digits or fewer get no mask characters.
    pub fn get_account_number_masked_with(&self, mask: char) -> String {
        let length = self.get_account_number().map_or(0, str::len);
        let mut masked: String = std::iter::repeat(mask)
            .take(length.saturating_sub(4))
            .collect();
        masked.push_str(self.get_account_number_last_four().unwrap_or_default());
        masked
    }

    /// Stored routing number.
    pub fn get_routing_number(&self) -> Option<&str> {
        self.parameters.get_str(ROUTING_NUMBER)
    }

    /// Sets the routing number.
    pub fn set_routing_number(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_parameter(ROUTING_NUMBER, value.into())
    }

    /// Stored account type, as provided.
    pub fn get_type(&self) -> Option<&str> {
        self.parameters.get_str(ACCOUNT_TYPE)
    }

    /// Sets the account type. Any string is accepted here; [`Self::validate`] rejects
    /// unsupported types.
    pub fn set_type(&mut self, value: impl Into<String>) -> &mut Self {
        self.set_parameter(ACCOUNT_TYPE, value.into())
    }

    /// Stored account type when it is one of the supported types.
    pub fn account_type(&self) -> Option<BankAccountType> {
        self.get_type()
            .and_then(|account_type| BankAccountType::from_str(account_type).ok())
    }
}

impl Parameterized for BankAccount {
    const FIELDS: &'static [Field<Self>] = &[
        Field {
            key: ACCOUNT_NUMBER,
            apply: |bank_account, value| {
                bank_account.set_account_number(string_value(value));
            },
        },
        Field {
            key: ROUTING_NUMBER,
            apply: |bank_account, value| {
                bank_account.set_routing_number(string_value(value));
            },
        },
        Field {
            key: ACCOUNT_TYPE,
            apply: |bank_account, value| {
                bank_account.set_type(string_value(value));
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

impl From<Parameters> for BankAccount {
    fn from(parameters: Parameters) -> Self {
        Self::new(Some(parameters))
    }
}

// Account numbers only ever leave through Debug in masked form.
impl fmt::Debug for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BankAccount")
            .field("account_number", &self.get_account_number_masked_with('*'))
            .field("routing_number", &self.get_routing_number())
            .field(
                "type",
                &self.get_parameter(ACCOUNT_TYPE).unwrap_or(&Value::Null),
            )
            .finish()
    }
}
