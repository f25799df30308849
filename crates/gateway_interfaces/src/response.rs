//! The response contract shared by every gateway.
//!
//! A gateway response answers the same questions regardless of the gateway behind it:
//! did the payment succeed, is it pending, does the customer have to be sent elsewhere.
//! Redirecting is a separate capability ([`RedirectResponse`]) that a response opts into
//! through [`PaymentResponse::as_redirect_response`].

use std::{fmt, io, sync::Arc};

use error_stack::{report, ResultExt};
use gateway_common::{types::FloatMajorUnit, Parameters};
use serde_json::Value;

use crate::{
    configs::settings::RedirectPageSettings,
    errors::{CustomResult, RedirectError},
    redirect::{self, RedirectData, RedirectHttpResponse, RedirectMethod},
};

/// The request a response was produced for.
pub trait PaymentRequest: fmt::Debug {
    /// Parameters the request was sent with.
    fn get_parameters(&self) -> Parameters;
}

/// Outcome derived from a response's flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ResponseState {
    Successful,
    Pending,
    Redirect,
    TransparentRedirect,
    Cancelled,
    Failed,
}

pub trait PaymentResponse {
    /// The request that initiated this response.
    fn get_request(&self) -> &dyn PaymentRequest;

    /// Raw, gateway specific response data.
    fn get_data(&self) -> Option<&Value>;

    fn is_successful(&self) -> bool;

    fn is_pending(&self) -> bool {
        false
    }

    fn is_redirect(&self) -> bool {
        false
    }

    /// Whether the gateway expects the customer's browser to post payment details to
    /// it directly.
    fn is_transparent_redirect(&self) -> bool {
        false
    }

    fn is_cancelled(&self) -> bool {
        false
    }

    /// Response message from the payment gateway.
    fn get_message(&self) -> Option<String> {
        None
    }

    /// Response code from the payment gateway.
    fn get_code(&self) -> Option<String> {
        None
    }

    /// Gateway reference identifying this transaction.
    fn get_transaction_reference(&self) -> Option<String> {
        None
    }

    /// Merchant side transaction identifier, as echoed by the gateway.
    fn get_transaction_id(&self) -> Option<String> {
        None
    }

    fn get_amount(&self) -> Option<FloatMajorUnit> {
        None
    }

    /// Gateway specific status string, e.g. `settled`.
    fn get_status(&self) -> Option<String> {
        None
    }

    fn get_redirect_url(&self) -> Option<String> {
        None
    }

    /// Method to use for the redirect. Kept as a string so that gateways reporting an
    /// unsupported method surface as an error when the redirect is resolved.
    fn get_redirect_method(&self) -> String {
        RedirectMethod::Get.to_string()
    }

    /// Fields to post to the redirect URL.
    fn get_redirect_data(&self) -> RedirectData {
        RedirectData::new()
    }

    /// The redirect capability of this response, if it has one.
    fn as_redirect_response(&self) -> Option<&dyn RedirectResponse> {
        None
    }

    /// Collapses the flags into a single state, checked in declaration order of
    /// [`ResponseState`].
    fn state(&self) -> ResponseState {
        if self.is_successful() {
            ResponseState::Successful
        } else if self.is_pending() {
            ResponseState::Pending
        } else if self.is_redirect() {
            ResponseState::Redirect
        } else if self.is_transparent_redirect() {
            ResponseState::TransparentRedirect
        } else if self.is_cancelled() {
            ResponseState::Cancelled
        } else {
            ResponseState::Failed
        }
    }

    /// Builds the HTTP response that sends the customer to the gateway, using the
    /// default redirect page settings.
    fn get_redirect_response(&self) -> CustomResult<RedirectHttpResponse, RedirectError> {
        self.get_redirect_response_with(&RedirectPageSettings::default())
    }

    fn get_redirect_response_with(
        &self,
        settings: &RedirectPageSettings,
    ) -> CustomResult<RedirectHttpResponse, RedirectError> {
        let redirect_response = self
            .as_redirect_response()
            .ok_or_else(|| report!(RedirectError::RedirectNotSupported))?;
        let form = redirect::resolve_redirect_form(redirect_response)?;

        redirect::build_redirection_response(&form, settings)
    }

    /// Writes the redirect response to `out`.
    fn redirect(&self, out: &mut dyn io::Write) -> CustomResult<(), RedirectError> {
        self.get_redirect_response()?
            .send(out)
            .change_context(RedirectError::ResponseEmissionFailed)
    }
}

/// Capability of responses that may send the customer to a third party page.
///
/// Implementors only opt in; resolving and validating the redirect always goes through
/// [`redirect::resolve_redirect_form`].
pub trait RedirectResponse: PaymentResponse {}

/// Response holding only the request and the raw data.
///
/// Every flag is false and every optional field is absent; gateway responses embed it
/// and override what their data tells them.
#[derive(Clone, Debug)]
pub struct BaseResponse {
    request: Arc<dyn PaymentRequest>,
    data: Option<Value>,
}

impl BaseResponse {
    pub fn new(request: Arc<dyn PaymentRequest>, data: Option<Value>) -> Self {
        Self { request, data }
    }

    /// Shared handle to the originating request.
    pub fn request(&self) -> &Arc<dyn PaymentRequest> {
        &self.request
    }
}

impl PaymentResponse for BaseResponse {
    fn get_request(&self) -> &dyn PaymentRequest {
        self.request.as_ref()
    }

    fn get_data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    fn is_successful(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[derive(Debug)]
    struct EmptyRequest;

    impl PaymentRequest for EmptyRequest {
        fn get_parameters(&self) -> Parameters {
            Parameters::new()
        }
    }

    fn base_response(data: Option<Value>) -> BaseResponse {
        BaseResponse::new(Arc::new(EmptyRequest), data)
    }

    struct FlaggedResponse {
        base: BaseResponse,
        successful: bool,
        pending: bool,
        redirect: bool,
        cancelled: bool,
    }

    impl PaymentResponse for FlaggedResponse {
        fn get_request(&self) -> &dyn PaymentRequest {
            self.base.get_request()
        }

        fn get_data(&self) -> Option<&Value> {
            self.base.get_data()
        }

        fn is_successful(&self) -> bool {
            self.successful
        }

        fn is_pending(&self) -> bool {
            self.pending
        }

        fn is_redirect(&self) -> bool {
            self.redirect
        }

        fn is_cancelled(&self) -> bool {
            self.cancelled
        }
    }

    fn flagged(
        successful: bool,
        pending: bool,
        redirect: bool,
        cancelled: bool,
    ) -> FlaggedResponse {
        FlaggedResponse {
            base: base_response(None),
            successful,
            pending,
            redirect,
            cancelled,
        }
    }

    #[test]
    fn construct() {
        let request: Arc<dyn PaymentRequest> = Arc::new(EmptyRequest);
        let response = BaseResponse::new(Arc::clone(&request), Some(json!({ "foo": "bar" })));

        assert!(Arc::ptr_eq(response.request(), &request));
        assert_eq!(response.get_data(), Some(&json!({ "foo": "bar" })));
        assert!(response.get_request().get_parameters().is_empty());
    }

    #[test]
    fn default_methods() {
        let response = base_response(None);

        assert!(!response.is_successful());
        assert!(!response.is_pending());
        assert!(!response.is_redirect());
        assert!(!response.is_transparent_redirect());
        assert!(!response.is_cancelled());
        assert_eq!(response.get_data(), None);
        assert_eq!(response.get_transaction_reference(), None);
        assert_eq!(response.get_transaction_id(), None);
        assert_eq!(response.get_message(), None);
        assert_eq!(response.get_code(), None);
        assert_eq!(response.get_amount(), None);
        assert_eq!(response.get_status(), None);
        assert_eq!(response.get_redirect_url(), None);
        assert_eq!(response.get_redirect_method(), "GET");
        assert!(response.get_redirect_data().is_empty());
        assert_eq!(response.state(), ResponseState::Failed);
    }

    #[test]
    fn redirect_not_implemented() {
        let error = base_response(None).get_redirect_response().unwrap_err();
        assert_eq!(
            error.current_context().to_string(),
            "This response does not support redirection."
        );
    }

    #[test]
    fn redirect_flag_without_capability() {
        let response = flagged(false, false, true, false);
        assert_eq!(
            response.get_redirect_response().unwrap_err().current_context(),
            &RedirectError::RedirectNotSupported
        );
    }

    #[test]
    fn state_precedence() {
        assert_eq!(flagged(true, true, true, true).state(), ResponseState::Successful);
        assert_eq!(flagged(false, true, true, false).state(), ResponseState::Pending);
        assert_eq!(flagged(false, false, true, true).state(), ResponseState::Redirect);
        assert_eq!(flagged(false, false, false, true).state(), ResponseState::Cancelled);
        assert_eq!(flagged(false, false, false, false).state(), ResponseState::Failed);
        assert_eq!(ResponseState::TransparentRedirect.to_string(), "transparent_redirect");
    }

    impl RedirectResponse for FlaggedResponse {}

    struct CapableResponse(FlaggedResponse);

    impl PaymentResponse for CapableResponse {
        fn get_request(&self) -> &dyn PaymentRequest {
            self.0.get_request()
        }

        fn get_data(&self) -> Option<&Value> {
            self.0.get_data()
        }

        fn is_successful(&self) -> bool {
            self.0.is_successful()
        }

        fn is_redirect(&self) -> bool {
            self.0.is_redirect()
        }

        fn as_redirect_response(&self) -> Option<&dyn RedirectResponse> {
            Some(&self.0)
        }
    }

    #[test]
    fn capability_redirects_go_through_resolver() {
        let response = CapableResponse(flagged(false, false, true, false));

        assert_eq!(
            response.get_redirect_response().unwrap_err().current_context(),
            &RedirectError::EmptyRedirectUrl
        );
    }
}
