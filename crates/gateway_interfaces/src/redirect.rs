//! Turning a redirect outcome into an HTTP response.
//!
//! Resolution happens in two steps. [`resolve_redirect_form`] validates what the gateway
//! response reports and produces a [`RedirectForm`]; [`build_redirection_response`] then
//! materializes it either as a `302 Found` or as an auto-submitting HTML form. All HTML
//! is rendered through `maud`, which escapes `&`, `<`, `>` and `"` in every interpolated
//! value.

use std::{io, str::FromStr};

use error_stack::{report, ResultExt};
use indexmap::IndexMap;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Serialize;
use tracing::instrument;

use crate::{
    configs::settings::RedirectPageSettings,
    errors::{CustomResult, RedirectError},
    logger,
    response::PaymentResponse,
};

/// Ordered fields posted to the redirect URL.
pub type RedirectData = IndexMap<String, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum RedirectMethod {
    Get,
    Post,
}

/// A resolved redirect action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum RedirectForm {
    /// Plain redirect; `endpoint` already carries every parameter the gateway needs.
    Redirect { endpoint: String },
    /// Auto-submitting POST form.
    Form {
        endpoint: String,
        form_fields: RedirectData,
    },
}

impl RedirectForm {
    pub fn method(&self) -> RedirectMethod {
        match self {
            Self::Redirect { .. } => RedirectMethod::Get,
            Self::Form { .. } => RedirectMethod::Post,
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            Self::Redirect { endpoint } | Self::Form { endpoint, .. } => endpoint,
        }
    }
}

/// Validates the redirect reported by `response`.
///
/// Checks run in a fixed order, so the reported error is deterministic: redirect flag,
/// then an empty URL, then the method.
#[instrument(skip_all)]
pub fn resolve_redirect_form<R>(response: &R) -> CustomResult<RedirectForm, RedirectError>
where
    R: PaymentResponse + ?Sized,
{
    if !response.is_redirect() {
        return Err(report!(RedirectError::RedirectNotSupported));
    }

    let endpoint = response
        .get_redirect_url()
        .filter(|url| !url.is_empty())
        .ok_or_else(|| report!(RedirectError::EmptyRedirectUrl))?;

    let method = response.get_redirect_method();
    let form = match RedirectMethod::from_str(&method) {
        Ok(RedirectMethod::Get) => RedirectForm::Redirect { endpoint },
        Ok(RedirectMethod::Post) => RedirectForm::Form {
            endpoint,
            form_fields: response.get_redirect_data(),
        },
        Err(_) => return Err(report!(RedirectError::InvalidRedirectMethod { method })),
    };

    logger::debug!(redirect_method = %form.method(), "resolved redirect form");
    Ok(form)
}

/// HTTP response sending the customer on to the gateway.
#[derive(Debug)]
pub struct RedirectHttpResponse(http::Response<String>);

impl RedirectHttpResponse {
    pub fn status_code(&self) -> http::StatusCode {
        self.0.status()
    }

    /// The `Location` header of a GET redirect, exactly as the gateway reported it.
    pub fn target_url(&self) -> Option<&str> {
        self.0
            .headers()
            .get(http::header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    pub fn headers(&self) -> &http::HeaderMap {
        self.0.headers()
    }

    pub fn content(&self) -> &str {
        self.0.body()
    }

    pub fn into_inner(self) -> http::Response<String> {
        self.0
    }

    /// Writes the status line, headers and body to `out` as an HTTP/1.1 message.
    pub fn send(&self, out: &mut dyn io::Write) -> io::Result<()> {
        let status = self.status_code();
        write!(
            out,
            "HTTP/1.1 {} {}\r\n",
            status.as_str(),
            status.canonical_reason().unwrap_or_default()
        )?;
        for (name, value) in self.headers() {
            write!(out, "{}: ", name.as_str())?;
            out.write_all(value.as_bytes())?;
            out.write_all(b"\r\n")?;
        }
        write!(out, "content-length: {}\r\n\r\n", self.content().len())?;
        out.write_all(self.content().as_bytes())?;
        out.flush()
    }
}

#[cfg(feature = "actix-web")]
impl From<RedirectHttpResponse> for actix_web::HttpResponse {
    fn from(response: RedirectHttpResponse) -> Self {
        let (parts, body) = response.into_inner().into_parts();
        let mut builder = if parts.status == http::StatusCode::FOUND {
            Self::Found()
        } else {
            Self::Ok()
        };
        for (name, value) in &parts.headers {
            if let Ok(value) = value.to_str() {
                builder.append_header((name.as_str(), value));
            }
        }
        builder.body(body)
    }
}

/// Materializes `form` into an HTTP response.
#[instrument(skip_all)]
pub fn build_redirection_response(
    form: &RedirectForm,
    settings: &RedirectPageSettings,
) -> CustomResult<RedirectHttpResponse, RedirectError> {
    let response = match form {
        RedirectForm::Redirect { endpoint } => http::Response::builder()
            .status(http::StatusCode::FOUND)
            .header(http::header::LOCATION, endpoint.as_str())
            .header(http::header::CONTENT_TYPE, mime::TEXT_HTML_UTF_8.as_ref())
            .body(build_redirect_page(endpoint).into_string()),
        RedirectForm::Form {
            endpoint,
            form_fields,
        } => http::Response::builder()
            .status(http::StatusCode::OK)
            .header(http::header::CONTENT_TYPE, mime::TEXT_HTML_UTF_8.as_ref())
            .body(build_redirection_form(endpoint, form_fields, settings).into_string()),
    }
    .change_context(RedirectError::ResponseConstructionFailed)
    .attach_printable_lazy(|| format!("redirect method: {}", form.method()))?;

    logger::debug!(status = %response.status(), "built redirect response");
    Ok(RedirectHttpResponse(response))
}

/// Fallback page sent along with a `302 Found`, for clients that do not follow redirects.
fn build_redirect_page(endpoint: &str) -> Markup {
    // The refresh target sits inside single quotes, which maud leaves unescaped.
    let refresh = format!("0;url='{}'", endpoint.replace('\'', "%27"));

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content=(refresh);
                title { "Redirecting to " (endpoint) }
            }
            body {
                "Redirecting to " a href=(endpoint) { (endpoint) } "."
            }
        }
    }
}

/// Page that posts `form_fields` to `endpoint` as soon as it loads.
pub fn build_redirection_form(
    endpoint: &str,
    form_fields: &RedirectData,
    settings: &RedirectPageSettings,
) -> Markup {
    let on_load = settings
        .auto_submit
        .then_some("document.forms[0].submit();");

    html! {
        (DOCTYPE)
        html {
            head {
                meta http-equiv="Content-Type" content="text/html; charset=utf-8";
                title { (settings.title) }
            }
            body onload=[on_load] {
                form action=(endpoint) method="post" {
                    p { (settings.message) }
                    p {
                        @for (name, value) in form_fields {
                            (hidden_input(name, value))
                        }
                        input type="submit" value=(settings.submit_label);
                    }
                }
            }
        }
    }
}

/// Hidden form field, closed with ` />`. Name and value go through maud's escaping.
fn hidden_input(name: &str, value: &str) -> PreEscaped<String> {
    PreEscaped(format!(
        r#"<input type="hidden" name="{}" value="{}" />"#,
        html! { (name) }.into_string(),
        html! { (value) }.into_string(),
    ))
}
