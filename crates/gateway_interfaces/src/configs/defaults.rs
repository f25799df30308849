impl Default for super::settings::RedirectPageSettings {
    fn default() -> Self {
        Self {
            title: "Redirecting...".into(),
            message: "Redirecting to payment page...".into(),
            submit_label: "Continue".into(),
            auto_submit: true,
        }
    }
}
