use crate::{
    api::HttpTransport,
    cli::actions::output,
    config::ClientConfig,
    forms::{MemoryView, RegistrationController, REGISTRATION_FORM},
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct Args {
    pub config: ClientConfig,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: SecretString,
}

/// Fill in the registration form, submit it and wait for the redirect.
/// # Errors
/// Returns an error if the HTTP client cannot be built or the registration did not succeed.
#[instrument(skip_all)]
pub async fn execute(args: Args) -> Result<()> {
    let transport = Arc::new(HttpTransport::new(&args.config)?);
    let view = Arc::new(MemoryView::with_fields(REGISTRATION_FORM.field_names()));

    let mut controller = RegistrationController::attach(view.clone(), view.clone(), transport)?;

    for (field, value) in [
        ("first_name", args.first_name.as_str()),
        ("last_name", args.last_name.as_str()),
        ("email", args.email.as_str()),
        ("password", args.password.expose_secret()),
    ] {
        controller.input(field, value);
        controller.blur(field);
    }

    let outcome = controller.submit().await;
    debug!("registration outcome: {outcome:?}");

    if outcome.is_success() {
        controller.wait_for_navigation().await;
    }
    controller.detach();

    output::print(&view);
    output::status(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::REGISTER_PATH;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn args(server: &MockServer, first_name: &str) -> Result<Args> {
        Ok(Args {
            config: ClientConfig::new(&server.uri())?.with_timeout_secs(5),
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: SecretString::from("secret1".to_string()),
        })
    }

    #[tokio::test]
    async fn duplicate_email_is_an_error() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind to localhost");
            return Ok(());
        }

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REGISTER_PATH))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"status": 400, "message": "Email already exists"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        assert!(execute(args(&server, "Jane")?).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_rejected_locally() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind to localhost");
            return Ok(());
        }

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        assert!(execute(args(&server, "   ")?).await.is_err());
        Ok(())
    }
}
