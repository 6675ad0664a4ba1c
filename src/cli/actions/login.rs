use crate::{
    api::HttpTransport,
    cli::actions::output,
    config::ClientConfig,
    forms::{LoginController, MemoryView, LOGIN_FORM},
    storage::FileStore,
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct Args {
    pub config: ClientConfig,
    pub email: String,
    pub password: SecretString,
}

/// Fill in the login form, submit it and wait for the redirect.
/// # Errors
/// Returns an error if the HTTP client cannot be built or the login did not succeed.
#[instrument(skip_all)]
pub async fn execute(args: Args) -> Result<()> {
    let transport = Arc::new(HttpTransport::new(&args.config)?);
    let store = Arc::new(FileStore::new(args.config.store_path.clone()));
    let view = Arc::new(MemoryView::with_fields(LOGIN_FORM.field_names()));

    let mut controller = LoginController::attach(view.clone(), view.clone(), transport, store)?;

    controller.input("email", &args.email);
    controller.input("password", args.password.expose_secret());

    let outcome = controller.submit().await;
    debug!("login outcome: {outcome:?}");

    if outcome.is_success() {
        controller.wait_for_navigation().await;
    }
    controller.detach();

    output::print(&view);
    output::status(outcome)
}
