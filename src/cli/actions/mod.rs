pub mod login;
pub mod register;

mod output;
mod run;

#[derive(Debug)]
pub enum Action {
    Login(login::Args),
    Register(register::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the form could not be submitted or the submission failed.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
