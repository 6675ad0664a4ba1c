use anyhow::Result;
use userforms::cli;

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let action = cli::start()?;

    // Handle the action
    action.execute().await?;

    Ok(())
}
