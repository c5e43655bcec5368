use homebook_dialogue::handle_request;
use std::io::Read;

use super::init_common_components;

/// Input parameters for the Request command strategy.
#[derive(Debug, Clone)]
pub struct RequestInput {
    /// Raw JSON body; read from stdin when absent
    pub body: Option<String>,
}

/// Strategy that feeds one wire-format request through the boundary.
///
/// Prints the JSON response on success, or the status code and error body
/// the HTTP layer would return.
#[derive(Debug, Clone, Copy)]
pub struct RequestStrategy;

impl super::CommandStrategy for RequestStrategy {
    type Input = RequestInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let body = match input.body {
            Some(body) => body,
            None => {
                let mut body = String::new();
                std::io::stdin().read_to_string(&mut body)?;
                body
            }
        };

        let common = init_common_components()?;
        match handle_request(&common.assistant, &body).await {
            Ok(response) => {
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
            Err(e) => {
                println!("{} {}", e.status_code(), e.body());
            }
        }
        Ok(())
    }
}
