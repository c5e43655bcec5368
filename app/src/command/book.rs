use homebook_core::BookingFormData;
use homebook_dialogue::validate_form;

use super::{init_common_components, session_or_new};

/// Input parameters for the Book command strategy.
#[derive(Debug, Clone)]
pub struct BookInput {
    pub service: String,
    pub date: String,
    pub time: String,
    pub subscriber: bool,
    pub session_id: Option<String>,
}

/// Strategy for booking from already structured fields.
///
/// Goes through the same path as a submitted fallback form.
#[derive(Debug, Clone, Copy)]
pub struct BookStrategy;

impl super::CommandStrategy for BookStrategy {
    type Input = BookInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let form = BookingFormData {
            service: input.service,
            date: input.date,
            time: input.time,
            subscriber: input.subscriber,
        };
        validate_form(&form)?;

        let common = init_common_components()?;
        let session_id = session_or_new(input.session_id);
        let response = common
            .assistant
            .handle_form_submission(form, &session_id)
            .await?;

        println!("{}", response.reply);
        Ok(())
    }
}
