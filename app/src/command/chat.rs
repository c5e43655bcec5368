//! Conversational booking, one message or an interactive session.

use homebook_core::{BookingFormData, ChatResponse, Slot};
use homebook_dialogue::validate_form;
use std::io::Write;
use tracing::{info, warn};

use super::{Assistant, init_common_components, session_or_new};

const FINISHED: &str = "Booking finished. Start typing to make another one.\n";

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Optional single message to send (non-interactive mode)
    pub message: Option<String>,
    /// Session to continue; a new one is generated when absent
    pub session_id: Option<String>,
}

/// Strategy for executing the Chat command.
///
/// In interactive mode the strategy plays the caller's role too: when the
/// assistant asks for the structured form, it collects the four fields on
/// the terminal and submits them directly.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components()?;
        let session_id = session_or_new(input.session_id);
        info!("Starting booking session: {session_id}");

        if let Some(message) = input.message {
            let response = common
                .assistant
                .process_message(&message, &session_id)
                .await?;
            print_response(&response);
            return Ok(());
        }

        run_interactive(&common.assistant, &session_id).await
    }
}

fn print_response(response: &ChatResponse) {
    println!("\n{}\n", response.reply);
    if response.show_form {
        println!("[booking form requested]\n");
    }
}

fn read_line(prompt: &str) -> anyhow::Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    if std::io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Collects the fallback form on the terminal.
fn read_form() -> anyhow::Result<Option<BookingFormData>> {
    println!("Please fill in the booking form.");
    let (Some(service), Some(date), Some(time), Some(subscriber)) = (
        read_line("  Service: ")?,
        read_line("  Date (YYYY-MM-DD): ")?,
        read_line("  Time (HH:MM): ")?,
        read_line("  Subscriber? (y/n): ")?,
    ) else {
        return Ok(None);
    };

    Ok(Some(BookingFormData {
        service,
        date,
        time,
        subscriber: matches!(subscriber.to_lowercase().as_str(), "y" | "yes"),
    }))
}

async fn run_interactive(assistant: &Assistant, session_id: &str) -> anyhow::Result<()> {
    println!("=== Booking Session: {session_id} ===");
    println!("Type 'exit', 'quit', or Ctrl+C to end the session.\n");

    loop {
        let Some(input) = read_line("> ")? else {
            break;
        };

        if matches!(input.as_str(), "exit" | "quit" | "q") {
            println!("\nSession ended.");
            break;
        }
        if input.is_empty() {
            continue;
        }

        let response = match assistant.process_message(&input, session_id).await {
            Ok(response) => response,
            Err(e) => {
                eprintln!("Error: {e}");
                continue;
            }
        };
        print_response(&response);

        let wants_form = response.show_form
            || (response.service.is_none()
                && assistant.should_show_fallback_form(session_id).await?);
        if wants_form {
            let Some(form) = read_form()? else {
                break;
            };
            if let Err(e) = validate_form(&form) {
                warn!("Rejected form input: {e}");
                println!("\n{e}. Let's keep chatting instead.\n");
                continue;
            }
            let response = assistant.handle_form_submission(form, session_id).await?;
            print_response(&response);
            println!("{FINISHED}");
        } else if response.expecting == Some(Slot::Complete) {
            println!("{FINISHED}");
        }
    }

    Ok(())
}
