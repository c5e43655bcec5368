use homebook_core::BookingStore;

use super::init_common_components;

/// Strategy for listing stored bookings.
#[derive(Debug, Clone, Copy)]
pub struct BookingsStrategy;

impl super::CommandStrategy for BookingsStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components()?;
        let bookings = common.assistant.bookings().list().await?;

        if bookings.is_empty() {
            println!(
                "No bookings yet ({}).",
                common.config.storage.bookings_path.display()
            );
            return Ok(());
        }

        println!("=== {} bookings ===\n", bookings.len());
        for booking in &bookings {
            println!(
                "{}  {} {}  {}{}",
                booking.timestamp.format("%Y-%m-%d %H:%M"),
                booking.date,
                booking.time,
                booking.service,
                if booking.subscriber { "  (member)" } else { "" }
            );
        }
        Ok(())
    }
}
