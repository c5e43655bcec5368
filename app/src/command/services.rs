use super::init_common_components;

/// Strategy for listing the service catalog.
#[derive(Debug, Clone, Copy)]
pub struct ServicesStrategy;

impl super::CommandStrategy for ServicesStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components()?;
        let services = common.catalog.load().await;

        if services.is_empty() {
            println!(
                "No services loaded from {}. Run 'homebook init' to create a catalog.",
                common.config.catalog.path.display()
            );
            return Ok(());
        }

        for service in services.iter() {
            println!("{:<20} {}", service.name, service.keywords.join(", "));
        }
        Ok(())
    }
}
