//! Dashboard view model

use bookfair_core::Dashboard;
use bookfair_net::{ApiClient, Result, Transport};

#[derive(Debug, Default)]
pub struct DashboardPage {
    dashboard: Option<Dashboard>,
}

impl DashboardPage {
    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.dashboard.as_ref()
    }

    pub async fn load<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<()> {
        self.dashboard = Some(client.dashboard().await?);
        Ok(())
    }
}
