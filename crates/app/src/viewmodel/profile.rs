//! Profile view model

use bookfair_core::{Profile, ProfileUpdate};
use bookfair_net::{ApiClient, Result, Transport};
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct ProfilePage {
    profile: Option<Profile>,
}

impl ProfilePage {
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub async fn load<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<()> {
        self.profile = Some(client.profile().await?);
        Ok(())
    }

    pub fn full_name(&self) -> Option<String> {
        self.profile
            .as_ref()
            .map(|p| format!("{} {}", p.first_name, p.last_name).trim().to_string())
    }

    pub async fn save<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        update: &ProfileUpdate,
    ) -> Result<Profile> {
        let profile = client.update_profile(update).await?;
        info!(employee_id = %profile.employee_id, "Profile saved");
        self.profile = Some(profile.clone());

        if let Err(e) = self.load(client).await {
            warn!(error = %e, "Profile refresh failed");
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodel::testing;

    #[tokio::test]
    async fn test_save_profile() {
        let client = testing::client();
        let mut page = ProfilePage::default();
        page.load(&client).await.unwrap();
        assert_eq!(page.full_name().as_deref(), Some("Nuwan Perera"));

        let saved = page
            .save(
                &client,
                &ProfileUpdate {
                    last_name: Some("Fernando".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(saved.last_name, "Fernando");
        assert_eq!(page.full_name().as_deref(), Some("Nuwan Fernando"));
        assert_eq!(page.profile().unwrap().employee_id, "CMBF001");
    }
}
