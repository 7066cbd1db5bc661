//! Businesses view model

use bookfair_core::{Business, BusinessDraft};
use bookfair_net::{ApiClient, Result, Transport};
use tracing::{info, warn};

use super::replace_or_push;

#[derive(Debug, Default)]
pub struct BusinessesPage {
    businesses: Vec<Business>,
}

impl BusinessesPage {
    pub fn businesses(&self) -> &[Business] {
        &self.businesses
    }

    pub async fn load<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<()> {
        self.businesses = client.businesses().await?;
        Ok(())
    }

    pub fn verified(&self) -> usize {
        self.businesses.iter().filter(|b| b.verified).count()
    }

    pub async fn create<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        draft: &BusinessDraft,
    ) -> Result<Business> {
        let business = client.create_business(draft).await?;
        info!(business_id = business.business_id, name = %business.name, "Business created");
        replace_or_push(&mut self.businesses, business.clone(), |b| {
            b.business_id == business.business_id
        });

        if let Err(e) = self.load(client).await {
            warn!(error = %e, "Business refresh failed");
        }
        Ok(business)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodel::testing;

    #[tokio::test]
    async fn test_create_business() {
        let client = testing::client();
        let mut page = BusinessesPage::default();
        page.load(&client).await.unwrap();
        assert_eq!(page.verified(), 2);

        let business = page
            .create(
                &client,
                &BusinessDraft {
                    name: Some("Acme Books".to_string()),
                    contact_number: Some("0771234567".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(business.business_id, 3);
        assert!(!business.verified);
        assert_eq!(page.businesses().len(), 3);
        assert_eq!(page.verified(), 2);
    }
}
