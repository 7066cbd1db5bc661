//! Stall map view model

use bookfair_core::{Stall, StallSize};
use bookfair_net::{ApiClient, Result, Transport};
use tracing::{info, warn};

use super::replace_or_push;

/// Header counts shown above the map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StallCounts {
    pub total: usize,
    pub reserved: usize,
    pub available: usize,
}

#[derive(Debug, Default)]
pub struct StallMapPage {
    stalls: Vec<Stall>,
}

impl StallMapPage {
    pub fn stalls(&self) -> &[Stall] {
        &self.stalls
    }

    pub async fn load<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<()> {
        self.stalls = client.stalls().await?;
        Ok(())
    }

    /// Stalls of one size, in map order
    pub fn by_size(&self, size: StallSize) -> Vec<&Stall> {
        self.stalls.iter().filter(|s| s.size == size).collect()
    }

    /// Non-empty size sections, small to large
    pub fn sections(&self) -> Vec<(StallSize, Vec<&Stall>)> {
        StallSize::ALL
            .into_iter()
            .map(|size| (size, self.by_size(size)))
            .filter(|(_, stalls)| !stalls.is_empty())
            .collect()
    }

    pub fn counts(&self) -> StallCounts {
        let reserved = self.stalls.iter().filter(|s| s.is_reserved()).count();
        StallCounts {
            total: self.stalls.len(),
            reserved,
            available: self.stalls.len() - reserved,
        }
    }

    /// Assign a stall to a vendor
    pub async fn assign<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        stall_id: &str,
        vendor_id: &str,
    ) -> Result<Stall> {
        let stall = client.assign_stall(stall_id, vendor_id).await?;
        info!(stall_id = %stall.id, vendor_id, "Stall assigned");
        replace_or_push(&mut self.stalls, stall.clone(), |s| s.id == stall.id);

        if let Err(e) = self.load(client).await {
            warn!(error = %e, "Stall refresh failed");
        }
        Ok(stall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodel::testing;
    use bookfair_core::StallStatus;

    #[tokio::test]
    async fn test_load_groups_and_counts() {
        let client = testing::client();
        let mut page = StallMapPage::default();
        page.load(&client).await.unwrap();

        assert_eq!(
            page.counts(),
            StallCounts {
                total: 4,
                reserved: 2,
                available: 2
            }
        );
        let small: Vec<&str> = page
            .by_size(StallSize::Small)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(small, vec!["A01", "A02"]);
        assert_eq!(page.sections().len(), 3);
    }

    #[tokio::test]
    async fn test_assign_updates_local_state() {
        let client = testing::client();
        let mut page = StallMapPage::default();
        page.load(&client).await.unwrap();

        let stall = page.assign(&client, "C01", "V002").await.unwrap();
        assert_eq!(stall.status, StallStatus::Reserved);

        let c01 = page.stalls().iter().find(|s| s.id == "C01").unwrap();
        assert_eq!(c01.publisher.as_deref(), Some("Vijitha Yapa"));
        assert_eq!(page.counts().reserved, 3);
    }

    #[tokio::test]
    async fn test_failed_assign_keeps_state() {
        let client = testing::client();
        let mut page = StallMapPage::default();
        page.load(&client).await.unwrap();
        let before = page.stalls().to_vec();

        let err = page.assign(&client, "Z99", "V001").await.unwrap_err();
        assert_eq!(err.to_string(), "Stall not found");
        assert_eq!(page.stalls(), before.as_slice());
    }
}
