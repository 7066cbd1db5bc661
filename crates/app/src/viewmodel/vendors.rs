//! Vendors view model

use bookfair_core::{Vendor, VendorDraft};
use bookfair_net::{ApiClient, Result, Transport};
use tracing::{info, warn};

use super::replace_or_push;

#[derive(Debug, Default)]
pub struct VendorsPage {
    vendors: Vec<Vendor>,
}

impl VendorsPage {
    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    pub async fn load<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<()> {
        self.vendors = client.vendors().await?;
        Ok(())
    }

    /// Vendors matching a search term; a blank term matches everything
    pub fn search(&self, term: &str) -> Vec<&Vendor> {
        let term = term.trim();
        self.vendors.iter().filter(|v| v.matches(term)).collect()
    }

    pub async fn create<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        draft: &VendorDraft,
    ) -> Result<Vendor> {
        let vendor = client.create_vendor(draft).await?;
        info!(vendor_id = %vendor.id, name = %vendor.name, "Vendor created");
        replace_or_push(&mut self.vendors, vendor.clone(), |v| v.id == vendor.id);

        if let Err(e) = self.load(client).await {
            warn!(error = %e, "Vendor refresh failed");
        }
        Ok(vendor)
    }
}
