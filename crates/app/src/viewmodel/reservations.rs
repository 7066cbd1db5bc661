//! Reservations view model

use bookfair_core::{Reservation, ReservationAction, ReservationStatus};
use bookfair_net::{ApiClient, Result, Transport};
use tracing::{info, warn};

use super::replace_or_push;

#[derive(Debug, Default)]
pub struct ReservationsPage {
    reservations: Vec<Reservation>,
}

impl ReservationsPage {
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub async fn load<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<()> {
        self.reservations = client.reservations().await?;
        Ok(())
    }

    /// Reservations matching a search term and optional status; a blank term matches everything
    pub fn search(&self, term: &str, status: Option<ReservationStatus>) -> Vec<&Reservation> {
        let term = term.trim();
        self.reservations
            .iter()
            .filter(|r| status.map_or(true, |status| r.status == status))
            .filter(|r| r.matches(term))
            .collect()
    }

    /// Reservations whose confirmation email has not gone out
    pub fn pending_email(&self) -> usize {
        self.reservations.iter().filter(|r| !r.email_sent).count()
    }

    pub async fn approve<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        reservation_id: &str,
    ) -> Result<Reservation> {
        self.decide(client, reservation_id, ReservationAction::Approve)
            .await
    }

    pub async fn decline<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        reservation_id: &str,
    ) -> Result<Reservation> {
        self.decide(client, reservation_id, ReservationAction::Decline)
            .await
    }

    async fn decide<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        reservation_id: &str,
        action: ReservationAction,
    ) -> Result<Reservation> {
        let reservation = client.decide_reservation(reservation_id, action).await?;
        info!(reservation_id, status = %reservation.status, "Reservation updated");
        replace_or_push(&mut self.reservations, reservation.clone(), |r| {
            r.id == reservation.id
        });

        if let Err(e) = self.load(client).await {
            warn!(error = %e, "Reservation refresh failed");
        }
        Ok(reservation)
    }
}
