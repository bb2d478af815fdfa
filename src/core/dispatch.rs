use crate::domain::model::{Coordinate, Credential, DispatchReceipt, DispatchRequest, RankedResult};
use crate::domain::ports::Notifier;
use crate::utils::error::Result;

pub const DEFAULT_MAP_LINK_BASE: &str = "https://www.google.com/maps?q=";

pub fn map_link(base: &str, position: Coordinate) -> String {
    format!("{}{},{}", base, position.latitude, position.longitude)
}

/// 把使用者位置分享給某台救護車的調度電話
pub struct DispatchService<N: Notifier> {
    notifier: N,
    map_link_base: String,
}

impl<N: Notifier> DispatchService<N> {
    pub fn new(notifier: N) -> Self {
        Self::with_map_link_base(notifier, DEFAULT_MAP_LINK_BASE)
    }

    pub fn with_map_link_base(notifier: N, map_link_base: impl Into<String>) -> Self {
        Self {
            notifier,
            map_link_base: map_link_base.into(),
        }
    }

    pub fn build_request(&self, unit: &RankedResult, position: Coordinate) -> DispatchRequest {
        DispatchRequest {
            phone_number: unit.phone.clone(),
            location: map_link(&self.map_link_base, position),
        }
    }

    pub async fn share_location(
        &self,
        credential: &Credential,
        unit: &RankedResult,
        position: Coordinate,
    ) -> Result<DispatchReceipt> {
        let request = self.build_request(unit, position);
        tracing::debug!(
            "Sharing location {} with unit {} ({})",
            request.location,
            unit.unit_id,
            unit.phone
        );

        match self.notifier.notify(credential, &request).await {
            Ok(receipt) => {
                tracing::info!(
                    "✅ Location shared with {} at {}",
                    unit.registration,
                    unit.location_name
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::error!("❌ Failed to share location with {}: {}", unit.registration, e);
                Err(e)
            }
        }
    }
}
