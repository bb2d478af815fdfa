use crate::domain::model::{
    Credential, DispatchReceipt, DispatchRequest, PositionReading, ResourceUnit, ServiceLocation,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 唯讀的服務據點目錄
pub trait CatalogProvider: Send + Sync {
    fn locations(&self) -> &[ServiceLocation];

    fn find_unit(&self, unit_id: &str) -> Option<(&ServiceLocation, &ResourceUnit)> {
        self.locations().iter().find_map(|location| {
            location
                .units
                .iter()
                .find(|unit| unit.id == unit_id)
                .map(|unit| (location, unit))
        })
    }

    fn unit_count(&self) -> usize {
        self.locations().iter().map(|l| l.units.len()).sum()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn radius_km(&self) -> f64;
    fn available_only(&self) -> bool;
    fn watch_interval(&self) -> Duration;
    fn distance_filter_meters(&self) -> f64;
    fn dispatch_endpoint(&self) -> Option<&str>;
    fn dispatch_timeout(&self) -> Duration;
    fn map_link_base(&self) -> &str;
}

/// 位置來源。`None` 表示串流結束，`Err` 表示使用者拒絕或定位失敗。
pub trait PositionSource: Send {
    fn next_reading(
        &mut self,
    ) -> impl std::future::Future<Output = Option<Result<PositionReading>>> + Send;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        credential: &Credential,
        request: &DispatchRequest,
    ) -> Result<DispatchReceipt>;
}

impl<T: CatalogProvider + ?Sized> CatalogProvider for std::sync::Arc<T> {
    fn locations(&self) -> &[ServiceLocation] {
        (**self).locations()
    }
}

impl<T: CatalogProvider + ?Sized> CatalogProvider for &T {
    fn locations(&self) -> &[ServiceLocation] {
        (**self).locations()
    }
}
