use crate::app::report;
use crate::config::OutputFormat;
use crate::core::dispatch::DispatchService;
use crate::core::ranking::ProximityRanker;
use crate::core::watch::{LocationWatch, WatchThrottle};
use crate::domain::model::{Coordinate, Credential, DispatchReceipt, RankingUpdate};
use crate::domain::ports::{CatalogProvider, Notifier, PositionSource};
use crate::utils::error::{LocatorError, Result};
use std::io::Write;

/// 命令列三種模式的協調者：單次查詢、位置監看、分享位置
pub struct Locator<C: CatalogProvider> {
    ranker: ProximityRanker<C>,
    format: OutputFormat,
}

impl<C: CatalogProvider> Locator<C> {
    pub fn new(ranker: ProximityRanker<C>, format: OutputFormat) -> Self {
        Self { ranker, format }
    }

    pub fn locate<W: Write>(&self, position: Coordinate, out: &mut W) -> Result<RankingUpdate> {
        let update = self.ranker.refresh(position);
        self.write_update(out, &update)?;
        Ok(update)
    }

    pub async fn watch<P, W>(
        &self,
        source: &mut P,
        throttle: WatchThrottle,
        out: &mut W,
    ) -> Result<usize>
    where
        P: PositionSource,
        W: Write,
    {
        let mut watch = LocationWatch::new(&self.ranker, throttle);
        watch
            .run(source, |update| self.write_update(out, &update))
            .await
    }

    /// 依目前位置排序後，把位置分享給指定單位；單位必須在半徑內
    pub async fn notify<N: Notifier>(
        &self,
        dispatch: &DispatchService<N>,
        credential: &Credential,
        position: Coordinate,
        unit_id: &str,
    ) -> Result<DispatchReceipt> {
        let results = self.ranker.rank(position)?;
        let unit = results
            .iter()
            .find(|result| result.unit_id == unit_id)
            .ok_or_else(|| LocatorError::UnitNotFound {
                unit_id: unit_id.to_string(),
            })?;

        tracing::info!(
            "📡 Sharing location with {} ({:.1} km away)",
            unit.registration,
            unit.distance_km
        );
        dispatch.share_location(credential, unit, position).await
    }

    fn write_update<W: Write>(&self, out: &mut W, update: &RankingUpdate) -> Result<()> {
        let rendered = report::render_update(update, self.format)?;
        out.write_all(rendered.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
