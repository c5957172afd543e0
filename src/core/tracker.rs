use crate::core::form::SwimForm;
use crate::core::ledger::total_distance;
use crate::core::progress::compute_progress;
use crate::domain::model::{Dashboard, RoutePoint, SwimId, SwimRecord};
use crate::domain::ports::SwimApi;
use crate::utils::error::Result;

/// Client-side cache of the swim list and route, refreshed from a [`SwimApi`].
pub struct Tracker<A: SwimApi> {
    api: A,
    swims: Vec<SwimRecord>,
    route: Vec<RoutePoint>,
    selection: Vec<SwimId>,
}

impl<A: SwimApi> Tracker<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            swims: Vec::new(),
            route: Vec::new(),
            selection: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn swims(&self) -> &[SwimRecord] {
        &self.swims
    }

    pub fn route(&self) -> &[RoutePoint] {
        &self.route
    }

    pub fn selection(&self) -> &[SwimId] {
        &self.selection
    }

    pub fn select(&mut self, ids: Vec<SwimId>) {
        self.selection = ids;
    }

    /// Loads swims and route together. A failed fetch keeps the cached value.
    pub async fn refresh(&mut self) -> Dashboard {
        let (swims, route) = tokio::join!(self.api.get_swims(), self.api.to_swim());

        match swims {
            Ok(swims) => {
                tracing::debug!("Fetched {} swims", swims.len());
                self.swims = swims;
            }
            Err(e) => tracing::warn!("Could not load swims, keeping cached list: {}", e),
        }
        match route {
            Ok(route) => {
                tracing::debug!("Fetched route with {} vertices", route.len());
                self.route = route;
            }
            Err(e) => tracing::warn!("Could not load route, keeping cached route: {}", e),
        }

        self.dashboard()
    }

    pub fn dashboard(&self) -> Dashboard {
        let total_meters = total_distance(&self.swims);
        Dashboard {
            total_meters,
            swims: self.swims.clone(),
            progress: compute_progress(&self.route, total_meters),
        }
    }

    /// Fetches the route when nothing is cached yet. The route never changes.
    async fn ensure_route(&mut self) {
        if !self.route.is_empty() {
            return;
        }
        match self.api.to_swim().await {
            Ok(route) => self.route = route,
            Err(e) => tracing::warn!("Could not load route: {}", e),
        }
    }

    pub async fn add(&mut self, form: &SwimForm) -> Result<Dashboard> {
        let swim = form.submit()?;
        tracing::info!("Adding swim of {}m on {}", swim.strecke, swim.datum);
        self.swims = self.api.add_swim(&swim).await?;
        self.ensure_route().await;
        Ok(self.dashboard())
    }

    /// Deletes the current selection. Without confirmation the selection is dropped instead.
    pub async fn delete_selected(&mut self, confirmed: bool) -> Result<Dashboard> {
        if !confirmed {
            tracing::info!("Delete cancelled, clearing {} selected rows", self.selection.len());
            self.selection.clear();
            return Ok(self.dashboard());
        }
        if self.selection.is_empty() {
            return Ok(self.dashboard());
        }

        tracing::info!("Deleting {} swims", self.selection.len());
        let remaining = self.api.delete_swims(&self.selection).await?;
        // 刪除成功後才清除選取
        let ids = std::mem::take(&mut self.selection);

        let leftover = remaining.iter().filter(|s| ids.contains(&s.id)).count();
        if leftover > 0 {
            tracing::warn!("{} deleted swims are still reported by the API", leftover);
        }

        self.swims = remaining;
        self.ensure_route().await;
        Ok(self.dashboard())
    }
}
