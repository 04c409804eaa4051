use crate::{
    error::LookupError,
    location::{DeviceLocator, NoLocator},
    model::{Coordinates, LookupQuery, WeatherSnapshot},
    provider::WeatherProvider,
};

/// Place name that short-circuits to [`WeatherSnapshot::demo`].
pub const DEMO_PLACE: &str = "demo";

/// Returns true when `name` selects the offline demo snapshot.
pub fn is_demo_name(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(DEMO_PLACE)
}

/// Resolves place names and coordinates into weather snapshots.
///
/// Holds no per-request state; concurrent calls are independent. Ordering of
/// their results is up to the caller (see [`crate::state::DisplayState`]).
#[derive(Debug)]
pub struct WeatherLookupService<P, L = NoLocator> {
    provider: P,
    locator: L,
}

impl<P: WeatherProvider> WeatherLookupService<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            locator: NoLocator,
        }
    }
}

impl<P: WeatherProvider, L: DeviceLocator> WeatherLookupService<P, L> {
    pub fn with_locator(provider: P, locator: L) -> Self {
        Self { provider, locator }
    }

    pub async fn lookup(&self, query: &LookupQuery) -> Result<WeatherSnapshot, LookupError> {
        match query {
            LookupQuery::ByName(name) => self.lookup_by_name(name).await,
            LookupQuery::ByCoordinates(coords) => {
                self.lookup_by_coordinates(coords.latitude(), coords.longitude())
                    .await
            }
        }
    }

    pub async fn lookup_by_name(&self, name: &str) -> Result<WeatherSnapshot, LookupError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LookupError::InvalidQuery("place name is empty".into()));
        }

        if is_demo_name(name) {
            tracing::info!("serving demo snapshot");
            return Ok(WeatherSnapshot::demo());
        }

        self.provider
            .current(&LookupQuery::ByName(name.to_owned()))
            .await
    }

    pub async fn lookup_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, LookupError> {
        let coords = Coordinates::new(latitude, longitude)?;
        self.provider
            .current(&LookupQuery::ByCoordinates(coords))
            .await
    }

    pub async fn request_current_device_location(&self) -> Result<Coordinates, LookupError> {
        self.locator.current_position().await
    }

    /// Locate the device, then look up the weather there.
    pub async fn lookup_current_location(&self) -> Result<WeatherSnapshot, LookupError> {
        let coords = self.request_current_device_location().await?;
        tracing::debug!(%coords, "device located");
        self.lookup_by_coordinates(coords.latitude(), coords.longitude())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Condition;
    use async_trait::async_trait;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug, Default)]
    struct RecordingProvider {
        calls: AtomicUsize,
        last: Mutex<Option<LookupQuery>>,
    }

    impl RecordingProvider {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherProvider for RecordingProvider {
        async fn current(&self, query: &LookupQuery) -> Result<WeatherSnapshot, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(query.clone());
            Ok(WeatherSnapshot::new("Lyon", 18, Condition::Clouds, 70, 11))
        }
    }

    #[derive(Debug)]
    struct FixedLocator(Result<Coordinates, LookupError>);

    #[async_trait]
    impl DeviceLocator for FixedLocator {
        async fn current_position(&self) -> Result<Coordinates, LookupError> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn demo_bypasses_provider_in_any_case() {
        let service = WeatherLookupService::new(RecordingProvider::default());

        for name in ["demo", "DEMO", "Demo", "  demo  "] {
            let snapshot = service.lookup_by_name(name).await.expect("demo lookup");
            assert_eq!(snapshot, WeatherSnapshot::demo());
        }
        assert_eq!(service.provider.calls(), 0);
    }

    #[tokio::test]
    async fn empty_name_is_rejected_before_request() {
        let service = WeatherLookupService::new(RecordingProvider::default());

        for name in ["", "   "] {
            let err = service.lookup_by_name(name).await.unwrap_err();
            assert!(matches!(err, LookupError::InvalidQuery(_)));
        }
        assert_eq!(service.provider.calls(), 0);
    }

    #[tokio::test]
    async fn name_is_trimmed_before_request() {
        let service = WeatherLookupService::new(RecordingProvider::default());

        service.lookup_by_name("  Lyon ").await.expect("lookup");
        assert_eq!(
            *service.provider.last.lock().unwrap(),
            Some(LookupQuery::ByName("Lyon".into()))
        );
    }

    #[tokio::test]
    async fn out_of_range_coordinates_are_rejected_before_request() {
        let service = WeatherLookupService::new(RecordingProvider::default());

        let err = service.lookup_by_coordinates(91.0, 0.0).await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidQuery(_)));
        let err = service.lookup_by_coordinates(0.0, 181.0).await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidQuery(_)));
        assert_eq!(service.provider.calls(), 0);
    }

    #[tokio::test]
    async fn lookup_dispatches_on_query_variant() {
        let service = WeatherLookupService::new(RecordingProvider::default());
        let coords = Coordinates::new(45.76, 4.84).unwrap();

        service
            .lookup(&LookupQuery::ByCoordinates(coords))
            .await
            .expect("lookup");
        assert_eq!(
            *service.provider.last.lock().unwrap(),
            Some(LookupQuery::ByCoordinates(coords))
        );

        let demo = service
            .lookup(&LookupQuery::ByName("demo".into()))
            .await
            .expect("demo");
        assert_eq!(demo, WeatherSnapshot::demo());
        assert_eq!(service.provider.calls(), 1);
    }

    #[tokio::test]
    async fn default_locator_is_unsupported() {
        let service = WeatherLookupService::new(RecordingProvider::default());

        assert_eq!(
            service.request_current_device_location().await,
            Err(LookupError::Unsupported)
        );
        assert_eq!(
            service.lookup_current_location().await,
            Err(LookupError::Unsupported)
        );
        assert_eq!(service.provider.calls(), 0);
    }

    #[tokio::test]
    async fn denied_location_stops_before_provider() {
        let service = WeatherLookupService::with_locator(
            RecordingProvider::default(),
            FixedLocator(Err(LookupError::PermissionDenied)),
        );

        assert_eq!(
            service.lookup_current_location().await,
            Err(LookupError::PermissionDenied)
        );
        assert_eq!(service.provider.calls(), 0);
    }

    #[tokio::test]
    async fn located_device_is_looked_up_by_coordinates() {
        let coords = Coordinates::new(45.76, 4.84).unwrap();
        let service =
            WeatherLookupService::with_locator(RecordingProvider::default(), FixedLocator(Ok(coords)));

        let snapshot = service.lookup_current_location().await.expect("lookup");
        assert_eq!(snapshot.place(), "Lyon");
        assert_eq!(
            *service.provider.last.lock().unwrap(),
            Some(LookupQuery::ByCoordinates(coords))
        );
    }
}
