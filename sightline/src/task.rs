use crate::{CancelToken, Observer, SearchOutcome, Walker};
use elevation::ElevationProvider;
use std::{panic, thread::JoinHandle};

/// A search running on its own thread.
pub struct SearchHandle {
    cancel: CancelToken,
    thread: JoinHandle<SearchOutcome>,
}

impl SearchHandle {
    /// Asks the search to stop at its next chunk boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Blocks until the search completes.
    pub fn join(self) -> SearchOutcome {
        match self.thread.join() {
            Ok(outcome) => outcome,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

/// Runs `walker.search(observer)` on a new thread, so the caller can
/// keep working and cancel it.
pub fn spawn<P>(walker: Walker<P>, observer: Observer) -> SearchHandle
where
    P: ElevationProvider + Send + 'static,
{
    let cancel = CancelToken::new();
    let token = cancel.clone();
    let thread = std::thread::spawn(move || walker.search(&observer, &token));
    SearchHandle { cancel, thread }
}

#[cfg(test)]
mod tests {
    use super::spawn;
    use crate::{Observer, SearchError, SearchOutcome, Walker};
    use elevation::{ElevationProvider, ElevationSample, ProviderError, RadialTerrain};
    use geodesy::GeoPoint;
    use std::sync::{mpsc, Arc, Mutex};

    fn observer() -> Observer {
        Observer::builder()
            .position(GeoPoint::new(45.0, 7.0).unwrap())
            .altitude(100.0)
            .bearing(2.0)
            .build()
            .unwrap()
    }

    /// Blocks each path query until the test releases it.
    struct Gated {
        started: Mutex<mpsc::Sender<()>>,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl ElevationProvider for Gated {
        fn point_elevation(&self, _point: GeoPoint) -> Result<f64, ProviderError> {
            Ok(0.0)
        }

        fn path_elevation(
            &self,
            from: GeoPoint,
            _to: GeoPoint,
            _sample_spacing_m: f64,
        ) -> Result<Vec<ElevationSample>, ProviderError> {
            let _ = self.started.lock().unwrap().send(());
            let _ = self.release.lock().unwrap().recv();
            Ok(vec![ElevationSample {
                location: from,
                elevation_m: 0.0,
            }])
        }
    }

    #[test]
    fn test_spawned_search_completes() {
        let terrain = Arc::new(RadialTerrain::new(observer().position(), |_| 0.0));
        let first = spawn(Walker::new(Arc::clone(&terrain)), observer());
        let second = spawn(Walker::new(terrain), observer());
        let (a, b) = (first.join(), second.join());
        assert!(a.is_fallback());
        assert_eq!(a.point(), b.point());
    }

    #[test]
    fn test_cancel_while_fetching() {
        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let provider = Gated {
            started: Mutex::new(started_tx),
            release: Mutex::new(release_rx),
        };

        let handle = spawn(Walker::new(provider), observer());
        started_rx.recv().unwrap();
        handle.cancel();
        assert!(handle.cancel_token().is_cancelled());
        release_tx.send(()).unwrap();

        assert!(matches!(
            handle.join(),
            SearchOutcome::Failed(SearchError::Cancelled)
        ));
    }
}
