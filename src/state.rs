use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rand::{SeedableRng, rngs::StdRng};

use crate::{books::BookSource, catalog::Catalog, config::Config, store::StudentStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<Catalog>,
    pub store: Arc<dyn StudentStore>,
    pub books: Arc<dyn BookSource>,
    /// Randomness for question sampling. Seeded from `QUIZ_SEED` when set.
    pub rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Catalog,
        store: Arc<dyn StudentStore>,
        books: Arc<dyn BookSource>,
    ) -> Self {
        let rng = match config.quiz_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            catalog: Arc::new(catalog),
            store,
            books,
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
