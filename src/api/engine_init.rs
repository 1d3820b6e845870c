use tracing::{info, warn};

use crate::core::Dataset;
use crate::data::{DatasetSource, load_dataset};
use crate::error::StoryResult;
use crate::interaction::TooltipState;
use crate::render::StoryView;

use super::{NavigationController, SceneCatalog, StoryAxes, StoryConfig, StoryEngine};

impl<V: StoryView> StoryEngine<V> {
    /// Loads the dataset, configures the axes and renders scene 1 with the
    /// built-in catalog.
    ///
    /// Any failure before the first render replaces the narrative text with
    /// `config.load_failure_message` and leaves the rest of the view untouched.
    pub fn start(view: V, config: StoryConfig, source: &DatasetSource) -> StoryResult<Self> {
        Self::start_with_catalog(view, config, SceneCatalog::builtin(), source)
    }

    pub fn start_with_catalog(
        mut view: V,
        config: StoryConfig,
        catalog: SceneCatalog,
        source: &DatasetSource,
    ) -> StoryResult<Self> {
        let dataset = match config
            .validate()
            .and_then(|()| load_dataset(source, &config.dataset_format))
        {
            Ok(dataset) => dataset,
            Err(err) => {
                warn!(source = %source.label(), error = %err, "story data failed to load");
                view.set_narrative_text(&config.load_failure_message);
                return Err(err);
            }
        };
        Self::from_dataset_with_catalog(view, config, catalog, dataset)
    }

    pub fn from_dataset(view: V, config: StoryConfig, dataset: Dataset) -> StoryResult<Self> {
        Self::from_dataset_with_catalog(view, config, SceneCatalog::builtin(), dataset)
    }

    /// Builds a session around an already loaded dataset and renders scene 1.
    pub fn from_dataset_with_catalog(
        mut view: V,
        config: StoryConfig,
        catalog: SceneCatalog,
        dataset: Dataset,
    ) -> StoryResult<Self> {
        let prepared = config.validate().and_then(|()| {
            let axes = StoryAxes::configure(&dataset, &config)?;
            let navigation = NavigationController::new(catalog.total_scenes())?;
            Ok((axes, navigation))
        });
        let (axes, navigation) = match prepared {
            Ok(prepared) => prepared,
            Err(err) => {
                warn!(observations = dataset.len(), error = %err, "story setup failed");
                view.set_narrative_text(&config.load_failure_message);
                return Err(err);
            }
        };

        view.draw_static_chrome(axes.chrome())?;
        info!(
            observations = dataset.len(),
            scenes = navigation.total(),
            "story session started"
        );

        let mut engine = Self {
            view,
            config,
            dataset,
            axes,
            catalog,
            navigation,
            tooltip: TooltipState::default(),
        };
        engine.render_current()?;
        Ok(engine)
    }
}
