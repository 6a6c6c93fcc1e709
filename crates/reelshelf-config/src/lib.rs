//! Settings for reelshelf front-ends.
//!
//! A [`ReelshelfConfig`] says where the movie collection lives, how record
//! ids are assigned and how often the terminal UI ticks. It is assembled from
//! up to four `reelshelf.json5` layers (user, project, cwd, explicit paths),
//! each schema-checked before the layers are deep-merged.

mod error;
mod loader;
mod model;

pub use error::ConfigError;
pub use loader::{ConfigLayer, ConfigLayerSource, LayeredConfig, LayeredConfigOptions};
pub use model::*;
