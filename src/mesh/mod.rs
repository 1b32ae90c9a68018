pub mod checkpoint;
pub mod loader;
pub mod locator;

pub use checkpoint::{ActionMesh, ActionMeshCheckpoint};
pub use loader::{load_action_mesh, parse_action_mesh, read_action_mesh, MeshError};
pub use locator::{
    find_nearest_checkpoint, find_nearest_checkpoint_within, find_nearest_index,
    CHECKPOINT_TOLERANCE,
};
