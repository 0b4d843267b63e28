//! SurrealDB repository implementations.

mod brand;
mod directory;
mod location;
mod organization;
mod selection;

pub use brand::SurrealBrandRepository;
pub use directory::SurrealDirectoryService;
pub use location::SurrealLocationRepository;
pub use organization::SurrealOrganizationRepository;
pub use selection::SurrealSelectionStorage;
