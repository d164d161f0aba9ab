pub mod communities;
pub mod device;
pub mod topology;

pub use communities::{Communities, Secrets};
pub use device::{Device, HardwareModel, Interface, Platform, SubInterface};
pub use topology::{Network, NetworkRecord};

/// Canonical device role values used by enrichment policy.
/// `role` itself is a free-form string at the model layer; which roles get
/// which data is decided by the enricher.
pub mod role {
    pub const LEAF: &str = "leaf";
}
