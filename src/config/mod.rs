//! Configuration module

mod site;

pub use site::LocalConfig;
pub use site::RemoteConfig;
pub use site::RepoSpec;
pub use site::SiteConfig;
