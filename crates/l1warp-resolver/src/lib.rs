//! Registration justification resolver: bootstrap derivation first, then a
//! backward scan of Warp precompile logs.

pub mod cache;
pub mod config;
pub mod resolver;
pub mod rpc;
pub mod source;

pub use cache::RegistrationCache;
pub use config::ResolverConfig;
pub use resolver::{JustificationQuery, JustificationResolver, ResolveError};
pub use rpc::{RpcLogSource, SendWarpMessage, WARP_PRECOMPILE_ADDRESS};
pub use source::{LogSourceError, MemoryLogSource, WarpLog, WarpLogSource};
