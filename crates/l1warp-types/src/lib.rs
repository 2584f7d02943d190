pub mod cb58;
pub mod error;
pub mod ids;
pub mod models;

pub use error::{CodecError, ValidationError};
pub use ids::{
    BlockchainId, BlsPublicKey, ConversionId, NodeId, PChainAddress, SubnetId, TxHash,
    ValidationId,
};
pub use models::{
    ConversionValidator, L1ValidatorRegistrationMessage, L1ValidatorWeightMessage, PChainOwner,
    SubnetToL1ConversionData, SubnetToL1ConversionMessage, ValidationPeriod,
    ValidationUptimeMessage,
};
