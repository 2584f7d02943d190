//! `l1warp`: build and inspect L1 validator Warp messages, and look up the
//! registration justification a signature aggregator needs.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use l1warp_codec::{PayloadKind, WarpPayload};
use l1warp_resolver::{JustificationQuery, JustificationResolver, ResolverConfig, RpcLogSource};
use l1warp_types::{
    BlockchainId, BlsPublicKey, ConversionId, L1ValidatorRegistrationMessage,
    L1ValidatorWeightMessage, NodeId, PChainAddress, PChainOwner, SubnetId,
    SubnetToL1ConversionMessage, ValidationId, ValidationPeriod, ValidationUptimeMessage,
};
use tracing::{info, warn};

/// L1 validator Warp message tool.
#[derive(Parser, Debug)]
#[command(name = "l1warp", version, about = "L1 validator Warp message tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// ValidationID of a RegisterL1Validator message.
    ValidationId(PeriodArgs),

    /// ValidationID of a validator present at conversion time.
    BootstrapId {
        #[arg(long)]
        subnet_id: SubnetId,
        /// Position in the conversion's validator list.
        #[arg(long)]
        index: u32,
    },

    /// Encode a payload, wrapped as an unsigned Warp message by default.
    Pack(PackArgs),

    /// Decode an unsigned Warp message to JSON.
    Decode {
        /// Hex-encoded unsigned message.
        message: String,
        /// Payload kind. Required for type ID 0.
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Split a signed Warp message into access-list storage keys.
    AccessList {
        /// Hex-encoded signed message.
        message: String,
    },

    /// Conversion ID of subnet-to-L1 conversion data given as a JSON file.
    ConversionId { path: PathBuf },

    /// Marshaled registration justification for a ValidationID.
    Justification(JustificationArgs),
}

#[derive(Args, Debug)]
struct PeriodArgs {
    #[arg(long)]
    subnet_id: SubnetId,

    /// `NodeID-<cb58>` or 0x-hex.
    #[arg(long)]
    node_id: NodeId,

    #[arg(long)]
    bls_public_key: BlsPublicKey,

    /// Registration expiry (unix seconds).
    #[arg(long)]
    expiry: u64,

    #[arg(long)]
    weight: u64,

    #[arg(long, default_value_t = 0)]
    balance_owner_threshold: u32,

    /// Remaining-balance owner addresses (comma-separated, 20-byte hex or cb58).
    #[arg(long, value_delimiter = ',')]
    balance_owner: Vec<PChainAddress>,

    #[arg(long, default_value_t = 0)]
    disable_owner_threshold: u32,

    /// Disable owner addresses (comma-separated, 20-byte hex or cb58).
    #[arg(long, value_delimiter = ',')]
    disable_owner: Vec<PChainAddress>,
}

impl PeriodArgs {
    fn into_period(self) -> ValidationPeriod {
        ValidationPeriod {
            subnet_id: self.subnet_id,
            node_id: self.node_id,
            bls_public_key: self.bls_public_key,
            registration_expiry: self.expiry,
            remaining_balance_owner: PChainOwner {
                threshold: self.balance_owner_threshold,
                addresses: self.balance_owner,
            },
            disable_owner: PChainOwner {
                threshold: self.disable_owner_threshold,
                addresses: self.disable_owner,
            },
            weight: self.weight,
        }
    }
}

#[derive(Args, Debug)]
struct PackArgs {
    #[arg(long, env = "L1WARP_NETWORK_ID", default_value_t = 1)]
    network_id: u32,

    /// Defaults to the P-Chain ID (32 zero bytes).
    #[arg(long, env = "L1WARP_SOURCE_CHAIN_ID")]
    source_chain_id: Option<BlockchainId>,

    /// Print only the payload, without AddressedCall and message envelopes.
    #[arg(long)]
    payload_only: bool,

    #[command(subcommand)]
    kind: PackKind,
}

#[derive(Subcommand, Debug)]
enum PackKind {
    /// RegisterL1Validator.
    Register(PeriodArgs),
    /// L1ValidatorRegistration status.
    Registration {
        #[arg(long)]
        validation_id: ValidationId,
        #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
        registered: bool,
    },
    /// L1ValidatorWeight update.
    Weight {
        #[arg(long)]
        validation_id: ValidationId,
        #[arg(long)]
        nonce: u64,
        #[arg(long)]
        weight: u64,
    },
    /// ValidationUptime report.
    Uptime {
        #[arg(long)]
        validation_id: ValidationId,
        #[arg(long)]
        uptime_seconds: u64,
    },
    /// SubnetToL1Conversion.
    Conversion {
        #[arg(long)]
        conversion_id: ConversionId,
    },
}

impl PackKind {
    fn into_payload(self) -> WarpPayload {
        match self {
            Self::Register(args) => WarpPayload::RegisterL1Validator(args.into_period()),
            Self::Registration {
                validation_id,
                registered,
            } => WarpPayload::L1ValidatorRegistration(L1ValidatorRegistrationMessage {
                validation_id,
                registered,
            }),
            Self::Weight {
                validation_id,
                nonce,
                weight,
            } => WarpPayload::L1ValidatorWeight(L1ValidatorWeightMessage {
                validation_id,
                nonce,
                weight,
            }),
            Self::Uptime {
                validation_id,
                uptime_seconds,
            } => WarpPayload::ValidationUptime(ValidationUptimeMessage {
                validation_id,
                uptime_seconds,
            }),
            Self::Conversion { conversion_id } => {
                WarpPayload::SubnetToL1Conversion(SubnetToL1ConversionMessage { conversion_id })
            }
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Conversion,
    Register,
    Registration,
    Weight,
    Uptime,
}

impl From<KindArg> for PayloadKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Conversion => PayloadKind::SubnetToL1Conversion,
            KindArg::Register => PayloadKind::RegisterL1Validator,
            KindArg::Registration => PayloadKind::L1ValidatorRegistration,
            KindArg::Weight => PayloadKind::L1ValidatorWeight,
            KindArg::Uptime => PayloadKind::ValidationUptime,
        }
    }
}

#[derive(Args, Debug)]
struct JustificationArgs {
    /// EVM JSON-RPC endpoint of the L1 (http(s) or ws(s)).
    #[arg(long, env = "L1WARP_RPC_URL")]
    rpc_url: String,

    #[arg(long)]
    validation_id: ValidationId,

    #[arg(long)]
    subnet_id: SubnetId,

    /// Expected NodeID. Only cross-checked; a mismatch is logged.
    #[arg(long)]
    node_id: Option<String>,

    /// Bootstrap validator indices to try before scanning logs.
    #[arg(long, env = "L1WARP_BOOTSTRAP_BOUND", default_value_t = 100)]
    bootstrap_bound: u32,

    /// Blocks per log query.
    #[arg(long, env = "L1WARP_BATCH_SIZE", default_value_t = 2_048)]
    batch_size: u64,

    /// Give up after this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

async fn run_justification(args: JustificationArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let node_id = args.node_id.as_deref().and_then(|text| match NodeId::parse(text) {
        Ok(node_id) => Some(node_id),
        Err(e) => {
            warn!(node_id = text, error = %e, "ignoring undecodable NodeID");
            None
        }
    });

    let config = ResolverConfig {
        bootstrap_search_bound: args.bootstrap_bound,
        batch_size: args.batch_size,
        ..ResolverConfig::default()
    };
    let source = RpcLogSource::connect(&args.rpc_url).await?;
    let resolver = JustificationResolver::new(source, config)?;
    let query = JustificationQuery {
        validation_id: args.validation_id,
        subnet_id: args.subnet_id,
        node_id,
    };

    let lookup = resolver.resolve_bytes(&query);
    let found = match args.timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), lookup)
            .await
            .map_err(|_| format!("justification lookup timed out after {secs}s"))??,
        None => lookup.await?,
    };

    match found {
        Some(bytes) => {
            println!("0x{}", hex::encode(bytes));
            Ok(ExitCode::SUCCESS)
        }
        None => {
            warn!(validation_id = %query.validation_id, "no justification found");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Command::ValidationId(args) => commands::validation_id(&args.into_period()),
        Command::BootstrapId { subnet_id, index } => commands::bootstrap_id(&subnet_id, index),
        Command::Pack(args) => {
            let source_chain_id = args.source_chain_id.unwrap_or_default();
            let payload = args.kind.into_payload();
            info!(kind = %payload.kind(), network_id = args.network_id, "packing payload");
            commands::pack(args.network_id, &source_chain_id, &payload, args.payload_only)
        }
        Command::Decode { message, kind } => commands::decode(&message, kind.map(Into::into))?,
        Command::AccessList { message } => commands::access_list(&message)?,
        Command::ConversionId { path } => commands::conversion(&std::fs::read_to_string(path)?)?,
        Command::Justification(args) => return run_justification(args).await,
    };

    println!("{output}");
    Ok(ExitCode::SUCCESS)
}
