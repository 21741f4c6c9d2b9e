use soroban_sdk::{contracterror, contracttype, Address, BytesN, String, Vec};

pub const MAX_NAME_LEN: u32 = 32;
pub const MAX_DESCRIPTION_LEN: u32 = 256;
pub const MAX_CAPABILITIES: u32 = 10;
pub const MAX_CAPABILITY_LEN: u32 = 32;
pub const MAX_ENDPOINT_LEN: u32 = 128;
pub const MAX_COMMENT_LEN: u32 = 256;
pub const MAX_SERVICE_ID_LEN: u32 = 32;
pub const MAX_TITLE_LEN: u32 = 64;
pub const MAX_TAGS: u32 = 5;
pub const MAX_TAG_LEN: u32 = 32;
pub const MAX_INTENT_LEN: u32 = 256;
pub const MAX_CONDITIONS: u32 = 5;
pub const MAX_CONDITION_LEN: u32 = 64;

/// Upper bound on the protocol fee, 10%.
pub const MAX_FEE_BPS: u32 = 1_000;
pub const BPS_DENOMINATOR: u64 = 10_000;

pub const MIN_RATING: u32 = 1;
pub const MAX_RATING: u32 = 5;

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Protocol {
    pub authority: Address,
    pub total_agents: u64,
    pub total_services: u64,
    pub total_payments: u64,
    pub total_volume: u64,
    pub total_staked: u64,
    pub fee_bps: u32,
    pub treasury: Address,
    pub bump: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Agent {
    pub authority: Address,
    pub name: String,
    pub description: String,
    pub capabilities: Vec<String>,
    pub endpoint: String,
    pub reputation_score: u64,
    pub total_staked: u64,
    pub total_earned: u64,
    pub total_spent: u64,
    pub services_completed: u64,
    pub services_requested: u64,
    pub feedbacks_received: u64,
    /// Sum of every rating received; the average is `rating_total / feedbacks_received`.
    pub rating_total: u64,
    pub registered_at: u64,
    pub is_active: bool,
    pub bump: u32,
}

/// Balance held on behalf of exactly one parent record: an agent's stake,
/// a payment's escrow, or a stream's deposit.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Vault {
    pub owner: BytesN<32>,
    pub balance: u64,
    pub bump: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Feedback {
    pub from_agent: BytesN<32>,
    pub to_agent: BytesN<32>,
    pub rating: u32,
    pub comment: String,
    pub timestamp: u64,
    pub bump: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum PriceModel {
    Fixed = 0,
    PerRequest = 1,
    PerSecond = 2,
    PerToken = 3,
    Auction = 4,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Service {
    pub provider: BytesN<32>,
    pub authority: Address,
    pub service_id: String,
    pub title: String,
    pub description: String,
    pub price_lamports: u64,
    pub price_model: PriceModel,
    pub tags: Vec<String>,
    pub total_orders: u64,
    pub total_revenue: u64,
    pub avg_rating: u32,
    pub is_active: bool,
    pub created_at: u64,
    pub bump: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum PaymentStatus {
    Escrowed = 0,
    Released = 1,
    Refunded = 2,
    Disputed = 3,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Payment {
    pub payer: BytesN<32>,
    pub receiver: BytesN<32>,
    pub service: BytesN<32>,
    pub amount: u64,
    pub intent: String,
    pub conditions: Vec<String>,
    pub status: PaymentStatus,
    pub created_at: u64,
    pub timeout_at: u64,
    pub completed_at: u64,
    pub bump: u32,
    pub escrow_bump: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Stream {
    pub payer: BytesN<32>,
    pub receiver: BytesN<32>,
    pub rate_per_second: u64,
    pub deposited: u64,
    pub withdrawn: u64,
    pub started_at: u64,
    pub max_end_at: u64,
    pub last_withdrawn_at: u64,
    pub is_active: bool,
    pub bump: u32,
    pub vault_bump: u32,
}

/// Everything the account store can hold at a derived address. The variant
/// is the record's discriminator.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Record {
    Protocol(Protocol),
    Agent(Agent),
    Vault(Vault),
    Feedback(Feedback),
    Service(Service),
    Payment(Payment),
    Escrow(Vault),
    Stream(Stream),
    StreamVault(Vault),
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct DerivedAddress {
    pub address: BytesN<32>,
    pub bump: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum RefundReason {
    PayerCancelled = 0,
    Timeout = 1,
    DisputeResolved = 2,
}

#[derive(Clone)]
#[contracttype]
pub struct ProtocolInitializedLog {
    pub authority: Address,
    pub treasury: Address,
    pub fee_bps: u32,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct ProtocolConfigLog {
    pub treasury: Address,
    pub fee_bps: u32,
}

#[derive(Clone)]
#[contracttype]
pub struct AgentRegisteredLog {
    pub agent: BytesN<32>,
    pub authority: Address,
    pub name: String,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct AgentUpdatedLog {
    pub agent: BytesN<32>,
    pub is_active: bool,
}

#[derive(Clone)]
#[contracttype]
pub struct ReputationStakeLog {
    pub agent: BytesN<32>,
    pub amount: u64,
    pub new_score: u64,
    pub total_staked: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct FeedbackSubmittedLog {
    pub from: BytesN<32>,
    pub to: BytesN<32>,
    pub rating: u32,
    pub new_reputation: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct ServiceCreatedLog {
    pub service: BytesN<32>,
    pub provider: BytesN<32>,
    pub title: String,
    pub price: u64,
    pub price_model: PriceModel,
}

#[derive(Clone)]
#[contracttype]
pub struct ServiceUpdatedLog {
    pub service: BytesN<32>,
    pub price: u64,
    pub is_active: bool,
}

#[derive(Clone)]
#[contracttype]
pub struct PaymentCreatedLog {
    pub payment: BytesN<32>,
    pub payer: BytesN<32>,
    pub receiver: BytesN<32>,
    pub amount: u64,
    pub intent: String,
}

#[derive(Clone)]
#[contracttype]
pub struct PaymentReleasedLog {
    pub payment: BytesN<32>,
    pub receiver: BytesN<32>,
    pub amount: u64,
    pub fee: u64,
    pub latency_ms: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct PaymentRefundedLog {
    pub payment: BytesN<32>,
    pub payer: BytesN<32>,
    pub amount: u64,
    pub reason: RefundReason,
}

#[derive(Clone)]
#[contracttype]
pub struct PaymentDisputedLog {
    pub payment: BytesN<32>,
    pub raised_by: Address,
}

#[derive(Clone)]
#[contracttype]
pub struct StreamCreatedLog {
    pub stream: BytesN<32>,
    pub payer: BytesN<32>,
    pub receiver: BytesN<32>,
    pub rate_per_second: u64,
    pub deposit: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct StreamWithdrawnLog {
    pub stream: BytesN<32>,
    pub amount: u64,
    pub total_withdrawn: u64,
    pub is_active: bool,
}

#[derive(Clone)]
#[contracttype]
pub struct StreamCancelledLog {
    pub stream: BytesN<32>,
    pub paid_to_receiver: u64,
    pub refunded_to_payer: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracterror]
#[repr(u32)]
pub enum ProtocolError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    NameTooLong = 4,
    DescriptionTooLong = 5,
    TooManyCapabilities = 6,
    CapabilityTooLong = 7,
    EndpointTooLong = 8,
    ZeroAmount = 9,
    InvalidRating = 10,
    CommentTooLong = 11,
    ServiceIdTooLong = 12,
    TitleTooLong = 13,
    TooManyTags = 14,
    TagTooLong = 15,
    IntentTooLong = 16,
    TooManyConditions = 17,
    ConditionTooLong = 18,
    EmptyField = 19,
    InvalidTimeout = 20,
    InvalidDuration = 21,
    InsufficientDeposit = 22,
    InvalidFee = 23,
    AgentNotFound = 24,
    AgentAlreadyRegistered = 25,
    AgentInactive = 26,
    ServiceNotFound = 27,
    ServiceAlreadyExists = 28,
    ServiceInactive = 29,
    FeedbackAlreadySubmitted = 30,
    SelfDealing = 31,
    PaymentNotFound = 32,
    PaymentNotEscrowed = 33,
    PaymentNotDisputed = 34,
    RefundNotAllowed = 35,
    StreamNotFound = 36,
    StreamAlreadyExists = 37,
    StreamNotActive = 38,
    NothingToWithdraw = 39,
    InsufficientBalance = 40,
    InsufficientStake = 41,
    VaultNotFound = 42,
    AddressCollision = 43,
    AddressMismatch = 44,
    ArithmeticOverflow = 45,
}
