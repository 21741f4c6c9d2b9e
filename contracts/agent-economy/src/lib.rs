#![no_std]
#![allow(clippy::too_many_arguments)]

mod contract;
mod escrow;
mod identity;
mod marketplace;
pub mod reputation;
mod seeds;
mod storage;
mod streaming;
mod types;
mod utils;

pub use contract::{AgentEconomy, AgentEconomyClient};
pub use types::{
    Agent, AgentRegisteredLog, AgentUpdatedLog, DerivedAddress, Feedback, FeedbackSubmittedLog,
    Payment, PaymentCreatedLog, PaymentDisputedLog, PaymentRefundedLog, PaymentReleasedLog,
    PaymentStatus, PriceModel, Protocol, ProtocolConfigLog, ProtocolError, ProtocolInitializedLog,
    Record, RefundReason, ReputationStakeLog, Service, ServiceCreatedLog, ServiceUpdatedLog,
    Stream, StreamCancelledLog, StreamCreatedLog, StreamWithdrawnLog, Vault,
};

#[cfg(test)]
mod test;
