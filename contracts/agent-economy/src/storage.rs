use soroban_sdk::{contracttype, panic_with_error, Address, BytesN, Env};

use crate::{
    seeds::{self, RecordKind},
    types::{Agent, Feedback, Payment, Protocol, ProtocolError, Record, Service, Stream, Vault},
};

const DAY_IN_LEDGERS: u32 = 17_280;
pub const RECORD_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const RECORD_LIFETIME_THRESHOLD: u32 = RECORD_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Record(BytesN<32>),
    Balance(Address),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Protocol(_) => RecordKind::Protocol,
            Record::Agent(_) => RecordKind::Agent,
            Record::Vault(_) => RecordKind::Vault,
            Record::Feedback(_) => RecordKind::Feedback,
            Record::Service(_) => RecordKind::Service,
            Record::Payment(_) => RecordKind::Payment,
            Record::Escrow(_) => RecordKind::Escrow,
            Record::Stream(_) => RecordKind::Stream,
            Record::StreamVault(_) => RecordKind::StreamVault,
        }
    }
}

pub fn read_record(e: &Env, address: &BytesN<32>) -> Option<Record> {
    let key = DataKey::Record(address.clone());
    let record = e.storage().persistent().get::<_, Record>(&key);
    if record.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, RECORD_LIFETIME_THRESHOLD, RECORD_BUMP_AMOUNT);
    }
    record
}

pub fn write_record(e: &Env, address: &BytesN<32>, record: &Record) {
    let key = DataKey::Record(address.clone());
    e.storage().persistent().set(&key, record);
    e.storage()
        .persistent()
        .extend_ttl(&key, RECORD_LIFETIME_THRESHOLD, RECORD_BUMP_AMOUNT);
}

/// Writes a brand new record. An occupied address fails with `exists` when it
/// already holds the same kind, and with `AddressCollision` otherwise.
pub fn create_record(e: &Env, address: &BytesN<32>, record: &Record, exists: ProtocolError) {
    if let Some(existing) = read_record(e, address) {
        if existing.kind() == record.kind() {
            panic_with_error!(e, exists);
        }
        panic_with_error!(e, ProtocolError::AddressCollision);
    }
    write_record(e, address, record);
}

pub fn read_protocol(e: &Env) -> Protocol {
    let address = seeds::protocol_address(e).address;
    match read_record(e, &address) {
        Some(Record::Protocol(protocol)) => protocol,
        Some(_) => panic_with_error!(e, ProtocolError::AddressCollision),
        None => panic_with_error!(e, ProtocolError::NotInitialized),
    }
}

pub fn write_protocol(e: &Env, protocol: &Protocol) {
    let address = seeds::protocol_address(e).address;
    write_record(e, &address, &Record::Protocol(protocol.clone()));
}

pub fn read_agent(e: &Env, address: &BytesN<32>) -> Agent {
    match read_record(e, address) {
        Some(Record::Agent(agent)) => agent,
        Some(_) => panic_with_error!(e, ProtocolError::AddressCollision),
        None => panic_with_error!(e, ProtocolError::AgentNotFound),
    }
}

pub fn write_agent(e: &Env, address: &BytesN<32>, agent: &Agent) {
    write_record(e, address, &Record::Agent(agent.clone()));
}

/// Resolves the agent owned by `authority`, re-deriving its address.
pub fn read_agent_of(e: &Env, authority: &Address) -> (BytesN<32>, Agent) {
    let address = seeds::agent_address(e, authority).address;
    let agent = read_agent(e, &address);
    (address, agent)
}

pub fn read_feedback(e: &Env, address: &BytesN<32>) -> Option<Feedback> {
    match read_record(e, address) {
        Some(Record::Feedback(feedback)) => Some(feedback),
        Some(_) => panic_with_error!(e, ProtocolError::AddressCollision),
        None => None,
    }
}

pub fn read_service(e: &Env, address: &BytesN<32>) -> Service {
    match read_record(e, address) {
        Some(Record::Service(service)) => service,
        Some(_) => panic_with_error!(e, ProtocolError::AddressCollision),
        None => panic_with_error!(e, ProtocolError::ServiceNotFound),
    }
}

pub fn write_service(e: &Env, address: &BytesN<32>, service: &Service) {
    write_record(e, address, &Record::Service(service.clone()));
}

pub fn read_payment(e: &Env, address: &BytesN<32>) -> Payment {
    match read_record(e, address) {
        Some(Record::Payment(payment)) => payment,
        Some(_) => panic_with_error!(e, ProtocolError::AddressCollision),
        None => panic_with_error!(e, ProtocolError::PaymentNotFound),
    }
}

pub fn write_payment(e: &Env, address: &BytesN<32>, payment: &Payment) {
    write_record(e, address, &Record::Payment(payment.clone()));
}

pub fn read_stream(e: &Env, address: &BytesN<32>) -> Stream {
    match read_record(e, address) {
        Some(Record::Stream(stream)) => stream,
        Some(_) => panic_with_error!(e, ProtocolError::AddressCollision),
        None => panic_with_error!(e, ProtocolError::StreamNotFound),
    }
}

pub fn write_stream(e: &Env, address: &BytesN<32>, stream: &Stream) {
    write_record(e, address, &Record::Stream(stream.clone()));
}

/// Reads any vault-shaped record. `kind` must be one of the three vault kinds.
pub fn read_vault(e: &Env, kind: RecordKind, address: &BytesN<32>) -> Vault {
    match (kind, read_record(e, address)) {
        (RecordKind::Vault, Some(Record::Vault(vault)))
        | (RecordKind::Escrow, Some(Record::Escrow(vault)))
        | (RecordKind::StreamVault, Some(Record::StreamVault(vault))) => vault,
        (_, Some(_)) => panic_with_error!(e, ProtocolError::AddressCollision),
        (_, None) => panic_with_error!(e, ProtocolError::VaultNotFound),
    }
}

pub fn write_vault(e: &Env, kind: RecordKind, address: &BytesN<32>, vault: &Vault) {
    let record = match kind {
        RecordKind::Vault => Record::Vault(vault.clone()),
        RecordKind::Escrow => Record::Escrow(vault.clone()),
        RecordKind::StreamVault => Record::StreamVault(vault.clone()),
        _ => panic_with_error!(e, ProtocolError::AddressCollision),
    };
    write_record(e, address, &record);
}

/// Any vault kind, for read-only balance queries.
pub fn read_any_vault(e: &Env, address: &BytesN<32>) -> Vault {
    match read_record(e, address) {
        Some(Record::Vault(vault))
        | Some(Record::Escrow(vault))
        | Some(Record::StreamVault(vault)) => vault,
        Some(_) => panic_with_error!(e, ProtocolError::AddressCollision),
        None => panic_with_error!(e, ProtocolError::VaultNotFound),
    }
}

pub fn read_balance(e: &Env, user: &Address) -> i128 {
    let key = DataKey::Balance(user.clone());
    let balance = e.storage().persistent().get::<_, i128>(&key);
    match balance {
        Some(amount) => {
            e.storage()
                .persistent()
                .extend_ttl(&key, RECORD_LIFETIME_THRESHOLD, RECORD_BUMP_AMOUNT);
            amount
        }
        None => 0,
    }
}

pub fn write_balance(e: &Env, user: &Address, amount: i128) {
    let key = DataKey::Balance(user.clone());
    e.storage().persistent().set(&key, &amount);
    e.storage()
        .persistent()
        .extend_ttl(&key, RECORD_LIFETIME_THRESHOLD, RECORD_BUMP_AMOUNT);
}
