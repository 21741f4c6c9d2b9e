use soroban_sdk::{panic_with_error, xdr::ToXdr, Address, Bytes, BytesN, Env, String};

use crate::types::{DerivedAddress, ProtocolError, MAX_SERVICE_ID_LEN};

const DOMAIN: &[u8] = b"agent-economy/pda";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecordKind {
    Protocol,
    Agent,
    Vault,
    Feedback,
    Service,
    Payment,
    Escrow,
    Stream,
    StreamVault,
}

impl RecordKind {
    pub fn seed(&self) -> &'static [u8] {
        match self {
            RecordKind::Protocol => b"protocol",
            RecordKind::Agent => b"agent",
            RecordKind::Vault => b"vault",
            RecordKind::Feedback => b"feedback",
            RecordKind::Service => b"service",
            RecordKind::Payment => b"payment",
            RecordKind::Escrow => b"escrow",
            RecordKind::Stream => b"stream",
            RecordKind::StreamVault => b"stream_vault",
        }
    }
}

/// Hashes `kind` and `components` with a fixed bump. Returns `None` when the
/// digest lands in the half of the address space reserved for keyed
/// accounts (high bit of the last byte set).
pub fn create_record_address(
    e: &Env,
    kind: RecordKind,
    components: &[Bytes],
    bump: u8,
) -> Option<BytesN<32>> {
    let mut preimage = Bytes::from_slice(e, DOMAIN);
    preimage.append(&e.current_contract_address().to_xdr(e));
    preimage.extend_from_slice(kind.seed());
    for component in components {
        preimage.extend_from_array(&component.len().to_be_bytes());
        preimage.append(component);
    }
    preimage.push_back(bump);

    let digest = e.crypto().sha256(&preimage).to_bytes();
    if digest.to_array()[31] & 0x80 == 0 {
        Some(digest)
    } else {
        None
    }
}

/// Searches bumps from 255 downward and returns the first valid address.
pub fn find_record_address(e: &Env, kind: RecordKind, components: &[Bytes]) -> DerivedAddress {
    for bump in (0..=u8::MAX).rev() {
        if let Some(address) = create_record_address(e, kind, components, bump) {
            return DerivedAddress {
                address,
                bump: bump as u32,
            };
        }
    }
    panic_with_error!(e, ProtocolError::AddressCollision)
}

fn address_bytes(e: &Env, address: &BytesN<32>) -> Bytes {
    Bytes::from_array(e, &address.to_array())
}

fn identity_bytes(e: &Env, identity: &Address) -> Bytes {
    identity.clone().to_xdr(e)
}

fn string_bytes(e: &Env, value: &String) -> Bytes {
    let len = value.len() as usize;
    if len > MAX_SERVICE_ID_LEN as usize {
        panic_with_error!(e, ProtocolError::ServiceIdTooLong);
    }
    let mut buf = [0u8; MAX_SERVICE_ID_LEN as usize];
    value.copy_into_slice(&mut buf[..len]);
    Bytes::from_slice(e, &buf[..len])
}

pub fn protocol_address(e: &Env) -> DerivedAddress {
    find_record_address(e, RecordKind::Protocol, &[])
}

pub fn agent_address(e: &Env, owner: &Address) -> DerivedAddress {
    find_record_address(e, RecordKind::Agent, &[identity_bytes(e, owner)])
}

pub fn vault_address(e: &Env, agent: &BytesN<32>) -> DerivedAddress {
    find_record_address(e, RecordKind::Vault, &[address_bytes(e, agent)])
}

pub fn feedback_address(e: &Env, from_agent: &BytesN<32>, to_agent: &BytesN<32>) -> DerivedAddress {
    find_record_address(
        e,
        RecordKind::Feedback,
        &[address_bytes(e, from_agent), address_bytes(e, to_agent)],
    )
}

pub fn service_address(e: &Env, provider: &BytesN<32>, service_id: &String) -> DerivedAddress {
    find_record_address(
        e,
        RecordKind::Service,
        &[address_bytes(e, provider), string_bytes(e, service_id)],
    )
}

pub fn payment_address(
    e: &Env,
    payer_agent: &BytesN<32>,
    service: &BytesN<32>,
    order_nonce: u64,
) -> DerivedAddress {
    find_record_address(
        e,
        RecordKind::Payment,
        &[
            address_bytes(e, payer_agent),
            address_bytes(e, service),
            Bytes::from_array(e, &order_nonce.to_le_bytes()),
        ],
    )
}

pub fn escrow_address(e: &Env, payment: &BytesN<32>) -> DerivedAddress {
    find_record_address(e, RecordKind::Escrow, &[address_bytes(e, payment)])
}

pub fn stream_address(
    e: &Env,
    payer_agent: &BytesN<32>,
    receiver_agent: &BytesN<32>,
) -> DerivedAddress {
    find_record_address(
        e,
        RecordKind::Stream,
        &[address_bytes(e, payer_agent), address_bytes(e, receiver_agent)],
    )
}

pub fn stream_vault_address(e: &Env, stream: &BytesN<32>) -> DerivedAddress {
    find_record_address(e, RecordKind::StreamVault, &[address_bytes(e, stream)])
}

/// Re-derives the vault owned by `parent` and checks it against the bump the
/// parent recorded when the vault was created.
pub fn owned_vault(e: &Env, kind: RecordKind, parent: &BytesN<32>, stored_bump: u32) -> BytesN<32> {
    let derived = find_record_address(e, kind, &[address_bytes(e, parent)]);
    if derived.bump != stored_bump {
        panic_with_error!(e, ProtocolError::AddressMismatch);
    }
    derived.address
}
