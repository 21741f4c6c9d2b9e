use soroban_sdk::{log, panic_with_error, symbol_short, Address, BytesN, Env};

use crate::{
    seeds::{self, RecordKind},
    storage::{create_record, read_agent, read_agent_of, read_stream, write_agent, write_stream},
    types::{
        Agent, ProtocolError, Record, Stream, StreamCancelledLog, StreamCreatedLog,
        StreamWithdrawnLog, Vault,
    },
    utils::{checked_add, checked_mul, fund_vault, now, pay_out, require_positive},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Accrual {
    pub payout: u64,
    pub effective_end: u64,
}

/// What the receiver is owed at `now`: time since the last withdrawal, capped
/// at `max_end_at`, times the rate, capped by what is left in the vault.
/// Returns `None` if the product overflows.
pub fn accrue(stream: &Stream, now: u64) -> Option<Accrual> {
    let effective_end = now.min(stream.max_end_at).max(stream.last_withdrawn_at);
    let elapsed = effective_end - stream.last_withdrawn_at;
    let accrued = elapsed.checked_mul(stream.rate_per_second)?;
    let available = stream.deposited.checked_sub(stream.withdrawn)?;
    Some(Accrual {
        payout: accrued.min(available),
        effective_end,
    })
}

pub fn create_stream(
    e: &Env,
    payer: Address,
    receiver_agent: BytesN<32>,
    rate_per_second: u64,
    max_duration_seconds: u64,
    deposit: u64,
) -> BytesN<32> {
    payer.require_auth();
    require_positive(e, rate_per_second);
    if max_duration_seconds == 0 {
        panic_with_error!(e, ProtocolError::InvalidDuration);
    }
    let required = checked_mul(e, rate_per_second, max_duration_seconds);
    if deposit < required {
        panic_with_error!(e, ProtocolError::InsufficientDeposit);
    }

    let (payer_agent, payer_record) = read_agent_of(e, &payer);
    if !payer_record.is_active {
        panic_with_error!(e, ProtocolError::AgentInactive);
    }
    if payer_agent == receiver_agent {
        panic_with_error!(e, ProtocolError::SelfDealing);
    }
    if !read_agent(e, &receiver_agent).is_active {
        panic_with_error!(e, ProtocolError::AgentInactive);
    }

    let derived = seeds::stream_address(e, &payer_agent, &receiver_agent);
    let vault = seeds::stream_vault_address(e, &derived.address);
    let started_at = now(e);
    let stream = Stream {
        payer: payer_agent.clone(),
        receiver: receiver_agent.clone(),
        rate_per_second,
        deposited: deposit,
        withdrawn: 0,
        started_at,
        max_end_at: checked_add(e, started_at, max_duration_seconds),
        last_withdrawn_at: started_at,
        is_active: true,
        bump: derived.bump,
        vault_bump: vault.bump,
    };
    create_record(
        e,
        &derived.address,
        &Record::Stream(stream),
        ProtocolError::StreamAlreadyExists,
    );
    create_record(
        e,
        &vault.address,
        &Record::StreamVault(Vault {
            owner: derived.address.clone(),
            balance: 0,
            bump: vault.bump,
        }),
        ProtocolError::AddressCollision,
    );
    fund_vault(e, &payer, RecordKind::StreamVault, &vault.address, deposit);

    e.events().publish(
        (symbol_short!("stream"), symbol_short!("created")),
        StreamCreatedLog {
            stream: derived.address.clone(),
            payer: payer_agent,
            receiver: receiver_agent,
            rate_per_second,
            deposit,
        },
    );

    derived.address
}

pub fn withdraw_stream(e: &Env, caller: Address, stream: BytesN<32>) {
    caller.require_auth();
    let mut record = read_stream(e, &stream);
    if !record.is_active {
        panic_with_error!(e, ProtocolError::StreamNotActive);
    }

    let current = now(e);
    let mut receiver = read_agent(e, &record.receiver);
    // Once the stream has run its course anyone may settle it.
    if caller != receiver.authority && current < record.max_end_at {
        panic_with_error!(e, ProtocolError::Unauthorized);
    }

    let accrual = accrue(&record, current)
        .unwrap_or_else(|| panic_with_error!(e, ProtocolError::ArithmeticOverflow));
    if accrual.payout == 0 {
        panic_with_error!(e, ProtocolError::NothingToWithdraw);
    }

    let vault = seeds::owned_vault(e, RecordKind::StreamVault, &stream, record.vault_bump);
    let mut payer = read_agent(e, &record.payer);
    pay_to_receiver(e, &mut record, &vault, &mut receiver, &mut payer, accrual);

    if record.withdrawn == record.deposited || current >= record.max_end_at {
        close(e, &mut record, &vault, &payer.authority);
    }

    write_stream(e, &stream, &record);
    write_agent(e, &record.receiver, &receiver);
    write_agent(e, &record.payer, &payer);

    e.events().publish(
        (symbol_short!("stream"), symbol_short!("withdrawn")),
        StreamWithdrawnLog {
            stream,
            amount: accrual.payout,
            total_withdrawn: record.withdrawn,
            is_active: record.is_active,
        },
    );
}

pub fn cancel_stream(e: &Env, caller: Address, stream: BytesN<32>) {
    caller.require_auth();
    let mut record = read_stream(e, &stream);
    if !record.is_active {
        panic_with_error!(e, ProtocolError::StreamNotActive);
    }
    let mut payer = read_agent(e, &record.payer);
    if payer.authority != caller {
        panic_with_error!(e, ProtocolError::Unauthorized);
    }
    let mut receiver = read_agent(e, &record.receiver);

    let accrual = accrue(&record, now(e))
        .unwrap_or_else(|| panic_with_error!(e, ProtocolError::ArithmeticOverflow));
    let vault = seeds::owned_vault(e, RecordKind::StreamVault, &stream, record.vault_bump);
    pay_to_receiver(e, &mut record, &vault, &mut receiver, &mut payer, accrual);
    let refunded = close(e, &mut record, &vault, &payer.authority);

    write_stream(e, &stream, &record);
    write_agent(e, &record.receiver, &receiver);
    write_agent(e, &record.payer, &payer);

    e.events().publish(
        (symbol_short!("stream"), symbol_short!("cancelled")),
        StreamCancelledLog {
            stream,
            paid_to_receiver: accrual.payout,
            refunded_to_payer: refunded,
        },
    );
}

fn pay_to_receiver(
    e: &Env,
    stream: &mut Stream,
    vault: &BytesN<32>,
    receiver: &mut Agent,
    payer: &mut Agent,
    accrual: Accrual,
) {
    pay_out(e, RecordKind::StreamVault, vault, &receiver.authority, accrual.payout);
    stream.withdrawn = checked_add(e, stream.withdrawn, accrual.payout);
    stream.last_withdrawn_at = accrual.effective_end;
    receiver.total_earned = checked_add(e, receiver.total_earned, accrual.payout);
    payer.total_spent = checked_add(e, payer.total_spent, accrual.payout);
}

/// Deactivates the stream and sweeps whatever is left back to the payer.
fn close(e: &Env, stream: &mut Stream, vault: &BytesN<32>, payer_authority: &Address) -> u64 {
    let remaining = stream.deposited - stream.withdrawn;
    pay_out(e, RecordKind::StreamVault, vault, payer_authority, remaining);
    stream.is_active = false;
    log!(e, "stream closed", stream.withdrawn, remaining);
    remaining
}
