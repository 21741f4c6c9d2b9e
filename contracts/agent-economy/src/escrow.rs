use soroban_sdk::{log, panic_with_error, symbol_short, Address, BytesN, Env, String, Vec};

use crate::{
    marketplace::record_order,
    reputation,
    seeds::{self, RecordKind},
    storage::{
        create_record, read_agent, read_agent_of, read_payment, read_protocol, read_service,
        write_agent, write_payment, write_protocol, write_service,
    },
    types::{
        Payment, PaymentCreatedLog, PaymentDisputedLog, PaymentRefundedLog, PaymentReleasedLog,
        PaymentStatus, ProtocolError, Record, RefundReason, Vault, MAX_CONDITIONS,
        MAX_CONDITION_LEN, MAX_INTENT_LEN,
    },
    utils::{
        checked_add, checked_sub, compute_fee, fund_vault, now, pay_out, require_len,
        require_list, require_positive,
    },
};

pub fn pay_for_service(
    e: &Env,
    payer: Address,
    service: BytesN<32>,
    payment: BytesN<32>,
    amount: u64,
    intent: String,
    conditions: Vec<String>,
    timeout_seconds: u64,
) -> BytesN<32> {
    payer.require_auth();
    require_positive(e, amount);
    require_len(e, &intent, MAX_INTENT_LEN, ProtocolError::IntentTooLong);
    require_list(
        e,
        &conditions,
        MAX_CONDITIONS,
        MAX_CONDITION_LEN,
        ProtocolError::TooManyConditions,
        ProtocolError::ConditionTooLong,
    );
    if timeout_seconds == 0 {
        panic_with_error!(e, ProtocolError::InvalidTimeout);
    }

    let (payer_agent, mut payer_record) = read_agent_of(e, &payer);
    if !payer_record.is_active {
        panic_with_error!(e, ProtocolError::AgentInactive);
    }
    let mut service_record = read_service(e, &service);
    if !service_record.is_active {
        panic_with_error!(e, ProtocolError::ServiceInactive);
    }
    let receiver_agent = service_record.provider.clone();
    if receiver_agent == payer_agent {
        panic_with_error!(e, ProtocolError::SelfDealing);
    }
    if !read_agent(e, &receiver_agent).is_active {
        panic_with_error!(e, ProtocolError::AgentInactive);
    }
    let mut protocol = read_protocol(e);

    // The caller derived `payment` from the order count it last saw.
    let derived = seeds::payment_address(e, &payer_agent, &service, service_record.total_orders);
    if derived.address != payment {
        panic_with_error!(e, ProtocolError::AddressMismatch);
    }
    record_order(e, &service, &mut service_record);

    let escrow = seeds::escrow_address(e, &payment);
    let created_at = now(e);
    let record = Payment {
        payer: payer_agent.clone(),
        receiver: receiver_agent.clone(),
        service,
        amount,
        intent: intent.clone(),
        conditions,
        status: PaymentStatus::Escrowed,
        created_at,
        timeout_at: checked_add(e, created_at, timeout_seconds),
        completed_at: 0,
        bump: derived.bump,
        escrow_bump: escrow.bump,
    };
    create_record(e, &payment, &Record::Payment(record), ProtocolError::AddressCollision);
    create_record(
        e,
        &escrow.address,
        &Record::Escrow(Vault {
            owner: payment.clone(),
            balance: 0,
            bump: escrow.bump,
        }),
        ProtocolError::AddressCollision,
    );
    fund_vault(e, &payer, RecordKind::Escrow, &escrow.address, amount);

    payer_record.services_requested = checked_add(e, payer_record.services_requested, 1);
    write_agent(e, &payer_agent, &payer_record);

    protocol.total_payments = checked_add(e, protocol.total_payments, 1);
    protocol.total_volume = checked_add(e, protocol.total_volume, amount);
    write_protocol(e, &protocol);

    e.events().publish(
        (symbol_short!("payment"), symbol_short!("created")),
        PaymentCreatedLog {
            payment: payment.clone(),
            payer: payer_agent,
            receiver: receiver_agent,
            amount,
            intent,
        },
    );

    payment
}

pub fn release_payment(e: &Env, caller: Address, payment: BytesN<32>) {
    caller.require_auth();
    let mut record = read_payment(e, &payment);
    let payer = read_agent(e, &record.payer);
    if payer.authority != caller {
        panic_with_error!(e, ProtocolError::Unauthorized);
    }
    match record.status {
        PaymentStatus::Escrowed | PaymentStatus::Disputed => {}
        PaymentStatus::Released | PaymentStatus::Refunded => {
            panic_with_error!(e, ProtocolError::PaymentNotEscrowed)
        }
    }
    settle_release(e, &payment, &mut record);
}

pub fn refund_payment(e: &Env, caller: Address, payment: BytesN<32>) {
    caller.require_auth();
    let mut record = read_payment(e, &payment);
    match record.status {
        PaymentStatus::Escrowed => {}
        PaymentStatus::Disputed | PaymentStatus::Released | PaymentStatus::Refunded => {
            panic_with_error!(e, ProtocolError::PaymentNotEscrowed)
        }
    }

    let payer = read_agent(e, &record.payer);
    let is_payer = payer.authority == caller;
    let is_timeout = now(e) >= record.timeout_at;
    if !is_payer && !is_timeout {
        panic_with_error!(e, ProtocolError::RefundNotAllowed);
    }
    let reason = if is_timeout {
        RefundReason::Timeout
    } else {
        RefundReason::PayerCancelled
    };
    settle_refund(e, &payment, &mut record, &payer.authority, reason);
}

pub fn dispute_payment(e: &Env, caller: Address, payment: BytesN<32>) {
    caller.require_auth();
    let mut record = read_payment(e, &payment);
    let payer = read_agent(e, &record.payer);
    let receiver = read_agent(e, &record.receiver);
    if caller != payer.authority && caller != receiver.authority {
        panic_with_error!(e, ProtocolError::Unauthorized);
    }
    match record.status {
        PaymentStatus::Escrowed => {}
        PaymentStatus::Disputed | PaymentStatus::Released | PaymentStatus::Refunded => {
            panic_with_error!(e, ProtocolError::PaymentNotEscrowed)
        }
    }

    record.status = PaymentStatus::Disputed;
    write_payment(e, &payment, &record);

    e.events().publish(
        (symbol_short!("payment"), symbol_short!("disputed")),
        PaymentDisputedLog {
            payment,
            raised_by: caller,
        },
    );
}

/// Settles a disputed payment on the protocol authority's ruling.
pub fn resolve_dispute(e: &Env, authority: Address, payment: BytesN<32>, release: bool) {
    authority.require_auth();
    let protocol = read_protocol(e);
    if protocol.authority != authority {
        panic_with_error!(e, ProtocolError::Unauthorized);
    }
    let mut record = read_payment(e, &payment);
    match record.status {
        PaymentStatus::Disputed => {}
        PaymentStatus::Escrowed | PaymentStatus::Released | PaymentStatus::Refunded => {
            panic_with_error!(e, ProtocolError::PaymentNotDisputed)
        }
    }

    if release {
        settle_release(e, &payment, &mut record);
    } else {
        let payer = read_agent(e, &record.payer);
        settle_refund(e, &payment, &mut record, &payer.authority, RefundReason::DisputeResolved);
    }
}

fn settle_release(e: &Env, address: &BytesN<32>, payment: &mut Payment) {
    let escrow = seeds::owned_vault(e, RecordKind::Escrow, address, payment.escrow_bump);
    let protocol = read_protocol(e);
    let mut payer = read_agent(e, &payment.payer);
    let mut receiver = read_agent(e, &payment.receiver);
    let mut service = read_service(e, &payment.service);

    let amount = payment.amount;
    let fee = compute_fee(amount, protocol.fee_bps);
    let net = checked_sub(e, amount, fee);
    pay_out(e, RecordKind::Escrow, &escrow, &protocol.treasury, fee);
    pay_out(e, RecordKind::Escrow, &escrow, &receiver.authority, net);

    payment.status = PaymentStatus::Released;
    payment.completed_at = now(e);
    write_payment(e, address, payment);

    receiver.total_earned = checked_add(e, receiver.total_earned, net);
    receiver.services_completed = checked_add(e, receiver.services_completed, 1);
    reputation::refresh(&mut receiver);
    write_agent(e, &payment.receiver, &receiver);

    payer.total_spent = checked_add(e, payer.total_spent, amount);
    write_agent(e, &payment.payer, &payer);

    service.total_revenue = checked_add(e, service.total_revenue, amount);
    write_service(e, &payment.service, &service);

    log!(e, "payment released", amount, fee);

    let latency_ms = payment
        .completed_at
        .saturating_sub(payment.created_at)
        .saturating_mul(1000);
    e.events().publish(
        (symbol_short!("payment"), symbol_short!("released")),
        PaymentReleasedLog {
            payment: address.clone(),
            receiver: payment.receiver.clone(),
            amount,
            fee,
            latency_ms,
        },
    );
}

fn settle_refund(
    e: &Env,
    address: &BytesN<32>,
    payment: &mut Payment,
    payer_authority: &Address,
    reason: RefundReason,
) {
    let escrow = seeds::owned_vault(e, RecordKind::Escrow, address, payment.escrow_bump);
    let amount = payment.amount;
    pay_out(e, RecordKind::Escrow, &escrow, payer_authority, amount);

    payment.status = PaymentStatus::Refunded;
    payment.completed_at = now(e);
    write_payment(e, address, payment);

    log!(e, "payment refunded", amount);

    e.events().publish(
        (symbol_short!("payment"), symbol_short!("refunded")),
        PaymentRefundedLog {
            payment: address.clone(),
            payer: payment.payer.clone(),
            amount,
            reason,
        },
    );
}
