use soroban_sdk::{panic_with_error, Address, BytesN, Env, String, Vec};

use crate::{
    seeds::RecordKind,
    storage::{read_balance, read_vault, write_balance, write_vault},
    types::{ProtocolError, BPS_DENOMINATOR},
};

pub fn now(e: &Env) -> u64 {
    e.ledger().timestamp()
}

pub fn checked_add(e: &Env, a: u64, b: u64) -> u64 {
    a.checked_add(b)
        .unwrap_or_else(|| panic_with_error!(e, ProtocolError::ArithmeticOverflow))
}

pub fn checked_sub(e: &Env, a: u64, b: u64) -> u64 {
    a.checked_sub(b)
        .unwrap_or_else(|| panic_with_error!(e, ProtocolError::ArithmeticOverflow))
}

pub fn checked_mul(e: &Env, a: u64, b: u64) -> u64 {
    a.checked_mul(b)
        .unwrap_or_else(|| panic_with_error!(e, ProtocolError::ArithmeticOverflow))
}

pub fn require_len(e: &Env, value: &String, max: u32, err: ProtocolError) {
    if value.len() > max {
        panic_with_error!(e, err);
    }
}

pub fn require_non_empty(e: &Env, value: &String) {
    if value.len() == 0 {
        panic_with_error!(e, ProtocolError::EmptyField);
    }
}

/// Bounds a list of strings by count and by the length of each entry.
pub fn require_list(
    e: &Env,
    values: &Vec<String>,
    max_items: u32,
    max_item_len: u32,
    too_many: ProtocolError,
    too_long: ProtocolError,
) {
    if values.len() > max_items {
        panic_with_error!(e, too_many);
    }
    for value in values.iter() {
        require_len(e, &value, max_item_len, too_long);
    }
}

pub fn require_positive(e: &Env, amount: u64) {
    if amount == 0 {
        panic_with_error!(e, ProtocolError::ZeroAmount);
    }
}

pub fn debit_balance(e: &Env, user: &Address, amount: u64) {
    let balance = read_balance(e, user);
    let amount = amount as i128;
    if balance < amount {
        panic_with_error!(e, ProtocolError::InsufficientBalance);
    }
    write_balance(e, user, balance - amount);
}

pub fn credit_balance(e: &Env, user: &Address, amount: u64) {
    if amount == 0 {
        return;
    }
    let balance = read_balance(e, user);
    let new_balance = balance
        .checked_add(amount as i128)
        .unwrap_or_else(|| panic_with_error!(e, ProtocolError::ArithmeticOverflow));
    write_balance(e, user, new_balance);
}

pub fn credit_vault(e: &Env, kind: RecordKind, vault: &BytesN<32>, amount: u64) {
    let mut record = read_vault(e, kind, vault);
    record.balance = checked_add(e, record.balance, amount);
    write_vault(e, kind, vault, &record);
}

pub fn debit_vault(e: &Env, kind: RecordKind, vault: &BytesN<32>, amount: u64) {
    let mut record = read_vault(e, kind, vault);
    if record.balance < amount {
        panic_with_error!(e, ProtocolError::InsufficientBalance);
    }
    record.balance -= amount;
    write_vault(e, kind, vault, &record);
}

/// Moves funds out of a caller's available balance into a vault.
pub fn fund_vault(e: &Env, from: &Address, kind: RecordKind, vault: &BytesN<32>, amount: u64) {
    debit_balance(e, from, amount);
    credit_vault(e, kind, vault, amount);
}

/// Moves funds out of a vault into an identity's available balance.
pub fn pay_out(e: &Env, kind: RecordKind, vault: &BytesN<32>, to: &Address, amount: u64) {
    if amount == 0 {
        return;
    }
    debit_vault(e, kind, vault, amount);
    credit_balance(e, to, amount);
}

/// `amount * fee_bps / 10_000`, rounded down.
pub fn compute_fee(amount: u64, fee_bps: u32) -> u64 {
    let fee = (amount as u128) * (fee_bps as u128) / (BPS_DENOMINATOR as u128);
    fee as u64
}
