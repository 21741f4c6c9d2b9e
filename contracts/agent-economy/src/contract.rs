use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Vec};

use crate::{
    escrow, identity, marketplace, seeds, storage, streaming,
    types::{Agent, DerivedAddress, Feedback, Payment, PriceModel, Protocol, Service, Stream},
};

#[contract]
pub struct AgentEconomy;

#[contractimpl]
impl AgentEconomy {
    pub fn initialize(e: Env, authority: Address, treasury: Address, fee_bps: u32) {
        identity::initialize(&e, authority, treasury, fee_bps);
    }

    pub fn update_protocol_config(e: Env, authority: Address, treasury: Address, fee_bps: u32) {
        identity::update_protocol_config(&e, authority, treasury, fee_bps);
    }

    pub fn get_protocol(e: Env) -> Protocol {
        storage::read_protocol(&e)
    }

    pub fn deposit(e: Env, user: Address, amount: u64) {
        identity::deposit(&e, user, amount);
    }

    pub fn withdraw(e: Env, user: Address, amount: u64) {
        identity::withdraw(&e, user, amount);
    }

    pub fn balance_of(e: Env, user: Address) -> i128 {
        storage::read_balance(&e, &user)
    }

    pub fn vault_balance(e: Env, vault: BytesN<32>) -> u64 {
        storage::read_any_vault(&e, &vault).balance
    }

    pub fn register_agent(
        e: Env,
        authority: Address,
        name: String,
        description: String,
        capabilities: Vec<String>,
        endpoint: String,
    ) -> BytesN<32> {
        identity::register_agent(&e, authority, name, description, capabilities, endpoint)
    }

    pub fn update_agent(
        e: Env,
        authority: Address,
        description: String,
        capabilities: Vec<String>,
        endpoint: String,
    ) {
        identity::update_agent(&e, authority, description, capabilities, endpoint);
    }

    pub fn set_agent_active(e: Env, authority: Address, is_active: bool) {
        identity::set_agent_active(&e, authority, is_active);
    }

    pub fn stake_reputation(e: Env, authority: Address, amount: u64) {
        identity::stake_reputation(&e, authority, amount);
    }

    pub fn unstake_reputation(e: Env, authority: Address, amount: u64) {
        identity::unstake_reputation(&e, authority, amount);
    }

    pub fn submit_feedback(
        e: Env,
        authority: Address,
        to_agent: BytesN<32>,
        rating: u32,
        comment: String,
    ) {
        identity::submit_feedback(&e, authority, to_agent, rating, comment);
    }

    pub fn get_agent(e: Env, agent: BytesN<32>) -> Agent {
        storage::read_agent(&e, &agent)
    }

    pub fn get_feedback(e: Env, from_agent: BytesN<32>, to_agent: BytesN<32>) -> Option<Feedback> {
        identity::get_feedback(&e, from_agent, to_agent)
    }

    pub fn create_service(
        e: Env,
        authority: Address,
        service_id: String,
        title: String,
        description: String,
        price_lamports: u64,
        price_model: PriceModel,
        tags: Vec<String>,
    ) -> BytesN<32> {
        marketplace::create_service(
            &e,
            authority,
            service_id,
            title,
            description,
            price_lamports,
            price_model,
            tags,
        )
    }

    pub fn update_service(
        e: Env,
        authority: Address,
        service: BytesN<32>,
        price_lamports: u64,
        is_active: bool,
    ) {
        marketplace::update_service(&e, authority, service, price_lamports, is_active);
    }

    pub fn get_service(e: Env, service: BytesN<32>) -> Service {
        storage::read_service(&e, &service)
    }

    pub fn pay_for_service(
        e: Env,
        payer: Address,
        service: BytesN<32>,
        payment: BytesN<32>,
        amount: u64,
        intent: String,
        conditions: Vec<String>,
        timeout_seconds: u64,
    ) -> BytesN<32> {
        escrow::pay_for_service(
            &e,
            payer,
            service,
            payment,
            amount,
            intent,
            conditions,
            timeout_seconds,
        )
    }

    pub fn release_payment(e: Env, caller: Address, payment: BytesN<32>) {
        escrow::release_payment(&e, caller, payment);
    }

    pub fn refund_payment(e: Env, caller: Address, payment: BytesN<32>) {
        escrow::refund_payment(&e, caller, payment);
    }

    pub fn dispute_payment(e: Env, caller: Address, payment: BytesN<32>) {
        escrow::dispute_payment(&e, caller, payment);
    }

    pub fn resolve_dispute(e: Env, authority: Address, payment: BytesN<32>, release: bool) {
        escrow::resolve_dispute(&e, authority, payment, release);
    }

    pub fn get_payment(e: Env, payment: BytesN<32>) -> Payment {
        storage::read_payment(&e, &payment)
    }

    pub fn create_stream(
        e: Env,
        payer: Address,
        receiver_agent: BytesN<32>,
        rate_per_second: u64,
        max_duration_seconds: u64,
        deposit: u64,
    ) -> BytesN<32> {
        streaming::create_stream(
            &e,
            payer,
            receiver_agent,
            rate_per_second,
            max_duration_seconds,
            deposit,
        )
    }

    pub fn withdraw_stream(e: Env, caller: Address, stream: BytesN<32>) {
        streaming::withdraw_stream(&e, caller, stream);
    }

    pub fn cancel_stream(e: Env, caller: Address, stream: BytesN<32>) {
        streaming::cancel_stream(&e, caller, stream);
    }

    pub fn get_stream(e: Env, stream: BytesN<32>) -> Stream {
        storage::read_stream(&e, &stream)
    }

    pub fn protocol_address(e: Env) -> DerivedAddress {
        seeds::protocol_address(&e)
    }

    pub fn agent_address(e: Env, owner: Address) -> DerivedAddress {
        seeds::agent_address(&e, &owner)
    }

    pub fn vault_address(e: Env, agent: BytesN<32>) -> DerivedAddress {
        seeds::vault_address(&e, &agent)
    }

    pub fn feedback_address(
        e: Env,
        from_agent: BytesN<32>,
        to_agent: BytesN<32>,
    ) -> DerivedAddress {
        seeds::feedback_address(&e, &from_agent, &to_agent)
    }

    pub fn service_address(e: Env, provider: BytesN<32>, service_id: String) -> DerivedAddress {
        seeds::service_address(&e, &provider, &service_id)
    }

    pub fn payment_address(
        e: Env,
        payer_agent: BytesN<32>,
        service: BytesN<32>,
        order_nonce: u64,
    ) -> DerivedAddress {
        seeds::payment_address(&e, &payer_agent, &service, order_nonce)
    }

    pub fn next_payment_address(
        e: Env,
        payer_agent: BytesN<32>,
        service: BytesN<32>,
    ) -> DerivedAddress {
        marketplace::next_payment_address(&e, &payer_agent, &service)
    }

    pub fn escrow_address(e: Env, payment: BytesN<32>) -> DerivedAddress {
        seeds::escrow_address(&e, &payment)
    }

    pub fn stream_address(
        e: Env,
        payer_agent: BytesN<32>,
        receiver_agent: BytesN<32>,
    ) -> DerivedAddress {
        seeds::stream_address(&e, &payer_agent, &receiver_agent)
    }

    pub fn stream_vault_address(e: Env, stream: BytesN<32>) -> DerivedAddress {
        seeds::stream_vault_address(&e, &stream)
    }
}
